//! Track Outline Geometry for OpenRacing
//!
//! This crate turns the outline of a race track, drawn as an SVG path, into a
//! curve that can be addressed by distance travelled instead of by the
//! native Bezier parameter.
//!
//! # Overview
//!
//! - **Path data**: tokenizer and parser for the SVG path mini-language
//!   (`M L H V C S Q T A Z`, absolute and relative)
//! - **Segments**: lines, quadratic/cubic Bezier curves and elliptical arcs
//! - **Arc length**: adaptive Simpson quadrature and bisection root-finding
//! - **TrackCurve**: the parsed outline with cached cumulative lengths and
//!   ratio/distance to position queries
//! - **SVG**: extraction of the track `<path>` element from an SVG document
//!
//! # Numerical Behaviour
//!
//! Segment lengths are integrated once when a [`TrackCurve`] is built. Each
//! position query then walks the cumulative lengths and inverts the arc-length
//! integral of a single segment by bisection, so a query costs a bounded number
//! of quadratures. None of this is meant for a real-time loop; it runs while a
//! track is being preprocessed.
//!
//! # Example
//!
//! ```
//! use openracing_track_geometry::TrackCurve;
//!
//! let curve = TrackCurve::parse("M0 0 L100 0 L100 100 L0 100 Z")?;
//! assert!((curve.total_length() - 400.0).abs() < 1e-9);
//!
//! let (x, y) = curve.position_at_ratio(0.125)?;
//! assert!((x - 50.0).abs() < 1e-6 && y.abs() < 1e-6);
//! # Ok::<(), openracing_track_geometry::GeometryError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod arc_length;
pub mod curve;
pub mod error;
pub mod path_data;
pub mod point;
pub mod prelude;
pub mod segment;
pub mod svg;

pub use curve::{TrackCurve, TrackInfo};
pub use error::{GeometryError, GeometryResult};
pub use path_data::{ParsedPath, parse_path_data};
pub use point::Point;
pub use segment::{CubicBezier, EllipticalArc, Line, QuadraticBezier, Segment};
pub use svg::{DEFAULT_TRACK_ELEMENT_ID, find_path_data};
