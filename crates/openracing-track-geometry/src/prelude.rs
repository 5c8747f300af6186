//! Prelude for openracing-track-geometry
//!
//! Re-exports the types needed to load a track outline and query it.
//!
//! # Example
//!
//! ```
//! use openracing_track_geometry::prelude::*;
//!
//! let curve = TrackCurve::parse("M0 0 h10 v10 h-10 z")?;
//! assert_eq!(curve.segment_count(), 4);
//! # Ok::<(), GeometryError>(())
//! ```

pub use crate::curve::{TrackCurve, TrackInfo};
pub use crate::error::{GeometryError, GeometryResult};
pub use crate::path_data::{ParsedPath, parse_path_data};
pub use crate::point::Point;
pub use crate::segment::Segment;
pub use crate::svg::{DEFAULT_TRACK_ELEMENT_ID, find_path_data};
