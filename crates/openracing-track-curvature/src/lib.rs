//! Track Curvature Profiles for OpenRacing
//!
//! This crate turns an arc-length addressable track curve into a dense
//! curvature profile sampled at a fixed physical spacing, and applies the
//! lookahead smoothing that lets a consumer anticipate upcoming turns.
//!
//! # Overview
//!
//! - **Sampler**: `N = floor(lap_length / step)` samples at distance ratios
//!   `i / N`; curvature is the magnitude of the heading change between the
//!   chords to the circular neighbours
//! - **Sequence**: [`TrackPointSequence`] owns the samples and provides the
//!   wrap-around index helpers
//! - **Lookahead**: [`LookaheadSmoother`] projects curvature backwards with a
//!   constant attenuation per sample
//! - **Stats**: [`CurvatureStats`] summarizes a profile
//!
//! "Curvature" here is a gameplay signal in radians per sample, not the
//! differential-geometric curvature of the outline.
//!
//! # Cost
//!
//! Sampling performs `N` arc-length inversions on the curve. Smoothing is
//! `O(N)` for typical profiles and `O(N^2)` in the worst case, since every
//! backward chain is capped at `N` steps.
//!
//! # Example
//!
//! ```
//! use openracing_track_curvature::{LookaheadSmoother, sample_track};
//! use openracing_track_geometry::TrackCurve;
//!
//! let curve = TrackCurve::parse("M0 0 L100 0 L100 100 L0 100 Z")?;
//! let mut profile = sample_track(&curve, 400.0, 1.0)?;
//! assert_eq!(profile.len(), 400);
//!
//! LookaheadSmoother::new(0.95)?.apply(&mut profile);
//! assert!(profile.curvature_at(99) > 1.4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod lookahead;
pub mod point;
pub mod prelude;
pub mod sampler;
pub mod stats;

pub use error::{CurvatureError, CurvatureResult};
pub use lookahead::{DEFAULT_ATTENUATION, LookaheadSmoother, SmoothingReport};
pub use point::{TrackPoint, TrackPointSequence};
pub use sampler::{
    ArcLengthCurve, CurvatureSampler, MIN_SAMPLES, compute_curvature, heading_change,
    normalize_angle, sample_count, sample_track,
};
pub use stats::CurvatureStats;
