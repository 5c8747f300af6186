//! Prelude for openracing-track-curvature
//!
//! ```
//! use openracing_track_curvature::prelude::*;
//!
//! let smoother = LookaheadSmoother::new(DEFAULT_ATTENUATION)?;
//! assert_eq!(smoother.attenuation(), 0.95);
//! # Ok::<(), CurvatureError>(())
//! ```

pub use crate::error::{CurvatureError, CurvatureResult};
pub use crate::lookahead::{DEFAULT_ATTENUATION, LookaheadSmoother, SmoothingReport};
pub use crate::point::{TrackPoint, TrackPointSequence};
pub use crate::sampler::{ArcLengthCurve, CurvatureSampler, sample_count, sample_track};
pub use crate::stats::CurvatureStats;
