//! Error types for curvature sampling and smoothing.

use openracing_track_geometry::GeometryError;
use thiserror::Error;

/// Result type for curvature operations.
pub type CurvatureResult<T> = Result<T, CurvatureError>;

/// Errors raised while sampling or smoothing a curvature profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurvatureError {
    /// Too few samples for the circular neighbour scheme.
    #[error("Sampling yields {count} points, at least {minimum} are required")]
    InsufficientSamples {
        /// Number of samples the configuration produces.
        count: usize,
        /// Smallest usable sample count.
        minimum: usize,
    },

    /// Lap length or step size cannot produce a valid sample count.
    #[error("Invalid sampling configuration: {0}")]
    InvalidConfiguration(String),

    /// Attenuation factor is not a finite value strictly inside `(0, 1)`.
    #[error("Attenuation factor {0} must be finite and strictly between 0 and 1")]
    InvalidAttenuation(f64),

    /// The curve rejected a position query.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
