//! Error types for the track preprocessing pipeline

use std::path::PathBuf;

use openracing_curvature_format::FormatError;
use openracing_track_curvature::CurvatureError;
use openracing_track_geometry::GeometryError;
use serde::Serialize;
use thiserror::Error;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Any failure while turning a track into a curvature artifact.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Path parsing, SVG extraction or curve query failure.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Sampling or smoothing failure.
    #[error(transparent)]
    Curvature(#[from] CurvatureError),

    /// Artifact encoding, decoding or storage failure.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Processing parameters or metadata values out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `track.json` is not valid metadata.
    #[error("Invalid track metadata in {}: {source}", path.display())]
    Metadata {
        /// Metadata file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// An input file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`PipelineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Path description or the SVG carrying it is unusable.
    MalformedPath,
    /// Path description has no drawable segments.
    EmptyPath,
    /// A distance ratio outside `[0, 1]`.
    InvalidRatio,
    /// Fewer samples than the curvature scheme needs.
    InsufficientSamples,
    /// Lengths, step, attenuation or metadata are out of range.
    InvalidConfiguration,
    /// Filesystem failure, or an artifact that cannot be decoded.
    IoError,
}

impl ErrorKind {
    /// Process exit code reported by `trackprep`.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::MalformedPath | Self::EmptyPath => 2,
            Self::InvalidRatio => 3,
            Self::InsufficientSamples => 4,
            Self::InvalidConfiguration => 5,
            Self::IoError => 6,
        }
    }

    /// Stable name used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedPath => "malformed_path",
            Self::EmptyPath => "empty_path",
            Self::InvalidRatio => "invalid_ratio",
            Self::InsufficientSamples => "insufficient_samples",
            Self::InvalidConfiguration => "invalid_configuration",
            Self::IoError => "io_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PipelineError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Geometry(err) => geometry_kind(err),
            Self::Curvature(err) => match err {
                CurvatureError::InsufficientSamples { .. } => ErrorKind::InsufficientSamples,
                CurvatureError::InvalidConfiguration(_) | CurvatureError::InvalidAttenuation(_) => {
                    ErrorKind::InvalidConfiguration
                }
                CurvatureError::Geometry(err) => geometry_kind(err),
            },
            Self::Format(FormatError::TooManyPoints(_)) => ErrorKind::InvalidConfiguration,
            Self::Format(_) | Self::Read { .. } => ErrorKind::IoError,
            Self::InvalidConfiguration(_) | Self::Metadata { .. } => {
                ErrorKind::InvalidConfiguration
            }
        }
    }
}

fn geometry_kind(err: &GeometryError) -> ErrorKind {
    match err {
        GeometryError::EmptyPath => ErrorKind::EmptyPath,
        GeometryError::InvalidRatio(_) => ErrorKind::InvalidRatio,
        GeometryError::MalformedPath { .. }
        | GeometryError::SvgParse(_)
        | GeometryError::TrackElementNotFound { .. }
        | GeometryError::DuplicateTrackElement { .. }
        | GeometryError::MissingPathData { .. } => ErrorKind::MalformedPath,
    }
}
