//! Prelude for openracing-track-preprocessor
//!
//! ```
//! use openracing_track_preprocessor::prelude::*;
//!
//! let pipeline = TrackPipeline::new(PipelineConfig::default())?;
//! assert_eq!(pipeline.config().attenuation, 0.95);
//! # Ok::<(), PipelineError>(())
//! ```

pub use crate::config::{PipelineConfig, TrackMetadata};
pub use crate::error::{ErrorKind, PipelineError, PipelineResult};
pub use crate::pipeline::{
    ArtifactSummary, PipelineOutput, ProcessReport, TrackPipeline, TrackReport,
    inspect_artifact, load_track, track_report,
};
