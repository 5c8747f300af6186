//! Track Curvature Preprocessor for OpenRacing
//!
//! Batch tool that turns a track outline drawn in SVG into the binary
//! curvature profile the runtime uses for braking cues and camera effects.
//!
//! # Pipeline
//!
//! 1. Load `track.json` ([`TrackMetadata`]) and take the `d` attribute of the
//!    `<path id="track">` element in `track.svg`
//! 2. Parse it into an arc-length parameterized [`TrackCurve`]
//! 3. Sample curvature every `step_size_m` metres over `lap_length_km`
//! 4. Apply lookahead smoothing with the configured attenuation
//! 5. Write `curvature.bin` atomically
//!
//! The core ([`TrackPipeline::run`]) works on a path string and a lap length
//! only; file handling is layered on top in [`TrackPipeline::process_directory`].
//! Every run either produces a complete artifact or fails without writing one.
//!
//! # Example
//!
//! ```
//! use openracing_track_preprocessor::{PipelineConfig, TrackPipeline};
//!
//! let pipeline = TrackPipeline::new(PipelineConfig::default())?;
//! let output = pipeline.run(
//!     "M 100 0 A 100 100 0 0 1 -100 0 A 100 100 0 0 1 100 0 Z",
//!     0.36,
//! )?;
//! assert_eq!(output.points.len(), 360);
//! # Ok::<(), openracing_track_preprocessor::PipelineError>(())
//! ```
//!
//! [`TrackCurve`]: openracing_track_geometry::TrackCurve

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod pipeline;
pub mod prelude;

pub use config::{DEFAULT_STEP_SIZE_M, PipelineConfig, TrackMetadata};
pub use error::{ErrorKind, PipelineError, PipelineResult};
pub use pipeline::{
    ArtifactSummary, METADATA_FILE_NAME, OUTPUT_FILE_NAME, PipelineOutput, ProcessReport,
    SVG_FILE_NAME, TrackPipeline, TrackReport, inspect_artifact, load_track, track_report,
};
