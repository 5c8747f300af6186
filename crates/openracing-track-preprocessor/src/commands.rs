//! Subcommand implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use openracing_track_preprocessor::{
    PipelineConfig, TrackPipeline, inspect_artifact, track_report,
};
use tracing::debug;

use crate::output;

/// Options of `trackprep process`.
pub struct ProcessArgs {
    pub step_size_m: f64,
    pub attenuation: f64,
    pub track_id: String,
    pub output: Option<PathBuf>,
}

pub fn process(dir: &Path, args: ProcessArgs, json: bool) -> Result<()> {
    let config = PipelineConfig {
        step_size_m: args.step_size_m,
        attenuation: args.attenuation,
        track_element_id: args.track_id,
    };
    debug!(?config, dir = ?dir, "Processing track directory");

    let pipeline = TrackPipeline::new(config)?;
    let report = pipeline
        .process_directory(dir, args.output.as_deref())
        .with_context(|| format!("Failed to process track directory {}", dir.display()))?;

    output::print_process_report(&report, json);
    Ok(())
}

pub fn info(dir: &Path, track_id: &str, ratio: f64, json: bool) -> Result<()> {
    let report = track_report(dir, track_id, ratio)
        .with_context(|| format!("Failed to read track directory {}", dir.display()))?;
    output::print_track_report(&report, json);
    Ok(())
}

pub fn inspect(file: &Path, json: bool) -> Result<()> {
    let summary = inspect_artifact(file)
        .with_context(|| format!("Failed to inspect {}", file.display()))?;
    output::print_artifact_summary(&summary, json);
    Ok(())
}
