//! Pipeline driver: path description to curvature artifact.
//!
//! [`TrackPipeline::run`] is the pure core. It takes a path description and a
//! lap length and returns the smoothed profile. [`TrackPipeline::process_directory`]
//! adds the file handling around it: `track.json` and `track.svg` in, an
//! atomically written `curvature.bin` out.

use std::fs;
use std::path::{Path, PathBuf};

use openracing_curvature_format::{encoded_len, read_file, write_atomic};
use openracing_track_curvature::{
    CurvatureSampler, CurvatureStats, LookaheadSmoother, SmoothingReport, TrackPointSequence,
};
use openracing_track_geometry::{TrackCurve, TrackInfo, find_path_data};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{PipelineConfig, TrackMetadata, validate_lap_length_km};
use crate::error::{PipelineError, PipelineResult};

/// Metadata file inside a track directory.
pub const METADATA_FILE_NAME: &str = "track.json";
/// Outline file inside a track directory.
pub const SVG_FILE_NAME: &str = "track.svg";
/// Artifact written into a track directory.
pub const OUTPUT_FILE_NAME: &str = "curvature.bin";

/// Result of one in-memory pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Arc length of the outline in drawing units.
    pub curve_length: f64,
    /// Segments in the outline.
    pub segment_count: usize,
    /// Curvature before smoothing.
    pub raw_stats: CurvatureStats,
    /// Curvature after smoothing.
    pub smoothed_stats: CurvatureStats,
    /// What the smoother changed.
    pub smoothing: SmoothingReport,
    /// Smoothed profile, ready for encoding.
    pub points: TrackPointSequence,
}

/// Summary of [`TrackPipeline::process_directory`].
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    /// Loaded `track.json`.
    pub metadata: TrackMetadata,
    /// Artifact location.
    pub output_path: PathBuf,
    /// Artifact size.
    pub bytes_written: usize,
    /// Number of points in the artifact.
    pub sample_count: usize,
    /// Arc length of the outline in drawing units.
    pub curve_length: f64,
    /// Sample spacing in metres.
    pub step_size_m: f64,
    /// Lookahead attenuation per sample.
    pub attenuation: f64,
    /// Curvature before smoothing.
    pub raw_stats: CurvatureStats,
    /// Curvature after smoothing.
    pub smoothed_stats: CurvatureStats,
    /// What the smoother changed.
    pub smoothing: SmoothingReport,
}

/// Metadata plus the outline summary at one distance ratio.
#[derive(Debug, Clone, Serialize)]
pub struct TrackReport {
    /// Loaded `track.json`.
    pub metadata: TrackMetadata,
    /// Outline length and position at the requested ratio.
    pub info: TrackInfo,
    /// Subpaths in the outline; more than one usually means an authoring error.
    pub subpath_count: usize,
}

/// Summary of a decoded artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ArtifactSummary {
    /// Artifact location.
    pub path: PathBuf,
    /// Number of points.
    pub point_count: usize,
    /// File size.
    pub bytes: usize,
    /// Curvature statistics.
    pub stats: CurvatureStats,
}

/// Configured sampler and smoother.
#[derive(Debug, Clone)]
pub struct TrackPipeline {
    config: PipelineConfig,
    smoother: LookaheadSmoother,
}

impl TrackPipeline {
    /// Validate `config` and build a pipeline.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidConfiguration`] for out-of-range parameters.
    pub fn new(config: PipelineConfig) -> PipelineResult<Self> {
        config.validate()?;
        let smoother = LookaheadSmoother::new(config.attenuation)?;
        Ok(Self { config, smoother })
    }

    /// Parameters of this pipeline.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Parse `path_data` and produce the smoothed profile of a lap of
    /// `lap_length_km`.
    ///
    /// ```
    /// use openracing_track_preprocessor::{PipelineConfig, TrackPipeline};
    ///
    /// let pipeline = TrackPipeline::new(PipelineConfig::default())?;
    /// let output = pipeline.run("M0 0 h100 v100 h-100 z", 0.4)?;
    /// assert_eq!(output.points.len(), 400);
    /// assert!(output.smoothing.points_raised > 0);
    /// # Ok::<(), openracing_track_preprocessor::PipelineError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Any geometry, configuration or sampling error; nothing is produced on
    /// failure.
    pub fn run(&self, path_data: &str, lap_length_km: f64) -> PipelineResult<PipelineOutput> {
        validate_lap_length_km(lap_length_km)?;
        let curve = TrackCurve::parse(path_data)?;
        self.run_curve(&curve, lap_length_km)
    }

    /// Like [`TrackPipeline::run`] for an already parsed curve.
    ///
    /// # Errors
    ///
    /// Any configuration or sampling error.
    pub fn run_curve(
        &self,
        curve: &TrackCurve,
        lap_length_km: f64,
    ) -> PipelineResult<PipelineOutput> {
        validate_lap_length_km(lap_length_km)?;

        let sampler = CurvatureSampler::new(lap_length_km * 1000.0, self.config.step_size_m)?;
        let mut points = sampler.sample(curve)?;
        let raw_stats = CurvatureStats::from_sequence(&points);

        let smoothing = self.smoother.apply(&mut points);
        let smoothed_stats = CurvatureStats::from_sequence(&points);

        info!(
            samples = points.len(),
            curve_length = curve.total_length(),
            max_curvature = raw_stats.max,
            points_raised = smoothing.points_raised,
            "Curvature profile computed"
        );

        Ok(PipelineOutput {
            curve_length: curve.total_length(),
            segment_count: curve.segment_count(),
            raw_stats,
            smoothed_stats,
            smoothing,
            points,
        })
    }

    /// Process the track in `dir` and write its artifact.
    ///
    /// The artifact goes to `output`, or `dir/curvature.bin` when `None`.
    ///
    /// # Errors
    ///
    /// Any load, pipeline or write error. No artifact is written on failure
    /// and an existing one is left in place.
    pub fn process_directory(
        &self,
        dir: &Path,
        output: Option<&Path>,
    ) -> PipelineResult<ProcessReport> {
        let (metadata, path_data) = load_track(dir, &self.config.track_element_id)?;
        let result = self.run(&path_data, metadata.lap_length_km)?;

        let output_path = output.map_or_else(|| dir.join(OUTPUT_FILE_NAME), Path::to_path_buf);
        write_atomic(&output_path, result.points.as_slice())?;

        info!(
            track = %metadata.id,
            path = ?output_path,
            points = result.points.len(),
            "Curvature artifact written"
        );

        Ok(ProcessReport {
            bytes_written: encoded_len(result.points.len()),
            sample_count: result.points.len(),
            curve_length: result.curve_length,
            step_size_m: self.config.step_size_m,
            attenuation: self.config.attenuation,
            raw_stats: result.raw_stats,
            smoothed_stats: result.smoothed_stats,
            smoothing: result.smoothing,
            output_path,
            metadata,
        })
    }
}

/// Load `track.json` and the track path description from `dir`.
///
/// # Errors
///
/// Read, metadata or SVG extraction errors.
pub fn load_track(dir: &Path, element_id: &str) -> PipelineResult<(TrackMetadata, String)> {
    let metadata = TrackMetadata::load(&dir.join(METADATA_FILE_NAME))?;
    log_metadata(&metadata);

    let svg_path = dir.join(SVG_FILE_NAME);
    debug!(path = ?svg_path, element_id, "Reading track outline");
    let svg = fs::read_to_string(&svg_path).map_err(|source| PipelineError::Read {
        path: svg_path.clone(),
        source,
    })?;
    let path_data = find_path_data(&svg, element_id)?;

    Ok((metadata, path_data))
}

fn log_metadata(metadata: &TrackMetadata) {
    info!(
        id = %metadata.id,
        name = %metadata.name,
        laps = metadata.laps,
        lap_length_km = metadata.lap_length_km,
        svg_start_offset = metadata.svg_start_offset,
        "Loaded track metadata"
    );
    if let Some(description) = &metadata.description {
        debug!(description = %description, "Track description");
    }
    if metadata.laps == 0 {
        warn!(id = %metadata.id, "Track metadata declares zero laps");
    }
}

/// Load the track in `dir` and summarize its outline at `ratio`.
///
/// # Errors
///
/// Load errors, geometry errors, or [`PipelineError::Geometry`] with
/// `InvalidRatio` for a ratio outside `[0, 1]`.
pub fn track_report(dir: &Path, element_id: &str, ratio: f64) -> PipelineResult<TrackReport> {
    let (metadata, path_data) = load_track(dir, element_id)?;
    let curve = TrackCurve::parse(&path_data)?;
    let info = curve.track_info(ratio)?;
    Ok(TrackReport {
        metadata,
        info,
        subpath_count: curve.subpath_count(),
    })
}

/// Decode the artifact at `path` and summarize it.
///
/// # Errors
///
/// [`PipelineError::Format`] if the file cannot be read or decoded.
pub fn inspect_artifact(path: &Path) -> PipelineResult<ArtifactSummary> {
    let records = read_file(path)?;
    let stats = CurvatureStats::from_values(records.iter().map(|r| f64::from(r.curvature)));
    Ok(ArtifactSummary {
        path: path.to_path_buf(),
        point_count: records.len(),
        bytes: encoded_len(records.len()),
        stats,
    })
}
