//! trackprep - Track Curvature Preprocessor CLI
//!
//! Converts a track directory (`track.json` + `track.svg`) into the
//! `curvature.bin` profile consumed at runtime, and inspects the result.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use openracing_track_preprocessor::{DEFAULT_STEP_SIZE_M, PipelineError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "trackprep")]
#[command(about = "Track Curvature Preprocessor - Build curvature profiles from SVG track outlines")]
#[command(version)]
#[command(long_about = "
trackprep samples the outline of a race track at a fixed physical spacing,
computes the heading change at every sample, projects upcoming turns
backwards with an exponential lookahead filter and writes the result as a
compact binary profile.

A track directory contains track.json (metadata, including lap_length_km)
and track.svg (the outline, as the <path id=\"track\"> element).
Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the curvature profile of a track directory
    Process {
        /// Directory containing track.json and track.svg
        dir: PathBuf,

        /// Distance between samples in metres
        #[arg(long, default_value_t = DEFAULT_STEP_SIZE_M)]
        step_size: f64,

        /// Lookahead attenuation per sample, strictly between 0 and 1
        #[arg(long, default_value_t = openracing_track_curvature::DEFAULT_ATTENUATION)]
        attenuation: f64,

        /// Id of the track <path> element in track.svg
        #[arg(long, default_value = openracing_track_geometry::DEFAULT_TRACK_ELEMENT_ID)]
        track_id: String,

        /// Artifact path (defaults to <DIR>/curvature.bin)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show track metadata, outline length and the position at a ratio
    Info {
        /// Directory containing track.json and track.svg
        dir: PathBuf,

        /// Distance ratio to locate, between 0 and 1
        #[arg(long, default_value_t = 0.5)]
        ratio: f64,

        /// Id of the track <path> element in track.svg
        #[arg(long, default_value = openracing_track_geometry::DEFAULT_TRACK_ELEMENT_ID)]
        track_id: String,
    },

    /// Decode a curvature artifact and print its statistics
    Inspect {
        /// Path to a curvature.bin file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let result = execute_command(&cli);

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }

            std::process::exit(exit_code(&e));
        }
    }
}

/// Crates whose events are shown at the `-v` level.
const LOG_TARGETS: [&str; 5] = [
    "trackprep",
    "openracing_track_preprocessor",
    "openracing_track_geometry",
    "openracing_track_curvature",
    "openracing_curvature_format",
];

fn default_log_filter(level: &str) -> String {
    LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Exit code for a failed command.
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<PipelineError>()
        .map_or(1, |e| e.kind().exit_code())
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Process {
            dir,
            step_size,
            attenuation,
            track_id,
            output,
        } => commands::process(
            dir,
            commands::ProcessArgs {
                step_size_m: *step_size,
                attenuation: *attenuation,
                track_id: track_id.clone(),
                output: output.clone(),
            },
            cli.json,
        ),
        Commands::Info {
            dir,
            ratio,
            track_id,
        } => commands::info(dir, track_id, *ratio, cli.json),
        Commands::Inspect { file } => commands::inspect(file, cli.json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use openracing_track_geometry::GeometryError;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_process_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["trackprep", "process", "tracks/monza"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Process {
                dir,
                step_size,
                attenuation,
                track_id,
                output,
            } => {
                assert_eq!(dir, PathBuf::from("tracks/monza"));
                assert_eq!(step_size, 1.0);
                assert_eq!(attenuation, 0.95);
                assert_eq!(track_id, "track");
                assert!(output.is_none());
            }
            _ => return Err("expected process command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_process_overrides() -> TestResult {
        let cli = Cli::try_parse_from([
            "trackprep",
            "process",
            "tracks/spa",
            "--step-size",
            "2.5",
            "--attenuation",
            "0.9",
            "--track-id",
            "circuit",
            "-o",
            "out.bin",
        ])?;
        match cli.command {
            Commands::Process {
                step_size,
                attenuation,
                track_id,
                output,
                ..
            } => {
                assert_eq!(step_size, 2.5);
                assert_eq!(attenuation, 0.9);
                assert_eq!(track_id, "circuit");
                assert_eq!(output, Some(PathBuf::from("out.bin")));
            }
            _ => return Err("expected process command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_global_flags_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["trackprep", "info", "tracks/spa", "--json", "-vv"])?;
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Info { ratio, .. } => assert_eq!(ratio, 0.5),
            _ => return Err("expected info command".into()),
        }
        Ok(())
    }

    #[test]
    fn parse_inspect_requires_file() {
        assert!(Cli::try_parse_from(["trackprep", "inspect"]).is_err());
    }

    #[test]
    fn parse_rejects_non_numeric_step() {
        assert!(
            Cli::try_parse_from(["trackprep", "process", "d", "--step-size", "fast"]).is_err()
        );
    }

    #[test]
    fn default_filter_covers_library_crates() {
        let filter = default_log_filter("debug");
        assert!(filter.starts_with("trackprep=debug,"));
        assert!(filter.contains("openracing_track_geometry=debug"));
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        let err = anyhow::Error::new(PipelineError::from(GeometryError::EmptyPath));
        assert_eq!(exit_code(&err), 2);

        let wrapped =
            anyhow::Error::new(PipelineError::from(GeometryError::InvalidRatio(3.0)))
                .context("while printing track info");
        assert_eq!(exit_code(&wrapped), 3);

        assert_eq!(exit_code(&anyhow::anyhow!("something else")), 1);
    }
}
