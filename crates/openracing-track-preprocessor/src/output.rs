//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use openracing_track_curvature::CurvatureStats;
use openracing_track_preprocessor::{
    ArtifactSummary, PipelineError, ProcessReport, TrackMetadata, TrackReport,
};
use serde_json::json;

fn print_json(value: &serde_json::Value, what: &str) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format {} as JSON: {}", what, e),
    }
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error),
            "causes": error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        }
    });
    print_json(&error_json, "error");
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    // Print error chain if available
    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    error
        .downcast_ref::<PipelineError>()
        .map_or("error", |e| e.kind().as_str())
}

fn print_metadata_human(metadata: &TrackMetadata) {
    println!("{} {}", "Track:".bold(), metadata.name.bold());
    println!("  ID: {}", metadata.id.dimmed());
    if let Some(description) = &metadata.description {
        println!("  Description: {}", description);
    }
    println!("  Laps: {}", metadata.laps);
    println!("  Lap Length: {} km", metadata.lap_length_km);
    println!("  SVG Start Offset: {}", metadata.svg_start_offset);
}

fn print_stats_human(title: &str, stats: &CurvatureStats) {
    println!("{}", title.bold());
    println!("  Min: {:.4}", stats.min);
    println!("  Max: {:.4}", stats.max);
    println!("  Average: {:.4}", stats.mean);
    println!("  Std Dev: {:.4}", stats.std_dev);
    println!("  Total Points: {}", stats.count);
}

/// Print the result of `trackprep process`
pub fn print_process_report(report: &ProcessReport, json: bool) {
    if json {
        print_json(&json!({ "success": true, "report": report }), "process report");
        return;
    }

    print_metadata_human(&report.metadata);
    println!("  Outline Length: {:.2}", report.curve_length);
    println!(
        "  Sampling: {} points every {} m, attenuation {}",
        report.sample_count, report.step_size_m, report.attenuation
    );
    println!(
        "  Smoothing: {} points raised, longest chain {}",
        report.smoothing.points_raised, report.smoothing.longest_chain
    );
    print_stats_human("Curvature Statistics:", &report.smoothed_stats);
    println!(
        "{} {} ({} bytes)",
        "✓ Wrote".green(),
        report.output_path.display(),
        report.bytes_written
    );
}

/// Print the result of `trackprep info`
pub fn print_track_report(report: &TrackReport, json: bool) {
    if json {
        print_json(&json!({ "success": true, "track": report }), "track report");
        return;
    }

    print_metadata_human(&report.metadata);
    let info = &report.info;
    println!("  Total Length: {:.2}", info.total_length);
    println!(
        "  Segments: {} ({})",
        info.segment_count,
        if info.closed { "closed".green() } else { "open".yellow() }
    );
    if report.subpath_count > 1 {
        println!(
            "  {} outline has {} subpaths",
            "Warning:".yellow(),
            report.subpath_count
        );
    }
    println!(
        "  Position at distance {:.2}: ({:.2}, {:.2})",
        info.distance, info.x, info.y
    );
}

/// Print the result of `trackprep inspect`
pub fn print_artifact_summary(summary: &ArtifactSummary, json: bool) {
    if json {
        print_json(&json!({ "success": true, "artifact": summary }), "artifact summary");
        return;
    }

    println!("{} {}", "Artifact:".bold(), summary.path.display());
    println!("  Size: {} bytes", summary.bytes);
    print_stats_human("Curvature Statistics:", &summary.stats);
}
