//! End-to-end sampling scenarios on parsed track outlines.

use std::f64::consts::{FRAC_PI_2, TAU};

use approx::assert_abs_diff_eq;
use openracing_track_curvature::prelude::*;
use openracing_track_geometry::TrackCurve;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const CIRCLE: &str = "M 100 0 A 100 100 0 0 1 -100 0 A 100 100 0 0 1 100 0 Z";
const SQUARE: &str = "M0 0 L100 0 L100 100 L0 100 Z";
/// Two straights meeting at one right-angle corner at (100, 100), closed by a
/// three-quarter arc that joins both straights tangentially.
const TEARDROP: &str = "M 0 100 L 100 100 L 100 0 A 100 100 0 1 0 0 100 Z";

fn argmax(values: &[f64]) -> usize {
    values
        .iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_value), (i, &v)| {
            if v > best_value { (i, v) } else { (best, best_value) }
        })
        .0
}

#[test]
fn circle_has_uniform_curvature() -> TestResult {
    let curve = TrackCurve::parse(CIRCLE)?;
    let profile = sample_track(&curve, 360.0, 1.0)?;
    assert_eq!(profile.len(), 360);

    let stats = CurvatureStats::from_sequence(&profile);
    assert_abs_diff_eq!(stats.mean, TAU / 360.0, epsilon = 1e-6);
    assert!(stats.std_dev < 1e-4, "std dev {}", stats.std_dev);
    Ok(())
}

#[test]
fn square_has_four_corner_spikes() -> TestResult {
    let curve = TrackCurve::parse(SQUARE)?;
    let profile = sample_track(&curve, 400.0, 1.0)?;
    assert_eq!(profile.len(), 400);

    for (i, curvature) in profile.curvatures().enumerate() {
        if i % 100 == 0 {
            assert_abs_diff_eq!(curvature, FRAC_PI_2, epsilon = 1e-6);
        } else {
            assert!(curvature < 1e-6, "index {i} curvature {curvature}");
        }
    }
    Ok(())
}

#[test]
fn single_corner_dominates_before_smoothing() -> TestResult {
    let curve = TrackCurve::parse(TEARDROP)?;
    assert_abs_diff_eq!(
        curve.total_length(),
        200.0 + 0.75 * TAU * 100.0,
        epsilon = 1e-6
    );

    let profile = sample_track(&curve, 672.0, 1.0)?;
    let values: Vec<f64> = profile.curvatures().collect();
    let peak = argmax(&values);

    // The corner sits 100 units into a ~671.2 unit loop.
    assert!((98..=102).contains(&peak), "peak at {peak}");
    assert!(values.get(peak).copied().unwrap_or_default() > 0.7);

    for (i, &curvature) in values.iter().enumerate() {
        if i.abs_diff(peak) > 2 {
            assert!(curvature < 0.05, "index {i} curvature {curvature}");
        }
    }
    Ok(())
}

#[test]
fn smoothing_announces_the_corner() -> TestResult {
    let curve = TrackCurve::parse(TEARDROP)?;
    let raw = sample_track(&curve, 672.0, 1.0)?;
    let mut smoothed = raw.clone();
    let report = LookaheadSmoother::new(DEFAULT_ATTENUATION)?.apply(&mut smoothed);

    let peak = argmax(&raw.curvatures().collect::<Vec<_>>());
    let peak_value = raw.curvature_at(peak);

    assert!(report.points_raised > 0);
    assert_abs_diff_eq!(smoothed.curvature_at(peak), peak_value);
    // Ten samples before the corner the warning is 0.95^10 of the spike.
    let ahead = peak - 10;
    assert!(smoothed.curvature_at(ahead) >= 0.95f64.powi(10) * peak_value - 1e-12);
    assert!(raw.curvature_at(ahead) < 0.05);
    Ok(())
}

#[test]
fn too_few_samples_is_rejected() -> TestResult {
    let curve = TrackCurve::parse(SQUARE)?;
    let result = sample_track(&curve, 2.0, 1.0);
    assert!(matches!(
        result,
        Err(CurvatureError::InsufficientSamples { count: 2, .. })
    ));
    Ok(())
}

#[test]
fn boundary_neighbours_wrap() -> TestResult {
    let curve = TrackCurve::parse(SQUARE)?;
    let profile = sample_track(&curve, 4.0, 1.0)?;
    // Samples land exactly on the four corners.
    assert_eq!(profile.len(), 4);
    for curvature in profile.curvatures() {
        assert_abs_diff_eq!(curvature, FRAC_PI_2, epsilon = 1e-9);
    }
    assert_eq!(profile.prev_index(0), 3);
    assert_eq!(profile.next_index(3), 0);
    Ok(())
}
