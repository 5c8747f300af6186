//! Property-based tests for track curves.
//!
//! These tests check the distance parameterization on shapes whose arc length
//! and positions are known analytically.

use openracing_track_geometry::prelude::*;
use quickcheck_macros::quickcheck;

const CIRCLE: &str = "M 100 0 A 100 100 0 0 1 -100 0 A 100 100 0 0 1 100 0 Z";
const SQUARE: &str = "M0 0 L100 0 L100 100 L0 100 Z";

fn must<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("unexpected error: {:?}", e),
    }
}

fn sanitize_ratio(v: f64) -> f64 {
    if v.is_finite() { v.abs().fract() } else { 0.5 }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn circle_positions_stay_on_radius(ratio in 0.0f64..=1.0f64) {
            let curve = must(TrackCurve::parse(CIRCLE));
            let point = must(curve.point_at_ratio(ratio));
            prop_assert!((point.length() - 100.0).abs() < 1e-6);
        }

        #[test]
        fn circle_angle_is_proportional_to_ratio(ratio in 0.0f64..1.0f64) {
            let curve = must(TrackCurve::parse(CIRCLE));
            let point = must(curve.point_at_ratio(ratio));
            let expected = ratio * std::f64::consts::TAU;
            let mut angle = point.angle();
            if angle < 0.0 {
                angle += std::f64::consts::TAU;
            }
            // Wrap-around near ratio 0 and 1.
            let diff = (angle - expected).abs();
            let diff = diff.min(std::f64::consts::TAU - diff);
            prop_assert!(diff < 1e-6, "ratio {} angle {} expected {}", ratio, angle, expected);
        }

        #[test]
        fn square_positions_lie_on_perimeter(ratio in 0.0f64..=1.0f64) {
            let curve = must(TrackCurve::parse(SQUARE));
            let point = must(curve.point_at_ratio(ratio));
            let on_vertical = point.x.abs() < 1e-6 || (point.x - 100.0).abs() < 1e-6;
            let on_horizontal = point.y.abs() < 1e-6 || (point.y - 100.0).abs() < 1e-6;
            prop_assert!(on_vertical || on_horizontal);
        }

        #[test]
        fn out_of_range_ratio_is_rejected(ratio in 1.0001f64..100.0f64) {
            let curve = must(TrackCurve::parse(SQUARE));
            prop_assert!(
                matches!(curve.position_at_ratio(ratio), Err(GeometryError::InvalidRatio(_))),
                "ratio {} was accepted",
                ratio
            );
            prop_assert!(
                matches!(curve.position_at_ratio(-ratio), Err(GeometryError::InvalidRatio(_))),
                "ratio {} was accepted",
                -ratio
            );
        }

        #[test]
        fn distance_and_ratio_queries_agree(ratio in 0.0f64..=1.0f64) {
            let curve = must(TrackCurve::parse(CIRCLE));
            let by_ratio = must(curve.point_at_ratio(ratio));
            let by_distance = must(curve.position_at_distance(ratio * curve.total_length()));
            prop_assert!(by_ratio.distance_to(by_distance) < 1e-9);
        }
    }
}

fn circle_path(center_x: f64, center_y: f64, radius: f64) -> String {
    let right = center_x + radius;
    let left = center_x - radius;
    format!(
        "M {right} {center_y} A {radius} {radius} 0 0 1 {left} {center_y} \
         A {radius} {radius} 0 0 1 {right} {center_y} Z"
    )
}

#[quickcheck]
fn prop_closed_track_endpoints_coincide(radius: u8, center_x: i8, center_y: i8) -> bool {
    let radius = f64::from(radius) + 1.0;
    let data = circle_path(f64::from(center_x), f64::from(center_y), radius);
    let curve = must(TrackCurve::parse(&data));
    let start = must(curve.point_at_ratio(0.0));
    let end = must(curve.point_at_ratio(1.0));
    let circumference = std::f64::consts::TAU * radius;
    curve.is_closed()
        && start.distance_to(end) < 1e-9 * radius
        && (curve.total_length() - circumference).abs() < 1e-6 * radius
}

#[quickcheck]
fn prop_reparse_is_deterministic(ratio: f64) -> bool {
    let ratio = sanitize_ratio(ratio);
    let first = must(TrackCurve::parse(CIRCLE));
    let second = must(TrackCurve::parse(CIRCLE));
    first.total_length().to_bits() == second.total_length().to_bits()
        && must(first.position_at_ratio(ratio)) == must(second.position_at_ratio(ratio))
}

#[quickcheck]
fn prop_scaled_square_scales_length(scale: u16) -> bool {
    let side = f64::from(scale % 1000 + 1);
    let data = format!("M0 0 h{side} v{side} h-{side} z");
    let curve = must(TrackCurve::parse(&data));
    (curve.total_length() - 4.0 * side).abs() < 1e-9 * side
}

#[test]
fn test_circle_length_matches_circumference() {
    let curve = must(TrackCurve::parse(CIRCLE));
    let expected = std::f64::consts::TAU * 100.0;
    assert!((curve.total_length() - expected).abs() < 1e-6);
}
