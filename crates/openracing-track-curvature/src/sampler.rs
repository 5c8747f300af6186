//! Fixed-spacing curvature sampling of a closed track curve.
//!
//! The curve is sampled at `N = floor(lap_length / step)` evenly spaced
//! distance ratios `i / N`. Curvature at each sample is the magnitude of the
//! heading change between the incoming and outgoing chords, with the first
//! and last samples treated as neighbours.

use std::f64::consts::{PI, TAU};

use openracing_track_geometry::{GeometryResult, TrackCurve};
use tracing::{debug, trace};

use crate::error::{CurvatureError, CurvatureResult};
use crate::point::{TrackPoint, TrackPointSequence};

/// Smallest sample count for which prev/next neighbours are distinct.
pub const MIN_SAMPLES: usize = 3;

/// Chords shorter than this have no usable direction.
const DEGENERATE_CHORD_LENGTH: f64 = 1e-12;

/// A curve that can be addressed by fraction of its arc length.
pub trait ArcLengthCurve {
    /// Total arc length in drawing units.
    fn total_length(&self) -> f64;

    /// Position at fractional arc length `ratio` in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Implementations reject ratios outside `[0, 1]`.
    fn position_at_ratio(&self, ratio: f64) -> GeometryResult<(f64, f64)>;
}

impl ArcLengthCurve for TrackCurve {
    fn total_length(&self) -> f64 {
        TrackCurve::total_length(self)
    }

    fn position_at_ratio(&self, ratio: f64) -> GeometryResult<(f64, f64)> {
        TrackCurve::position_at_ratio(self, ratio)
    }
}

/// Number of samples for a lap of `lap_length_m` sampled every `step_size_m`.
///
/// # Errors
///
/// - [`CurvatureError::InvalidConfiguration`] if either length is not finite
///   and positive, or the count does not fit the artifact's `i32` header
/// - [`CurvatureError::InsufficientSamples`] if fewer than [`MIN_SAMPLES`]
///
/// # Example
///
/// ```
/// use openracing_track_curvature::sample_count;
///
/// assert_eq!(sample_count(5.0, 0.1)?, 50);
/// assert_eq!(sample_count(5_891.0, 1.0)?, 5_891);
/// # Ok::<(), openracing_track_curvature::CurvatureError>(())
/// ```
pub fn sample_count(lap_length_m: f64, step_size_m: f64) -> CurvatureResult<usize> {
    if !lap_length_m.is_finite() || lap_length_m <= 0.0 {
        return Err(CurvatureError::InvalidConfiguration(format!(
            "lap length must be finite and positive, got {lap_length_m}"
        )));
    }
    if !step_size_m.is_finite() || step_size_m <= 0.0 {
        return Err(CurvatureError::InvalidConfiguration(format!(
            "step size must be finite and positive, got {step_size_m}"
        )));
    }

    let count = (lap_length_m / step_size_m).floor();
    if !count.is_finite() || count > f64::from(i32::MAX) {
        return Err(CurvatureError::InvalidConfiguration(format!(
            "{lap_length_m} m sampled every {step_size_m} m exceeds {} points",
            i32::MAX
        )));
    }

    // In range [0, i32::MAX] after the checks above.
    let count = count as usize;
    if count < MIN_SAMPLES {
        return Err(CurvatureError::InsufficientSamples {
            count,
            minimum: MIN_SAMPLES,
        });
    }
    Ok(count)
}

/// Normalize an angle difference into `(-PI, PI]`.
#[inline]
pub fn normalize_angle(delta: f64) -> f64 {
    PI - (PI - delta).rem_euclid(TAU)
}

/// Magnitude of the heading change at `curr` between the chords
/// `prev -> curr` and `curr -> next`.
///
/// Returns 0 when either chord is degenerate (coincident points) or the
/// result is not finite.
pub fn heading_change(prev: (f64, f64), curr: (f64, f64), next: (f64, f64)) -> f64 {
    let v1 = (curr.0 - prev.0, curr.1 - prev.1);
    let v2 = (next.0 - curr.0, next.1 - curr.1);

    if v1.0.hypot(v1.1) <= DEGENERATE_CHORD_LENGTH || v2.0.hypot(v2.1) <= DEGENERATE_CHORD_LENGTH
    {
        return 0.0;
    }

    let angle1 = v1.1.atan2(v1.0);
    let angle2 = v2.1.atan2(v2.0);
    let change = normalize_angle(angle2 - angle1).abs();
    if change.is_finite() { change } else { 0.0 }
}

/// Samples curvature at a fixed physical spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureSampler {
    lap_length_m: f64,
    step_size_m: f64,
    count: usize,
}

impl CurvatureSampler {
    /// Create a sampler for a lap of `lap_length_m` metres and a spacing of
    /// `step_size_m` metres.
    ///
    /// # Errors
    ///
    /// See [`sample_count`].
    pub fn new(lap_length_m: f64, step_size_m: f64) -> CurvatureResult<Self> {
        let count = sample_count(lap_length_m, step_size_m)?;
        Ok(Self {
            lap_length_m,
            step_size_m,
            count,
        })
    }

    /// Number of points [`CurvatureSampler::sample`] produces.
    pub fn sample_count(&self) -> usize {
        self.count
    }

    /// Lap length in metres.
    pub fn lap_length_m(&self) -> f64 {
        self.lap_length_m
    }

    /// Sample spacing in metres.
    pub fn step_size_m(&self) -> f64 {
        self.step_size_m
    }

    /// Distance ratio of sample `index`.
    #[inline]
    pub fn ratio_at(&self, index: usize) -> f64 {
        index as f64 / self.count as f64
    }

    /// Sample `curve` and compute the raw curvature of every point.
    ///
    /// # Errors
    ///
    /// [`CurvatureError::Geometry`] if the curve rejects a position query.
    pub fn sample<C>(&self, curve: &C) -> CurvatureResult<TrackPointSequence>
    where
        C: ArcLengthCurve + ?Sized,
    {
        debug!(
            samples = self.count,
            lap_length_m = self.lap_length_m,
            step_size_m = self.step_size_m,
            curve_length = curve.total_length(),
            "Sampling track curvature"
        );

        let positions = (0..self.count)
            .map(|i| {
                let ratio = self.ratio_at(i);
                curve
                    .position_at_ratio(ratio)
                    .map(|(x, y)| TrackPoint::new(x, y, ratio))
            })
            .collect::<GeometryResult<Vec<_>>>()?;

        let mut sequence = TrackPointSequence::from_points(positions);
        compute_curvature(&mut sequence);

        trace!(samples = sequence.len(), "Curvature sampling complete");
        Ok(sequence)
    }
}

/// Recompute the curvature of every point from its circular neighbours.
pub fn compute_curvature(sequence: &mut TrackPointSequence) {
    let positions: Vec<(f64, f64)> = sequence.iter().map(|p| (p.x, p.y)).collect();
    let position = |index: usize| positions.get(index).copied().unwrap_or_default();

    for index in 0..sequence.len() {
        let curvature = heading_change(
            position(sequence.prev_index(index)),
            position(index),
            position(sequence.next_index(index)),
        );
        if let Some(point) = sequence.get_mut(index) {
            point.curvature = curvature;
        }
    }
}

/// Sample `curve` over a lap of `lap_length_m` every `step_size_m` metres.
///
/// # Errors
///
/// See [`sample_count`] and [`CurvatureSampler::sample`].
pub fn sample_track<C>(
    curve: &C,
    lap_length_m: f64,
    step_size_m: f64,
) -> CurvatureResult<TrackPointSequence>
where
    C: ArcLengthCurve + ?Sized,
{
    CurvatureSampler::new(lap_length_m, step_size_m)?.sample(curve)
}
