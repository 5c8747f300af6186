//! Lookahead smoothing of a curvature profile.
//!
//! High curvature ahead of a point is projected backwards, attenuated by a
//! constant factor per sample, so that a consumer driving the profile in
//! increasing index order sees an approaching turn before it arrives.
//!
//! For each start index in increasing order, the filter walks backwards
//! (circularly) and raises the preceding point to `a * curvature[j]` while
//! that point is strictly lower. A chain stops at the first point that is
//! already high enough, or after `N` steps. Later spikes overwrite values
//! left by earlier ones when their projection is larger.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CurvatureError, CurvatureResult};
use crate::point::TrackPointSequence;

/// Attenuation the track preprocessor uses unless configured otherwise.
pub const DEFAULT_ATTENUATION: f64 = 0.95;

/// Summary of one smoothing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmoothingReport {
    /// Points whose final curvature is above their input curvature.
    pub points_raised: usize,
    /// Total number of individual raises, counting repeats.
    pub raises: usize,
    /// Longest backward chain started from a single index.
    pub longest_chain: usize,
}

/// Backward-propagating exponential attenuation filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookaheadSmoother {
    attenuation: f64,
}

impl LookaheadSmoother {
    /// Create a smoother with attenuation factor `attenuation`.
    ///
    /// # Errors
    ///
    /// [`CurvatureError::InvalidAttenuation`] unless the factor is finite and
    /// strictly between 0 and 1.
    pub fn new(attenuation: f64) -> CurvatureResult<Self> {
        if !attenuation.is_finite() || attenuation <= 0.0 || attenuation >= 1.0 {
            return Err(CurvatureError::InvalidAttenuation(attenuation));
        }
        Ok(Self { attenuation })
    }

    /// Attenuation factor per sample.
    pub fn attenuation(&self) -> f64 {
        self.attenuation
    }

    /// Smooth `sequence` in place.
    ///
    /// ```
    /// use openracing_track_curvature::{LookaheadSmoother, TrackPoint, TrackPointSequence};
    ///
    /// let mut seq: TrackPointSequence = [0.0, 0.0, 0.0, 1.0, 0.0]
    ///     .into_iter()
    ///     .map(|c| TrackPoint::default().with_curvature(c))
    ///     .collect();
    ///
    /// LookaheadSmoother::new(0.5)?.apply(&mut seq);
    /// let smoothed: Vec<f64> = seq.curvatures().collect();
    /// assert_eq!(smoothed, vec![0.125, 0.25, 0.5, 1.0, 0.0625]);
    /// # Ok::<(), openracing_track_curvature::CurvatureError>(())
    /// ```
    pub fn apply(&self, sequence: &mut TrackPointSequence) -> SmoothingReport {
        let len = sequence.len();
        let mut report = SmoothingReport::default();
        if len < 2 {
            return report;
        }

        let original: Vec<f64> = sequence.curvatures().collect();

        for start in 0..len {
            let chain = self.propagate_from(sequence, start, len);
            report.raises = report.raises.saturating_add(chain);
            report.longest_chain = report.longest_chain.max(chain);
        }

        report.points_raised = sequence
            .curvatures()
            .zip(&original)
            .filter(|(smoothed, raw)| smoothed > *raw)
            .count();

        debug!(
            points = len,
            attenuation = self.attenuation,
            points_raised = report.points_raised,
            longest_chain = report.longest_chain,
            "Lookahead smoothing applied"
        );

        report
    }

    /// Walk backwards from `start`, returning the number of raised points.
    fn propagate_from(&self, sequence: &mut TrackPointSequence, start: usize, cap: usize) -> usize {
        let mut current = start;
        let mut steps = 0;

        while steps < cap {
            let projected = self.attenuation * sequence.curvature_at(current);
            let previous = sequence.prev_index(current);
            let Some(point) = sequence.get_mut(previous) else {
                break;
            };
            if point.curvature >= projected {
                break;
            }
            point.curvature = projected;
            current = previous;
            steps += 1;
        }

        steps
    }
}

impl Default for LookaheadSmoother {
    fn default() -> Self {
        Self {
            attenuation: DEFAULT_ATTENUATION,
        }
    }
}
