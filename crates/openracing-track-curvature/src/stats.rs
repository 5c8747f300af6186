//! Summary statistics over curvature values.

use serde::{Deserialize, Serialize};

use crate::point::TrackPointSequence;

/// Count, range, mean and population standard deviation of a curvature
/// profile. All fields are zero for an empty profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvatureStats {
    /// Number of values.
    pub count: usize,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl CurvatureStats {
    /// Summarize a sequence of values.
    ///
    /// ```
    /// use openracing_track_curvature::CurvatureStats;
    ///
    /// let stats = CurvatureStats::from_values([1.0, 2.0, 3.0, 4.0]);
    /// assert_eq!(stats.count, 4);
    /// assert_eq!(stats.mean, 2.5);
    /// assert_eq!(stats.max, 4.0);
    /// ```
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Self::default();
        }

        let count = values.len();
        let n = count as f64;
        let (min, max, sum) = values.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), &v| (min.min(v), max.max(v), sum + v),
        );
        let mean = sum / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        Self {
            count,
            min,
            max,
            mean,
            std_dev: variance.sqrt(),
        }
    }

    /// Summarize the curvature of every point in `sequence`.
    pub fn from_sequence(sequence: &TrackPointSequence) -> Self {
        Self::from_values(sequence.curvatures())
    }
}

impl std::fmt::Display for CurvatureStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} points, min {:.6}, max {:.6}, mean {:.6}, std dev {:.6}",
            self.count, self.min, self.max, self.mean, self.std_dev
        )
    }
}
