//! Sampled track points and the circular sequence that holds them.

use serde::{Deserialize, Serialize};

/// One sample of the curvature profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Position in drawing units.
    pub x: f64,
    /// Position in drawing units.
    pub y: f64,
    /// Fraction of the lap at which the sample was taken, in `[0, 1)`.
    pub distance_ratio: f64,
    /// Heading change at this sample in radians, never negative.
    pub curvature: f64,
}

impl TrackPoint {
    /// Create a point with zero curvature.
    pub const fn new(x: f64, y: f64, distance_ratio: f64) -> Self {
        Self {
            x,
            y,
            distance_ratio,
            curvature: 0.0,
        }
    }

    /// Return a copy with the given curvature.
    pub const fn with_curvature(mut self, curvature: f64) -> Self {
        self.curvature = curvature;
        self
    }
}

/// Ordered, circular sequence of [`TrackPoint`]s covering one lap.
///
/// Index arithmetic wraps: the point after the last is the first and the
/// point before the first is the last.
///
/// ```
/// use openracing_track_curvature::{TrackPoint, TrackPointSequence};
///
/// let seq: TrackPointSequence = (0..4)
///     .map(|i| TrackPoint::new(f64::from(i), 0.0, f64::from(i) / 4.0))
///     .collect();
/// assert_eq!(seq.prev_index(0), 3);
/// assert_eq!(seq.next_index(3), 0);
/// assert_eq!(seq.wrap(9), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackPointSequence {
    points: Vec<TrackPoint>,
}

impl TrackPointSequence {
    /// Wrap a vector of points.
    pub fn from_points(points: Vec<TrackPoint>) -> Self {
        Self { points }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the sequence holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reduce `index` modulo the sequence length. Returns 0 when empty.
    #[inline]
    pub fn wrap(&self, index: usize) -> usize {
        index.checked_rem(self.points.len()).unwrap_or(0)
    }

    /// Index of the point before `index`, wrapping to the last point.
    #[inline]
    pub fn prev_index(&self, index: usize) -> usize {
        match self.wrap(index) {
            0 => self.points.len().saturating_sub(1),
            i => i - 1,
        }
    }

    /// Index of the point after `index`, wrapping to the first point.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        self.wrap(self.wrap(index).saturating_add(1))
    }

    /// Point at `index`, without wrapping.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&TrackPoint> {
        self.points.get(index)
    }

    /// Mutable point at `index`, without wrapping.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut TrackPoint> {
        self.points.get_mut(index)
    }

    /// Curvature at `index`, or 0 when out of range.
    #[inline]
    pub fn curvature_at(&self, index: usize) -> f64 {
        self.points.get(index).map_or(0.0, |p| p.curvature)
    }

    /// Iterate over the points in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TrackPoint> {
        self.points.iter()
    }

    /// Iterate over the curvature values in order.
    pub fn curvatures(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.curvature)
    }

    /// Borrow the points as a slice.
    pub fn as_slice(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Take ownership of the points.
    pub fn into_vec(self) -> Vec<TrackPoint> {
        self.points
    }
}

impl FromIterator<TrackPoint> for TrackPointSequence {
    fn from_iter<I: IntoIterator<Item = TrackPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TrackPointSequence {
    type Item = &'a TrackPoint;
    type IntoIter = std::slice::Iter<'a, TrackPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl AsRef<[TrackPoint]> for TrackPointSequence {
    fn as_ref(&self) -> &[TrackPoint] {
        &self.points
    }
}
