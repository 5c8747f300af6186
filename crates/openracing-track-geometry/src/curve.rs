//! Arc-length addressable track curve.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{GeometryError, GeometryResult};
use crate::path_data::parse_path_data;
use crate::point::Point;
use crate::segment::Segment;

/// Segments shorter than this are dropped when a curve is built.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Tolerance for [`TrackCurve::is_closed`].
pub const CLOSURE_TOLERANCE: f64 = 1e-6;

/// A segment together with where it sits along the curve.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Span {
    segment: Segment,
    /// Arc length from the curve start to the segment start.
    offset: f64,
    /// Arc length of the segment itself.
    length: f64,
}

impl Span {
    #[inline]
    fn end_offset(&self) -> f64 {
        self.offset + self.length
    }
}

/// A track outline parsed from SVG path data, addressable by arc length.
///
/// Segment lengths are integrated once at construction. The total length is
/// always strictly positive, and every ratio in `[0, 1]` resolves to exactly
/// one segment and parameter: a distance that falls exactly on a boundary
/// between two segments belongs to the earlier one (at its `t = 1`).
///
/// # Example
///
/// ```
/// use openracing_track_geometry::TrackCurve;
///
/// let curve: TrackCurve = "M 100 0 A 100 100 0 0 1 -100 0 A 100 100 0 0 1 100 0 Z".parse()?;
/// let circumference = 2.0 * std::f64::consts::PI * 100.0;
/// assert!((curve.total_length() - circumference).abs() < 1e-6);
///
/// let (x, y) = curve.position_at_ratio(0.25)?;
/// assert!(x.abs() < 1e-6 && (y - 100.0).abs() < 1e-6);
/// # Ok::<(), openracing_track_geometry::GeometryError>(())
/// ```
#[derive(Clone, Debug)]
pub struct TrackCurve {
    spans: Vec<Span>,
    total_length: f64,
    subpaths: usize,
}

impl TrackCurve {
    /// Parse SVG path data into a curve.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::MalformedPath`] if the data cannot be tokenized
    /// - [`GeometryError::EmptyPath`] if no segment has a non-zero length
    pub fn parse(path_data: &str) -> GeometryResult<Self> {
        let parsed = parse_path_data(path_data)?;
        if parsed.subpaths > 1 {
            warn!(
                subpaths = parsed.subpaths,
                "Path data has several subpaths; concatenating their segments"
            );
        }
        let mut curve = Self::from_segments(parsed.segments)?;
        curve.subpaths = parsed.subpaths.max(1);
        Ok(curve)
    }

    /// Build a curve from already constructed segments.
    ///
    /// Segments shorter than [`MIN_SEGMENT_LENGTH`] are discarded.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::MalformedPath`] if a segment's length is not finite
    /// - [`GeometryError::EmptyPath`] if nothing with a length remains
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> GeometryResult<Self> {
        let mut spans = Vec::new();
        let mut offset: f64 = 0.0;

        for (index, segment) in segments.into_iter().enumerate() {
            let length = segment.length();
            if !length.is_finite() {
                return Err(GeometryError::malformed(
                    0,
                    format!(
                        "{} segment {index} has a non-finite length ({length})",
                        segment.kind()
                    ),
                ));
            }
            if length < MIN_SEGMENT_LENGTH {
                trace!(index, kind = segment.kind(), length, "Dropping zero-length segment");
                continue;
            }
            spans.push(Span {
                segment,
                offset,
                length,
            });
            offset += length;
        }

        if !offset.is_finite() {
            return Err(GeometryError::malformed(
                0,
                format!("total path length overflows ({offset})"),
            ));
        }
        if spans.is_empty() || offset <= 0.0 {
            return Err(GeometryError::EmptyPath);
        }

        debug!(
            segments = spans.len(),
            total_length = offset,
            "Built track curve"
        );

        Ok(Self {
            spans,
            total_length: offset,
            subpaths: 1,
        })
    }

    /// Total arc length of the curve, computed once at construction.
    #[inline]
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    /// Position at fractional distance `ratio` along the curve.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidRatio`] unless `0 <= ratio <= 1`.
    pub fn position_at_ratio(&self, ratio: f64) -> GeometryResult<(f64, f64)> {
        self.point_at_ratio(ratio).map(Point::to_tuple)
    }

    /// Like [`TrackCurve::position_at_ratio`], returning a [`Point`].
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidRatio`] unless `0 <= ratio <= 1`.
    pub fn point_at_ratio(&self, ratio: f64) -> GeometryResult<Point> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(GeometryError::InvalidRatio(ratio));
        }
        Ok(self.point_at(ratio * self.total_length))
    }

    /// Position at absolute arc-length `distance` from the curve start.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidRatio`] (carrying `distance / total_length`)
    /// unless `0 <= distance <= total_length`.
    pub fn position_at_distance(&self, distance: f64) -> GeometryResult<Point> {
        if !(0.0..=self.total_length).contains(&distance) {
            return Err(GeometryError::InvalidRatio(distance / self.total_length));
        }
        Ok(self.point_at(distance))
    }

    fn point_at(&self, distance: f64) -> Point {
        match self.locate(distance) {
            Some(span) => {
                let residual = (distance - span.offset).clamp(0.0, span.length);
                let t = span.segment.t_at_length(residual, span.length);
                span.segment.point(t)
            }
            None => self.end_point(),
        }
    }

    /// First span whose end offset reaches `distance`.
    fn locate(&self, distance: f64) -> Option<&Span> {
        self.spans
            .iter()
            .find(|span| distance <= span.end_offset())
            .or_else(|| self.spans.last())
    }

    /// Segments making up the curve, in drawing order.
    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Segment> + '_ {
        self.spans.iter().map(|span| &span.segment)
    }

    /// Number of segments with a non-zero length.
    pub fn segment_count(&self) -> usize {
        self.spans.len()
    }

    /// Number of subpaths in the source path data.
    pub fn subpath_count(&self) -> usize {
        self.subpaths
    }

    /// Arc length of each segment, in drawing order.
    pub fn segment_lengths(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.spans.iter().map(|span| span.length)
    }

    /// Start point of the first segment.
    pub fn start_point(&self) -> Point {
        self.spans
            .first()
            .map(|span| span.segment.start())
            .unwrap_or_default()
    }

    /// End point of the last segment.
    pub fn end_point(&self) -> Point {
        self.spans
            .last()
            .map(|span| span.segment.end())
            .unwrap_or_default()
    }

    /// True when the outline ends where it starts.
    pub fn is_closed(&self) -> bool {
        self.start_point().distance_to(self.end_point()) <= CLOSURE_TOLERANCE
    }

    /// Summary of the curve and the position at `ratio`.
    ///
    /// # Errors
    ///
    /// [`GeometryError::InvalidRatio`] unless `0 <= ratio <= 1`.
    pub fn track_info(&self, ratio: f64) -> GeometryResult<TrackInfo> {
        let point = self.point_at_ratio(ratio)?;
        Ok(TrackInfo {
            total_length: self.total_length,
            segment_count: self.spans.len(),
            closed: self.is_closed(),
            ratio,
            distance: ratio * self.total_length,
            x: point.x,
            y: point.y,
        })
    }
}

impl FromStr for TrackCurve {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Summary of a track curve with one sampled position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Total arc length in drawing units.
    pub total_length: f64,
    /// Number of segments with a non-zero length.
    pub segment_count: usize,
    /// Whether the outline ends where it starts.
    pub closed: bool,
    /// Requested distance ratio.
    pub ratio: f64,
    /// `ratio * total_length`.
    pub distance: f64,
    /// X coordinate at `ratio`.
    pub x: f64,
    /// Y coordinate at `ratio`.
    pub y: f64,
}
