//! Path segments: lines, Bezier curves and elliptical arcs.
//!
//! Every segment is parameterized over `t ∈ [0, 1]` and can report its point,
//! first derivative and arc length at `t`. The native parameter does not move
//! at constant speed along curved segments; [`Segment::t_at_length`] inverts
//! the arc-length integral to get uniform spacing.

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::arc_length::{
    DEFAULT_LENGTH_TOLERANCE, DEFAULT_QUADRATURE_TOLERANCE, MAX_BISECTION_ITERATIONS, bisect,
    integrate,
};
use crate::point::Point;

/// Arcs whose smaller radius exceeds the chord by this factor are drawn as the
/// chord. Their sagitta is below a millionth of the chord length.
pub const FLAT_ARC_RADIUS_RATIO: f64 = 1e6;

/// Straight line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
}

impl Line {
    /// Create a line between two points.
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Quadratic Bezier curve: B(t) = (1-t)²P₀ + 2(1-t)tP₁ + t²P₂.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuadraticBezier {
    /// Start point P₀.
    pub start: Point,
    /// Control point P₁.
    pub control: Point,
    /// End point P₂.
    pub end: Point,
}

impl QuadraticBezier {
    /// Create a quadratic Bezier curve.
    pub const fn new(start: Point, control: Point, end: Point) -> Self {
        Self {
            start,
            control,
            end,
        }
    }

    #[inline]
    fn point(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        self.start * (mt * mt) + self.control * (2.0 * mt * t) + self.end * (t * t)
    }

    /// B'(t) = 2[(1-t)(P₁-P₀) + t(P₂-P₁)]
    #[inline]
    fn derivative(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        ((self.control - self.start) * mt + (self.end - self.control) * t) * 2.0
    }
}

/// Cubic Bezier curve: B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    /// Start point P₀.
    pub start: Point,
    /// First control point P₁.
    pub control1: Point,
    /// Second control point P₂.
    pub control2: Point,
    /// End point P₃.
    pub end: Point,
}

impl CubicBezier {
    /// Create a cubic Bezier curve.
    pub const fn new(start: Point, control1: Point, control2: Point, end: Point) -> Self {
        Self {
            start,
            control1,
            control2,
            end,
        }
    }

    #[inline]
    fn point(&self, t: f64) -> Point {
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        self.start * mt3
            + self.control1 * (3.0 * mt2 * t)
            + self.control2 * (3.0 * mt * t2)
            + self.end * t3
    }

    /// The derivative of a cubic Bezier is a quadratic Bezier:
    /// B'(t) = 3[(1-t)²(P₁-P₀) + 2(1-t)t(P₂-P₁) + t²(P₃-P₂)]
    #[inline]
    fn derivative(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let d0 = self.control1 - self.start;
        let d1 = self.control2 - self.control1;
        let d2 = self.end - self.control2;

        (d0 * (mt * mt) + d1 * (2.0 * mt * t) + d2 * (t * t)) * 3.0
    }
}

/// Elliptical arc in center parameterization.
///
/// Built from the SVG endpoint form with [`EllipticalArc::from_endpoints`].
/// The arc sweeps `theta_start .. theta_start + theta_sweep` on an ellipse
/// with radii `radii` rotated by `rotation` radians around `center`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EllipticalArc {
    /// Start point, returned exactly at `t = 0`.
    pub start: Point,
    /// End point, returned exactly at `t = 1`.
    pub end: Point,
    /// Ellipse center.
    pub center: Point,
    /// Radii (x: semi-axis along the rotated x axis, y: the other one).
    pub radii: Point,
    /// Rotation of the ellipse x axis, in radians.
    pub rotation: f64,
    /// Angle of the start point on the unrotated ellipse.
    pub theta_start: f64,
    /// Signed angular extent; positive sweeps towards increasing angle.
    pub theta_sweep: f64,
}

impl EllipticalArc {
    /// Convert an SVG endpoint arc into a segment.
    ///
    /// Follows the SVG implementation notes for endpoint to center conversion:
    /// radii too small to span the endpoints are scaled up, and an arc whose
    /// endpoints coincide is omitted (`None`). A zero radius, or one more than
    /// [`FLAT_ARC_RADIUS_RATIO`] times the chord, degrades to a straight
    /// [`Line`], as does any arc whose center parameterization is not finite.
    pub fn from_endpoints(
        start: Point,
        radii: Point,
        x_axis_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        end: Point,
    ) -> Option<Segment> {
        if start.distance_to(end) <= f64::EPSILON {
            return None;
        }

        let chord = Segment::Line(Line::new(start, end));
        let mut rx = radii.x.abs();
        let mut ry = radii.y.abs();
        if rx <= f64::EPSILON || ry <= f64::EPSILON {
            return Some(chord);
        }
        if rx.min(ry) > FLAT_ARC_RADIUS_RATIO * start.distance_to(end) {
            return Some(chord);
        }

        let rotation = x_axis_rotation_deg.rem_euclid(360.0).to_radians();
        let (sin_phi, cos_phi) = rotation.sin_cos();

        let half_dx = 0.5 * (start.x - end.x);
        let half_dy = 0.5 * (start.y - end.y);
        let x1p = cos_phi * half_dx + sin_phi * half_dy;
        let y1p = -sin_phi * half_dx + cos_phi * half_dy;

        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let scale = lambda.sqrt();
            rx *= scale;
            ry *= scale;
        }

        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let numerator = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
        let denominator = rx2 * y1p * y1p + ry2 * x1p * x1p;
        let mut coefficient = if denominator > 0.0 {
            (numerator / denominator).max(0.0).sqrt()
        } else {
            0.0
        };
        if large_arc == sweep {
            coefficient = -coefficient;
        }

        let cxp = coefficient * (rx * y1p / ry);
        let cyp = coefficient * (-ry * x1p / rx);

        let center = Point::new(
            cos_phi * cxp - sin_phi * cyp + 0.5 * (start.x + end.x),
            sin_phi * cxp + cos_phi * cyp + 0.5 * (start.y + end.y),
        );

        let u = Point::new((x1p - cxp) / rx, (y1p - cyp) / ry);
        let v = Point::new((-x1p - cxp) / rx, (-y1p - cyp) / ry);
        let theta_start = signed_angle(Point::new(1.0, 0.0), u);
        let mut theta_sweep = signed_angle(u, v);

        if !sweep && theta_sweep > 0.0 {
            theta_sweep -= TAU;
        } else if sweep && theta_sweep < 0.0 {
            theta_sweep += TAU;
        }

        let finite = [center.x, center.y, rx, ry, theta_start, theta_sweep]
            .iter()
            .all(|value| value.is_finite());
        if !finite {
            return Some(chord);
        }

        Some(Segment::Arc(EllipticalArc {
            start,
            end,
            center,
            radii: Point::new(rx, ry),
            rotation,
            theta_start,
            theta_sweep,
        }))
    }

    #[inline]
    fn point(&self, t: f64) -> Point {
        if t <= 0.0 {
            return self.start;
        }
        if t >= 1.0 {
            return self.end;
        }

        let theta = self.theta_start + self.theta_sweep * t;
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_phi, cos_phi) = self.rotation.sin_cos();
        let ex = self.radii.x * cos_t;
        let ey = self.radii.y * sin_t;

        Point::new(
            self.center.x + ex * cos_phi - ey * sin_phi,
            self.center.y + ex * sin_phi + ey * cos_phi,
        )
    }

    #[inline]
    fn derivative(&self, t: f64) -> Point {
        let theta = self.theta_start + self.theta_sweep * t.clamp(0.0, 1.0);
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_phi, cos_phi) = self.rotation.sin_cos();
        let dex = -self.radii.x * sin_t;
        let dey = self.radii.y * cos_t;

        Point::new(
            (dex * cos_phi - dey * sin_phi) * self.theta_sweep,
            (dex * sin_phi + dey * cos_phi) * self.theta_sweep,
        )
    }
}

/// Signed angle from `u` to `v` in `(-π, π]`.
fn signed_angle(u: Point, v: Point) -> f64 {
    let cross = u.x * v.y - u.y * v.x;
    let dot = u.x * v.x + u.y * v.y;
    let angle = cross.atan2(dot);
    if angle <= -PI { angle + TAU } else { angle }
}

/// One drawn piece of a track outline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Straight line.
    Line(Line),
    /// Quadratic Bezier curve.
    Quadratic(QuadraticBezier),
    /// Cubic Bezier curve.
    Cubic(CubicBezier),
    /// Elliptical arc.
    Arc(EllipticalArc),
}

impl Segment {
    /// Start point of the segment.
    pub fn start(&self) -> Point {
        match self {
            Segment::Line(line) => line.start,
            Segment::Quadratic(quad) => quad.start,
            Segment::Cubic(cubic) => cubic.start,
            Segment::Arc(arc) => arc.start,
        }
    }

    /// End point of the segment.
    pub fn end(&self) -> Point {
        match self {
            Segment::Line(line) => line.end,
            Segment::Quadratic(quad) => quad.end,
            Segment::Cubic(cubic) => cubic.end,
            Segment::Arc(arc) => arc.end,
        }
    }

    /// Point at parameter `t` (clamped to `[0, 1]`).
    pub fn point(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        match self {
            Segment::Line(line) => line.start.lerp(line.end, t),
            Segment::Quadratic(quad) => quad.point(t),
            Segment::Cubic(cubic) => cubic.point(t),
            Segment::Arc(arc) => arc.point(t),
        }
    }

    /// First derivative with respect to `t` (clamped to `[0, 1]`).
    pub fn derivative(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        match self {
            Segment::Line(line) => line.end - line.start,
            Segment::Quadratic(quad) => quad.derivative(t),
            Segment::Cubic(cubic) => cubic.derivative(t),
            Segment::Arc(arc) => arc.derivative(t),
        }
    }

    /// Speed `|B'(t)|`, the integrand of the arc length.
    #[inline]
    pub fn speed(&self, t: f64) -> f64 {
        self.derivative(t).length()
    }

    /// Total arc length of the segment.
    pub fn length(&self) -> f64 {
        self.length_to(1.0)
    }

    /// Arc length from the start of the segment to parameter `t`.
    ///
    /// Closed form for lines, adaptive quadrature otherwise.
    pub fn length_to(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Segment::Line(line) => line.start.distance_to(line.end) * t,
            _ => integrate(|u| self.speed(u), 0.0, t, DEFAULT_QUADRATURE_TOLERANCE),
        }
    }

    /// Parameter `t` at which the arc length from the segment start equals
    /// `distance`.
    ///
    /// `segment_length` is the segment's precomputed [`Segment::length`]. The
    /// distance is clamped to `[0, segment_length]`, so both ends resolve to
    /// `t = 0` and `t = 1` exactly.
    pub fn t_at_length(&self, distance: f64, segment_length: f64) -> f64 {
        if !(segment_length > 0.0) || distance <= 0.0 {
            return 0.0;
        }
        if distance >= segment_length {
            return 1.0;
        }

        match self {
            Segment::Line(_) => distance / segment_length,
            _ => bisect(
                |t| self.length_to(t) - distance,
                0.0,
                1.0,
                DEFAULT_LENGTH_TOLERANCE,
                MAX_BISECTION_ITERATIONS,
            ),
        }
    }

    /// Short name of the segment kind, used in logs and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Segment::Line(_) => "line",
            Segment::Quadratic(_) => "quadratic",
            Segment::Cubic(_) => "cubic",
            Segment::Arc(_) => "arc",
        }
    }
}
