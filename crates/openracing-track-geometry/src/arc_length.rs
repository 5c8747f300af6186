//! Numerical routines for arc-length parameterization.
//!
//! Bezier and elliptical arc segments have no closed-form arc length, and the
//! inverse problem (which parameter `t` lies at a given distance) has no closed
//! form either. This module holds the two routines the segments rely on:
//!
//! - [`integrate`]: adaptive Simpson quadrature of the speed function
//! - [`bisect`]: bracketed root search for monotonic functions
//!
//! Both take explicit tolerances and are bounded: quadrature by a recursion
//! depth cap and bisection by an iteration cap.

/// Absolute error target for a segment length quadrature.
pub const DEFAULT_QUADRATURE_TOLERANCE: f64 = 1e-10;

/// Absolute tolerance on the residual distance when inverting arc length.
///
/// Track outlines are drawn in pixel-scale units, so this is many orders of
/// magnitude below anything visible.
pub const DEFAULT_LENGTH_TOLERANCE: f64 = 1e-9;

/// Iteration cap for [`bisect`]. 64 halvings exhaust `f64` precision on `[0, 1]`.
pub const MAX_BISECTION_ITERATIONS: u32 = 64;

/// Number of equal panels integrated independently before adaptive refinement.
///
/// Starting from several panels keeps the error estimate from being fooled by
/// speed functions that happen to agree at the first five sample points.
const INITIAL_PANELS: u32 = 8;

/// Recursion cap for adaptive refinement of a single panel.
const MAX_QUADRATURE_DEPTH: u32 = 20;

/// Integrate `f` over `[a, b]` with adaptive Simpson quadrature.
///
/// Returns `0.0` for an empty or reversed interval. The result is accurate to
/// roughly `tolerance` for smooth integrands.
///
/// # Example
///
/// ```
/// use openracing_track_geometry::arc_length::integrate;
///
/// let area = integrate(|x| x * x, 0.0, 3.0, 1e-10);
/// assert!((area - 9.0).abs() < 1e-9);
/// ```
pub fn integrate<F>(f: F, a: f64, b: f64, tolerance: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    if a.is_nan() || b.is_nan() || a >= b {
        return 0.0;
    }

    let width = (b - a) / f64::from(INITIAL_PANELS);
    let panel_tolerance = tolerance / f64::from(INITIAL_PANELS);

    (0..INITIAL_PANELS)
        .map(|panel| {
            let lo = a + width * f64::from(panel);
            let hi = if panel + 1 == INITIAL_PANELS {
                b
            } else {
                lo + width
            };
            simpson_panel(&f, lo, hi, panel_tolerance)
        })
        .sum()
}

fn simpson_panel<F>(f: &F, a: f64, b: f64, tolerance: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let fa = f(a);
    let fb = f(b);
    let m = 0.5 * (a + b);
    let fm = f(m);
    let whole = simpson(a, b, fa, fm, fb);
    refine(
        f,
        SimpsonInterval {
            a,
            b,
            fa,
            fm,
            fb,
            whole,
        },
        tolerance,
        MAX_QUADRATURE_DEPTH,
    )
}

#[derive(Clone, Copy)]
struct SimpsonInterval {
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
}

#[inline]
fn simpson(a: f64, b: f64, fa: f64, fm: f64, fb: f64) -> f64 {
    (b - a) / 6.0 * (fa + 4.0 * fm + fb)
}

fn refine<F>(f: &F, interval: SimpsonInterval, tolerance: f64, depth: u32) -> f64
where
    F: Fn(f64) -> f64,
{
    let SimpsonInterval {
        a,
        b,
        fa,
        fm,
        fb,
        whole,
    } = interval;
    let m = 0.5 * (a + b);
    let left_mid = 0.5 * (a + m);
    let right_mid = 0.5 * (m + b);
    let f_left_mid = f(left_mid);
    let f_right_mid = f(right_mid);

    let left = simpson(a, m, fa, f_left_mid, fm);
    let right = simpson(m, b, fm, f_right_mid, fb);
    let delta = left + right - whole;

    if depth == 0 || delta.abs() <= 15.0 * tolerance {
        return left + right + delta / 15.0;
    }

    let half_tolerance = 0.5 * tolerance;
    refine(
        f,
        SimpsonInterval {
            a,
            b: m,
            fa,
            fm: f_left_mid,
            fb: fm,
            whole: left,
        },
        half_tolerance,
        depth - 1,
    ) + refine(
        f,
        SimpsonInterval {
            a: m,
            b,
            fa: fm,
            fm: f_right_mid,
            fb,
            whole: right,
        },
        half_tolerance,
        depth - 1,
    )
}

/// Find `x` in `[lo, hi]` where the non-decreasing function `f` crosses zero.
///
/// The caller guarantees `f(lo) <= 0 <= f(hi)`. The search stops as soon as
/// `|f(x)| <= tolerance`, when the bracket can no longer be halved, or after
/// `max_iterations` halvings; in the latter cases the bracket midpoint is
/// returned.
///
/// # Example
///
/// ```
/// use openracing_track_geometry::arc_length::bisect;
///
/// let root = bisect(|x| x * x - 2.0, 0.0, 2.0, 1e-12, 64);
/// assert!((root - 2f64.sqrt()).abs() < 1e-9);
/// ```
pub fn bisect<F>(f: F, lo: f64, hi: f64, tolerance: f64, max_iterations: u32) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut lo = lo;
    let mut hi = hi;

    for _ in 0..max_iterations {
        let mid = lo + 0.5 * (hi - lo);
        if mid <= lo || mid >= hi {
            return mid;
        }

        let value = f(mid);
        if value.abs() <= tolerance {
            return mid;
        }

        if value < 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    lo + 0.5 * (hi - lo)
}
