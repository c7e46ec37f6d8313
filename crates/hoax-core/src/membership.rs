// ─────────────────────────────────────────────────────────────────────
// Hoax Kernel — Membership Functions
// ─────────────────────────────────────────────────────────────────────
//! Piecewise-linear membership functions and the discretized universe.
//!
//! Degrees are evaluated exactly at the query point. The 101-point
//! universe is only used to sample output curves for aggregation and
//! centroid defuzzification.

use hoax_types::{HoaxError, HoaxResult};

/// Number of points in the discretized universe `{0, 1, ..., 100}`.
pub const UNIVERSE_SIZE: usize = 101;

/// The discretized universe shared by every linguistic variable.
pub fn universe() -> impl Iterator<Item = f64> {
    (0..UNIVERSE_SIZE).map(|i| i as f64)
}

/// Shape of a fuzzy set over a crisp domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MembershipFunction {
    /// Rises linearly a→b, falls linearly b→c.
    Triangular { a: f64, b: f64, c: f64 },
    /// Rises a→b, plateaus at 1 from b to c, falls c→d.
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
}

impl MembershipFunction {
    /// Checked triangular constructor: requires finite `a <= b <= c`.
    pub fn triangular(a: f64, b: f64, c: f64) -> HoaxResult<Self> {
        check_breakpoints(&[a, b, c])?;
        Ok(MembershipFunction::Triangular { a, b, c })
    }

    /// Checked trapezoidal constructor: requires finite `a <= b <= c <= d`.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> HoaxResult<Self> {
        check_breakpoints(&[a, b, c, d])?;
        Ok(MembershipFunction::Trapezoidal { a, b, c, d })
    }

    /// Degree of membership of `x`, always in [0, 1].
    ///
    /// A zero-width edge is a shoulder: `tri(0, 0, 20)` is 1 at 0 and
    /// `trap(60, 80, 100, 100)` is 1 at 100.
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            MembershipFunction::Triangular { a, b, c } => {
                if x < a || x > c {
                    0.0
                } else if x <= b {
                    rising(x, a, b)
                } else {
                    falling(x, b, c)
                }
            }
            MembershipFunction::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.0
                } else if x < b {
                    rising(x, a, b)
                } else if x <= c {
                    1.0
                } else {
                    falling(x, c, d)
                }
            }
        }
    }

    /// Sample the function at every point of the universe.
    pub fn sample(&self) -> Vec<f64> {
        universe().map(|x| self.degree(x)).collect()
    }
}

#[inline]
fn rising(x: f64, lo: f64, hi: f64) -> f64 {
    if hi == lo {
        1.0
    } else {
        ((x - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

#[inline]
fn falling(x: f64, lo: f64, hi: f64) -> f64 {
    if hi == lo {
        1.0
    } else {
        ((hi - x) / (hi - lo)).clamp(0.0, 1.0)
    }
}

fn check_breakpoints(points: &[f64]) -> HoaxResult<()> {
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(HoaxError::Validation(format!(
            "membership breakpoint must be finite, got {p}"
        )));
    }
    if points.windows(2).any(|w| w[0] > w[1]) {
        return Err(HoaxError::Validation(format!(
            "membership breakpoints must be non-decreasing, got {points:?}"
        )));
    }
    Ok(())
}
