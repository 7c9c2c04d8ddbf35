//! Brent root finding.

use crate::constants::{DEFAULT_SOLVER_ACCURACY, DEFAULT_SOLVER_MAX_EVALUATIONS};
use crate::error::AppError;

const BRACKET_GROWTH: f64 = 1.6;
const MAX_BRACKET_EXPANSIONS: usize = 50;

/// Bracketing root finder combining bisection, secant and inverse quadratic
/// interpolation steps
#[derive(Debug, Clone, Copy)]
pub struct BrentSolver {
    /// Absolute accuracy on the root
    pub accuracy: f64,
    /// Maximum number of function evaluations
    pub max_evaluations: usize,
}

impl Default for BrentSolver {
    fn default() -> Self {
        Self {
            accuracy: DEFAULT_SOLVER_ACCURACY,
            max_evaluations: DEFAULT_SOLVER_MAX_EVALUATIONS,
        }
    }
}

impl BrentSolver {
    /// Creates a solver with the given accuracy and evaluation budget
    #[must_use]
    pub fn new(accuracy: f64, max_evaluations: usize) -> Self {
        Self {
            accuracy,
            max_evaluations,
        }
    }

    /// Widens `[lower, upper]` geometrically until `f` changes sign on it
    pub fn bracket<F>(&self, f: &mut F, lower: f64, upper: f64) -> Result<(f64, f64), AppError>
    where
        F: FnMut(f64) -> f64,
    {
        if lower >= upper {
            return Err(AppError::InvalidInput(format!(
                "invalid bracket [{lower}, {upper}]"
            )));
        }
        let (mut a, mut b) = (lower, upper);
        let (mut fa, mut fb) = (f(a), f(b));
        for _ in 0..MAX_BRACKET_EXPANSIONS {
            if !fa.is_finite() || !fb.is_finite() {
                break;
            }
            if fa * fb <= 0.0 {
                return Ok((a, b));
            }
            if fa.abs() < fb.abs() {
                a += BRACKET_GROWTH * (a - b);
                fa = f(a);
            } else {
                b += BRACKET_GROWTH * (b - a);
                fb = f(b);
            }
        }
        Err(AppError::Bootstrap(format!(
            "unable to bracket a root starting from [{lower}, {upper}]"
        )))
    }

    /// Finds a root of `f` inside `[lower, upper]`, which must bracket it
    pub fn solve<F>(&self, mut f: F, lower: f64, upper: f64) -> Result<f64, AppError>
    where
        F: FnMut(f64) -> f64,
    {
        let (mut a, mut b) = (lower, upper);
        let (mut fa, mut fb) = (f(a), f(b));
        if fa == 0.0 {
            return Ok(a);
        }
        if fb == 0.0 {
            return Ok(b);
        }
        if fa * fb > 0.0 {
            return Err(AppError::Bootstrap(format!(
                "root not bracketed in [{lower}, {upper}]: f = [{fa}, {fb}]"
            )));
        }

        let (mut c, mut fc) = (b, fb);
        let mut d = b - a;
        let mut e = d;

        for _ in 0..self.max_evaluations {
            if (fb > 0.0 && fc > 0.0) || (fb < 0.0 && fc < 0.0) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * self.accuracy;
            let xm = 0.5 * (c - b);
            if xm.abs() <= tol || fb == 0.0 {
                return Ok(b);
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let mut p;
                let mut q;
                if a == c {
                    // secant step
                    p = 2.0 * xm * s;
                    q = 1.0 - s;
                } else {
                    // inverse quadratic interpolation
                    let qa = fa / fc;
                    let r = fb / fc;
                    p = s * (2.0 * xm * qa * (qa - r) - (b - a) * (r - 1.0));
                    q = (qa - 1.0) * (r - 1.0) * (s - 1.0);
                }
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();
                let min1 = 3.0 * xm * q - (tol * q).abs();
                let min2 = (e * q).abs();
                if 2.0 * p < min1.min(min2) {
                    e = d;
                    d = p / q;
                } else {
                    d = xm;
                    e = d;
                }
            } else {
                d = xm;
                e = d;
            }

            a = b;
            fa = fb;
            if d.abs() > tol {
                b += d;
            } else {
                b += tol.copysign(xm);
            }
            fb = f(b);
        }

        Err(AppError::Bootstrap(format!(
            "root finder did not converge within {} evaluations",
            self.max_evaluations
        )))
    }
}
