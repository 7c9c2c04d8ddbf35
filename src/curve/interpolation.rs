//! One dimensional interpolation on curve nodes.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interpolation scheme of a yield curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Interpolation {
    /// Linear on continuously compounded zero rates
    Linear,
    /// Linear on the log of discount factors
    LogLinear,
    /// Natural cubic spline on zero rates
    #[default]
    CubicSpline,
}

impl FromStr for Interpolation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linear" | "linearzero" => Ok(Interpolation::Linear),
            "loglinear" | "loglineardiscount" => Ok(Interpolation::LogLinear),
            "cubic" | "cubicspline" | "cubiczero" => Ok(Interpolation::CubicSpline),
            other => Err(AppError::InvalidInput(format!(
                "unrecognised interpolation '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Interpolating function over strictly increasing abscissas.
///
/// Outside the node range the value of the nearest end node is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpolant {
    /// Piecewise linear
    Linear {
        /// Abscissas
        xs: Vec<f64>,
        /// Ordinates
        ys: Vec<f64>,
    },
    /// Natural cubic spline
    CubicSpline {
        /// Abscissas
        xs: Vec<f64>,
        /// Ordinates
        ys: Vec<f64>,
        /// Second derivatives at the nodes
        second_derivatives: Vec<f64>,
    },
}

fn validate(xs: &[f64], ys: &[f64]) -> Result<(), AppError> {
    if xs.len() != ys.len() {
        return Err(AppError::InvalidInput(format!(
            "interpolation needs as many ordinates as abscissas ({} vs {})",
            ys.len(),
            xs.len()
        )));
    }
    if xs.len() < 2 {
        return Err(AppError::InvalidInput(
            "interpolation needs at least two nodes".to_string(),
        ));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(AppError::InvalidInput(
            "interpolation abscissas must be strictly increasing".to_string(),
        ));
    }
    Ok(())
}

impl Interpolant {
    /// Piecewise linear interpolant through the nodes
    pub fn linear(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, AppError> {
        validate(&xs, &ys)?;
        Ok(Interpolant::Linear { xs, ys })
    }

    /// Natural cubic spline through the nodes
    pub fn cubic_spline(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, AppError> {
        validate(&xs, &ys)?;
        let second_derivatives = natural_spline_second_derivatives(&xs, &ys);
        Ok(Interpolant::CubicSpline {
            xs,
            ys,
            second_derivatives,
        })
    }

    /// Replaces the ordinate of node `index`; out of range indices are ignored
    pub fn set_value(&mut self, index: usize, y: f64) {
        match self {
            Interpolant::Linear { ys, .. } => {
                if let Some(slot) = ys.get_mut(index) {
                    *slot = y;
                }
            }
            Interpolant::CubicSpline {
                xs,
                ys,
                second_derivatives,
            } => {
                if let Some(slot) = ys.get_mut(index) {
                    *slot = y;
                    *second_derivatives = natural_spline_second_derivatives(xs, ys);
                }
            }
        }
    }

    /// Value at `x`
    #[must_use]
    pub fn value(&self, x: f64) -> f64 {
        match self {
            Interpolant::Linear { xs, ys } => {
                let Some(k) = segment(xs, x) else {
                    return clamp_value(xs, ys, x);
                };
                let w = (x - xs[k]) / (xs[k + 1] - xs[k]);
                ys[k] + w * (ys[k + 1] - ys[k])
            }
            Interpolant::CubicSpline {
                xs,
                ys,
                second_derivatives: m,
            } => {
                let Some(k) = segment(xs, x) else {
                    return clamp_value(xs, ys, x);
                };
                let h = xs[k + 1] - xs[k];
                let a = (xs[k + 1] - x) / h;
                let b = (x - xs[k]) / h;
                a * ys[k]
                    + b * ys[k + 1]
                    + ((a * a * a - a) * m[k] + (b * b * b - b) * m[k + 1]) * h * h / 6.0
            }
        }
    }
}

// Index k with xs[k] <= x <= xs[k + 1], None outside the node range
fn segment(xs: &[f64], x: f64) -> Option<usize> {
    let n = xs.len();
    if x < xs[0] || x > xs[n - 1] {
        return None;
    }
    let idx = xs.partition_point(|v| *v <= x);
    Some(idx.saturating_sub(1).min(n - 2))
}

fn clamp_value(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x < xs[0] { ys[0] } else { ys[ys.len() - 1] }
}

fn natural_spline_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut m = vec![0.0; n];
    let mut u = vec![0.0; n];
    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * m[i - 1] + 2.0;
        m[i] = (sig - 1.0) / p;
        let slope_diff =
            (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]) - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * slope_diff / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }
    m[n - 1] = 0.0;
    for k in (0..n - 1).rev() {
        m[k] = m[k] * m[k + 1] + u[k];
    }
    m
}
