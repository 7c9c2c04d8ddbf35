use crate::constants::{
    DEFAULT_BOOTSTRAP_MAX_ITERATIONS, DEFAULT_BOOTSTRAP_TOLERANCE, DEFAULT_SOLVER_ACCURACY,
    DEFAULT_SOLVER_MAX_EVALUATIONS, ZERO_RATE_LOWER_BOUND, ZERO_RATE_UPPER_BOUND,
};
use crate::curve::helpers::RateHelper;
use crate::curve::interpolation::Interpolation;
use crate::curve::solver::BrentSolver;
use crate::curve::term_structure::YieldCurve;
use crate::dates::DayCounter;
use crate::error::AppError;
use chrono::NaiveDate;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const INITIAL_BRACKET_HALF_WIDTH: f64 = 0.005;

#[derive(DebugPretty, DisplaySimple, Serialize, Deserialize, Clone, Copy, PartialEq)]
/// Settings of the iterative bootstrap
pub struct BootstrapConfig {
    /// Maximum number of full passes over the helpers
    pub max_iterations: usize,
    /// Largest zero rate change between passes accepted as converged
    pub tolerance: f64,
    /// Root finder accuracy on each zero rate
    pub accuracy: f64,
    /// Interpolation of the resulting curve
    pub interpolation: Interpolation,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_BOOTSTRAP_MAX_ITERATIONS,
            tolerance: DEFAULT_BOOTSTRAP_TOLERANCE,
            accuracy: DEFAULT_SOLVER_ACCURACY,
            interpolation: Interpolation::default(),
        }
    }
}

/// Fits a [`YieldCurve`] to a set of rate helpers.
///
/// Each helper pins the zero rate at its pillar date. Pillars are solved in
/// date order with a Brent root finder, and whole passes are repeated until
/// no zero rate moves by more than the configured tolerance. Repeating is
/// what makes non-local interpolation (the cubic spline) consistent: moving
/// a later node bends the curve before it.
#[derive(Debug, Clone, Default)]
pub struct Bootstrapper {
    config: BootstrapConfig,
}

impl Bootstrapper {
    /// Bootstrapper with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bootstrapper with the given settings
    #[must_use]
    pub fn with_config(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Current settings
    #[must_use]
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Bootstraps a curve from `helpers`, which are sorted by pillar date in
    /// place.
    ///
    /// `discount` is the curve swaps discount on in a dual curve build.
    pub fn bootstrap(
        &self,
        reference_date: NaiveDate,
        day_counter: DayCounter,
        helpers: &mut [RateHelper],
        discount: Option<&YieldCurve>,
    ) -> Result<YieldCurve, AppError> {
        if helpers.is_empty() {
            return Err(AppError::Bootstrap(
                "no instruments to bootstrap".to_string(),
            ));
        }
        helpers.sort_by_key(RateHelper::pillar_date);
        for helper in helpers.iter() {
            helper.validate(reference_date)?;
        }
        if let Some(pair) = helpers
            .windows(2)
            .find(|w| w[0].pillar_date() == w[1].pillar_date())
        {
            return Err(AppError::Bootstrap(format!(
                "{} and {} share the pillar date {}",
                pair[0].name(),
                pair[1].name(),
                pair[0].pillar_date()
            )));
        }

        let dates = helpers.iter().map(RateHelper::pillar_date).collect();
        let guesses = helpers.iter().map(RateHelper::rate_guess).collect();
        let mut curve = YieldCurve::new(
            reference_date,
            day_counter,
            self.config.interpolation,
            dates,
            guesses,
        )?;
        let solver = BrentSolver::new(self.config.accuracy, DEFAULT_SOLVER_MAX_EVALUATIONS);

        for iteration in 1..=self.config.max_iterations {
            let mut max_change: f64 = 0.0;
            for (i, helper) in helpers.iter().enumerate() {
                let previous = curve.zero_rates()[i];
                let root = solve_pillar(&solver, &curve, i, helper, discount)?;
                curve.set_zero_rate(i, root);
                max_change = max_change.max((root - previous).abs());
            }
            debug!(
                "bootstrap pass {} finished, largest zero rate change {:e}",
                iteration, max_change
            );
            if max_change < self.config.tolerance {
                info!(
                    "Bootstrapped {} instruments in {} passes",
                    helpers.len(),
                    iteration
                );
                return Ok(curve);
            }
        }

        warn!(
            "Bootstrap did not converge after {} passes",
            self.config.max_iterations
        );
        Err(AppError::Bootstrap(format!(
            "no convergence after {} passes over {} instruments",
            self.config.max_iterations,
            helpers.len()
        )))
    }
}

fn solve_pillar(
    solver: &BrentSolver,
    curve: &YieldCurve,
    index: usize,
    helper: &RateHelper,
    discount: Option<&YieldCurve>,
) -> Result<f64, AppError> {
    let mut trial = curve.clone();
    let mut objective = |z: f64| {
        trial.set_zero_rate(index, z);
        helper.quote_error(&trial, discount)
    };
    let previous = curve.zero_rates()[index];
    let bracket = solver
        .bracket(
            &mut objective,
            previous - INITIAL_BRACKET_HALF_WIDTH,
            previous + INITIAL_BRACKET_HALF_WIDTH,
        )
        .or_else(|_| {
            solver.bracket(&mut objective, ZERO_RATE_LOWER_BOUND, ZERO_RATE_UPPER_BOUND)
        })
        .map_err(|e| AppError::Bootstrap(format!("{}: {e}", helper.name())))?;
    solver
        .solve(objective, bracket.0, bracket.1)
        .map_err(|e| AppError::Bootstrap(format!("{}: {e}", helper.name())))
}
