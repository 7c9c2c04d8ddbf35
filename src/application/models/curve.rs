use crate::application::models::conventions::CurveConventions;
use crate::constants::OIS_SUFFIX;
use crate::curve::{RateHelper, YieldCurve, YieldTermStructure};
use crate::error::AppError;
use chrono::NaiveDate;
use pretty_simple_display::DisplaySimple;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Family of a curve, which decides the instruments used to build it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    /// Ibor projection curve: deposits, futures, FRAs and swaps
    Libor,
    /// Overnight curve: deposits and OIS swaps
    Ois,
}

impl CurveKind {
    /// Curves named `<CCY>_OIS` are overnight curves, everything else is Libor
    #[must_use]
    pub fn from_curve_name(name: &str) -> Self {
        if name.to_uppercase().ends_with(OIS_SUFFIX) {
            CurveKind::Ois
        } else {
            CurveKind::Libor
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveKind::Libor => write!(f, "LIBOR"),
            CurveKind::Ois => write!(f, "OIS"),
        }
    }
}

/// A curve node as reported and exported
#[derive(Debug, Clone, Copy, DisplaySimple, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    /// Pillar date
    pub date: NaiveDate,
    /// Discount factor from the reference date
    pub discount_factor: f64,
    /// Continuously compounded zero rate
    pub zero_rate: f64,
}

/// A bootstrapped curve together with the inputs it was built from
#[derive(Debug, Clone)]
pub struct Curve {
    /// Curve name, e.g. `USD_3M`
    pub name: String,
    /// Curve family
    pub kind: CurveKind,
    /// Currency code
    pub currency: String,
    /// Date the market quotes belong to
    pub curve_date: NaiveDate,
    /// Reference date of the curve: the curve date plus the deposit spot lag
    /// in calendar days
    pub settlement_date: NaiveDate,
    /// Conventions the curve was built with
    pub conventions: CurveConventions,
    helpers: Vec<RateHelper>,
    term_structure: YieldCurve,
    discounting: Option<Box<Curve>>,
}

impl Curve {
    /// Wraps a bootstrapped term structure
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        kind: CurveKind,
        curve_date: NaiveDate,
        settlement_date: NaiveDate,
        conventions: CurveConventions,
        helpers: Vec<RateHelper>,
        term_structure: YieldCurve,
        discounting: Option<Curve>,
    ) -> Self {
        Self {
            currency: conventions.general.currency.clone(),
            name,
            kind,
            curve_date,
            settlement_date,
            conventions,
            helpers,
            term_structure,
            discounting: discounting.map(Box::new),
        }
    }

    /// Node dates, starting with the settlement date
    #[must_use]
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.term_structure
            .nodes()
            .into_iter()
            .map(|(d, _, _)| d)
            .collect()
    }

    /// Discount factors at the node dates
    #[must_use]
    pub fn discount_factors(&self) -> Vec<f64> {
        self.term_structure
            .nodes()
            .into_iter()
            .map(|(_, df, _)| df)
            .collect()
    }

    /// Nodes as exportable points
    #[must_use]
    pub fn points(&self) -> Vec<CurvePoint> {
        self.term_structure
            .nodes()
            .into_iter()
            .map(|(date, discount_factor, zero_rate)| CurvePoint {
                date,
                discount_factor,
                zero_rate,
            })
            .collect()
    }

    /// Discount factor for any date on or after the settlement date
    pub fn discount_factor(&self, date: NaiveDate) -> Result<f64, AppError> {
        self.term_structure.discount(date)
    }

    /// Continuously compounded zero rate to `date`
    pub fn zero_rate(&self, date: NaiveDate) -> Result<f64, AppError> {
        self.term_structure.zero_rate(date)
    }

    /// Simple forward rate between two dates under the curve day counter
    pub fn forward_rate(&self, start: NaiveDate, end: NaiveDate) -> Result<f64, AppError> {
        self.term_structure.forward_rate(start, end)
    }

    /// Rate helpers the curve was fitted to, sorted by pillar date
    #[must_use]
    pub fn instruments(&self) -> &[RateHelper] {
        &self.helpers
    }

    /// Underlying interpolated term structure
    #[must_use]
    pub fn term_structure(&self) -> &YieldCurve {
        &self.term_structure
    }

    /// OIS curve the swaps were discounted on, for dual curve builds
    #[must_use]
    pub fn discounting_curve(&self) -> Option<&Curve> {
        self.discounting.as_deref()
    }

    /// Implied minus market quote for every instrument
    #[must_use]
    pub fn repricing_errors(&self) -> Vec<(String, f64)> {
        let discount = self.discounting_curve().map(Curve::term_structure);
        self.helpers
            .iter()
            .map(|h| {
                (
                    h.name().to_string(),
                    h.quote_error(&self.term_structure, discount),
                )
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Curve {
    type Item = &'a RateHelper;
    type IntoIter = std::slice::Iter<'a, RateHelper>;

    fn into_iter(self) -> Self::IntoIter {
        self.helpers.iter()
    }
}
