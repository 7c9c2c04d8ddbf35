use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule used to move a date that falls on a holiday onto a business day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// First business day after the holiday
    Following,
    /// Following, unless that crosses into the next month, then Preceding
    #[default]
    ModifiedFollowing,
    /// Last business day before the holiday
    Preceding,
    /// Preceding, unless that crosses into the previous month, then Following
    ModifiedPreceding,
    /// Leave the date alone
    Unadjusted,
}

impl FromStr for BusinessDayConvention {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Following" => Ok(BusinessDayConvention::Following),
            "Modified Following" | "ModifiedFollowing" => {
                Ok(BusinessDayConvention::ModifiedFollowing)
            }
            "Preceding" => Ok(BusinessDayConvention::Preceding),
            "Modified Preceding" | "ModifiedPreceding" => {
                Ok(BusinessDayConvention::ModifiedPreceding)
            }
            "Unadjusted" => Ok(BusinessDayConvention::Unadjusted),
            other => Err(AppError::InvalidInput(format!(
                "unrecognised business day convention '{other}'"
            ))),
        }
    }
}

impl fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
            BusinessDayConvention::Unadjusted => "Unadjusted",
        };
        write!(f, "{name}")
    }
}
