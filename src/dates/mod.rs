//! Date arithmetic used by curve construction.
//!
//! Everything here works on [`chrono::NaiveDate`]. Calendars decide which days
//! are business days, business day conventions roll dates that fall on
//! holidays, day counters turn a pair of dates into a year fraction and
//! schedules lay out the coupon dates of swap legs.

/// Business day conventions
pub mod business_day;
/// Holiday calendars
pub mod calendar;
/// Day count conventions
pub mod day_count;
/// IMM dates and codes
pub mod imm;
/// Periods, time units and frequencies
pub mod period;
/// Coupon schedules
pub mod schedule;

pub use business_day::BusinessDayConvention;
pub use calendar::Calendar;
pub use day_count::DayCounter;
pub use period::{Frequency, Period, TimeUnit};
pub use schedule::{DateGeneration, Schedule};
