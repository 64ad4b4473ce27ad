//! Derived financial metrics over a monthly record series.
//!
//! Every function is a pure transformation of its inputs. Records are always
//! ordered oldest to newest; "latest" means the last element.

pub mod format;
pub mod growth;
pub mod income;
pub mod ratios;
pub mod scoring;
pub mod trend;
pub mod valuation;

#[cfg(test)]
pub(crate) mod test_support;

pub use format::{format_currency, format_percent, format_ratio};
pub use growth::{growth_rate, window_growth, year_ago, GrowthWindow};
pub use income::{ExpenseCategory, ExpenseGoal, ExpenseGoalStatus, IncomeStatement};
pub use scoring::ScoreSummary;
pub use trend::{build_trend, trend_point};
pub use valuation::{ScenarioProjection, Valuation, ValuationConfig};

/// Months in a trailing-twelve-month window.
pub const TTM_MONTHS: usize = 12;
/// Months needed to compare two consecutive trailing-twelve windows.
pub const TWO_YEAR_MONTHS: usize = 24;

/// The most recent `n` records (all of them when fewer exist).
pub fn trailing(records: &[mda_core::MonthlyRecord], n: usize) -> &[mda_core::MonthlyRecord] {
    &records[records.len().saturating_sub(n)..]
}
