use mda_core::MonthlyRecord;

use crate::income;

/// Percent change from `prior` to `current`. Zero when `prior` is zero or not finite.
pub fn growth_rate(current: f64, prior: f64) -> f64 {
    if prior == 0.0 || !prior.is_finite() || !current.is_finite() {
        return 0.0;
    }
    ((current - prior) / prior) * 100.0
}

/// Comparison window for period-over-period growth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthWindow {
    /// Last 3 months vs the 3 before
    Quarter,
    /// Last 12 months vs the 12 before (needs 24 months)
    TrailingTwelve,
}

impl GrowthWindow {
    pub fn months(&self) -> usize {
        match self {
            GrowthWindow::Quarter => 3,
            GrowthWindow::TrailingTwelve => 12,
        }
    }
}

/// Growth of the latest window sum over the preceding window sum.
///
/// Returns 0.0 when the series cannot fill both windows.
pub fn window_growth(
    records: &[MonthlyRecord],
    accessor: impl Fn(&MonthlyRecord) -> f64,
    window: GrowthWindow,
) -> f64 {
    let w = window.months();
    if records.len() < 2 * w {
        return 0.0;
    }
    let split = records.len() - w;
    let current: f64 = records[split..].iter().map(&accessor).sum();
    let prior: f64 = records[split - w..split].iter().map(&accessor).sum();
    growth_rate(current, prior)
}

/// Trailing twelve months of revenue against the twelve before.
pub fn revenue_growth_24m(records: &[MonthlyRecord]) -> f64 {
    window_growth(records, |r| r.revenue, GrowthWindow::TrailingTwelve)
}

/// Trailing twelve months of COGS plus operating expense against the twelve before.
pub fn expense_growth_24m(records: &[MonthlyRecord]) -> f64 {
    window_growth(records, income::total_expenses, GrowthWindow::TrailingTwelve)
}

/// Latest 3 months of revenue against the 3 before.
pub fn revenue_growth_quarter(records: &[MonthlyRecord]) -> f64 {
    window_growth(records, |r| r.revenue, GrowthWindow::Quarter)
}

/// The record twelve months before the latest one.
///
/// Falls back to the oldest record when the series is shorter, so a
/// single-month series compares against itself.
pub fn year_ago(records: &[MonthlyRecord]) -> Option<&MonthlyRecord> {
    if records.len() > 12 {
        records.get(records.len() - 13)
    } else {
        records.first()
    }
}
