use mda_core::stats::safe_div;
use mda_core::{MonthlyRecord, TrendDataPoint};

use crate::growth::revenue_growth_quarter;
use crate::ratios::{current_ratio, days_outstanding, debt_to_net_worth, quick_ratio};
use crate::{income, trailing, valuation, TTM_MONTHS};

/// Ratio bundle for the last record of `history`, using up to twelve trailing months.
///
/// Flow figures (revenue, COGS, net income) are annualised by `12 / months`
/// so a short history is not understated. Returns `None` for an empty history.
pub fn trend_point(history: &[MonthlyRecord]) -> Option<TrendDataPoint> {
    let latest = history.last()?;
    let window = trailing(history, TTM_MONTHS);
    let annualise = TTM_MONTHS as f64 / window.len() as f64;

    let revenue: f64 = window.iter().map(|r| r.revenue).sum();
    let cogs: f64 = window.iter().map(|r| r.cogs_total).sum();
    let net_income: f64 = window.iter().map(income::net_income).sum();
    let interest: f64 = window.iter().map(|r| r.interest_expense).sum();
    let operating_ebit: f64 = window
        .iter()
        .map(|r| income::income_before_tax(r) + r.interest_expense)
        .sum();
    let ebitda: f64 = window.iter().map(valuation::ebitda).sum();

    let annual_revenue = revenue * annualise;
    let annual_cogs = cogs * annualise;
    let annual_net_income = net_income * annualise;

    Some(TrendDataPoint {
        month: latest.month,
        current_ratio: current_ratio(latest.tca, latest.tcl),
        quick_ratio: quick_ratio(latest.cash, latest.ar, latest.tcl),
        debt_to_net_worth: debt_to_net_worth(latest.total_liab, latest.total_equity),
        roe: safe_div(annual_net_income, latest.total_equity) * 100.0,
        roa: safe_div(annual_net_income, latest.total_assets) * 100.0,
        interest_coverage: safe_div(operating_ebit, interest),
        days_ar: days_outstanding(latest.ar, annual_revenue),
        days_inventory: days_outstanding(latest.inventory, annual_cogs),
        days_ap: days_outstanding(latest.ap, annual_cogs),
        total_asset_turnover: safe_div(annual_revenue, latest.total_assets),
        ebitda_margin: safe_div(ebitda, revenue) * 100.0,
        revenue_growth_score: revenue_growth_score(history),
    })
}

/// One point per month, each computed from the history up to that month.
pub fn build_trend(records: &[MonthlyRecord]) -> Vec<TrendDataPoint> {
    (1..=records.len())
        .filter_map(|end| trend_point(&records[..end]))
        .collect()
}

/// Quarter-over-quarter revenue growth mapped onto 0..=100, 50 meaning flat.
pub fn revenue_growth_score(history: &[MonthlyRecord]) -> f64 {
    (50.0 + 2.5 * revenue_growth_quarter(history)).clamp(0.0, 100.0)
}
