use mda_core::stats::safe_div;

/// Debt-to-equity reported when equity is zero or negative.
pub const NEGATIVE_EQUITY_LEVERAGE: f64 = 999.0;

/// Current assets over current liabilities. Liabilities are taken as an absolute value.
pub fn current_ratio(current_assets: f64, current_liabilities: f64) -> f64 {
    safe_div(current_assets, current_liabilities.abs())
}

/// Cash plus receivables over current liabilities.
pub fn quick_ratio(cash: f64, receivables: f64, current_liabilities: f64) -> f64 {
    safe_div(cash + receivables, current_liabilities.abs())
}

pub fn working_capital(current_assets: f64, current_liabilities: f64) -> f64 {
    current_assets - current_liabilities
}

/// Same computation as the current ratio, named for the working-capital view.
pub fn wc_ratio(current_assets: f64, current_liabilities: f64) -> f64 {
    current_ratio(current_assets, current_liabilities)
}

/// Days inventory + days receivable - days payable
pub fn cash_conversion_cycle(days_inventory: f64, days_ar: f64, days_ap: f64) -> f64 {
    days_inventory + days_ar - days_ap
}

/// Total liabilities over total equity. Zero when equity is zero.
pub fn debt_to_net_worth(total_liabilities: f64, total_equity: f64) -> f64 {
    safe_div(total_liabilities, total_equity)
}

/// Debt-to-equity for risk classification.
///
/// A company with zero or negative equity reports [`NEGATIVE_EQUITY_LEVERAGE`]
/// so that it always classifies as highly leveraged.
pub fn debt_to_equity_for_review(total_liabilities: f64, total_equity: f64) -> f64 {
    if total_equity > 0.0 {
        total_liabilities / total_equity
    } else {
        NEGATIVE_EQUITY_LEVERAGE
    }
}

/// Balance-over-annual-flow expressed in days (e.g. receivables over revenue).
pub fn days_outstanding(balance: f64, annual_flow: f64) -> f64 {
    safe_div(balance, annual_flow) * 365.0
}
