use mda_core::{AnalysisError, MonthlyRecord};
use mda_metrics::growth::{expense_growth_24m, revenue_growth_24m, year_ago};
use mda_metrics::income::IncomeStatement;
use mda_metrics::{format_currency, format_percent, Valuation, ValuationConfig, TTM_MONTHS, TWO_YEAR_MONTHS};
use serde::{Deserialize, Serialize};

pub const TTM_MARGIN_FALLBACK: &str = "TTM margin analysis requires 12+ months of data.";
pub const EQUITY_TREND_FALLBACK: &str = "Equity trend analysis requires 12+ months of data.";
pub const CASH_FLOW_FALLBACK: &str = "Cash flow analysis requires 12+ months of data.";
pub const VALUATION_FALLBACK: &str = "Valuation requires 12+ months of data.";
pub const GROWTH_FALLBACK: &str = "Year-over-year growth analysis requires 24+ months of data.";

/// Fixed narrative paragraphs of the report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSections {
    pub ttm_margins: String,
    pub growth: String,
    pub equity_trend: String,
    pub cash_flow: String,
    pub valuation: String,
}

impl ReportSections {
    pub fn build(
        records: &[MonthlyRecord],
        valuation: &Result<Valuation, AnalysisError>,
        config: &ValuationConfig,
    ) -> Self {
        Self {
            ttm_margins: ttm_margin_section(records),
            growth: growth_section(records),
            equity_trend: equity_trend_section(records),
            cash_flow: cash_flow_section(valuation),
            valuation: valuation_section(valuation, config),
        }
    }
}

pub fn ttm_margin_section(records: &[MonthlyRecord]) -> String {
    if records.len() < TTM_MONTHS {
        return TTM_MARGIN_FALLBACK.to_string();
    }
    let ttm = IncomeStatement::ttm(records);
    format!(
        "Over the trailing twelve months the company generated {} in revenue and {} in gross profit, a gross margin of {}. Operating expenses totaled {}, leaving net income of {} (net margin {}).",
        format_currency(ttm.revenue),
        format_currency(ttm.gross_profit),
        format_percent(ttm.gross_margin),
        format_currency(ttm.total_operating_expense),
        format_currency(ttm.net_income),
        format_percent(ttm.net_margin)
    )
}

pub fn growth_section(records: &[MonthlyRecord]) -> String {
    if records.len() < TWO_YEAR_MONTHS {
        return GROWTH_FALLBACK.to_string();
    }
    format!(
        "Trailing twelve month revenue changed {} against the prior twelve months, while total expenses changed {}.",
        format_percent(revenue_growth_24m(records)),
        format_percent(expense_growth_24m(records))
    )
}

pub fn equity_trend_section(records: &[MonthlyRecord]) -> String {
    let (Some(latest), Some(prior)) = (records.last(), year_ago(records)) else {
        return EQUITY_TREND_FALLBACK.to_string();
    };
    if records.len() < TTM_MONTHS {
        return EQUITY_TREND_FALLBACK.to_string();
    }
    let change = latest.total_equity - prior.total_equity;
    let movement = if change > 0.0 {
        format!("an increase of {}", format_currency(change))
    } else if change < 0.0 {
        format!("a decrease of {}", format_currency(change.abs()))
    } else {
        "no change".to_string()
    };
    format!(
        "Total equity moved from {} to {} over the past year, {}.",
        format_currency(prior.total_equity),
        format_currency(latest.total_equity),
        movement
    )
}

pub fn cash_flow_section(valuation: &Result<Valuation, AnalysisError>) -> String {
    let Ok(v) = valuation else {
        return CASH_FLOW_FALLBACK.to_string();
    };
    format!(
        "Trailing twelve month free cash flow was {}: net income of {} plus {} of depreciation, less {} invested in working capital and {} of capital expenditures.",
        format_currency(v.ttm_free_cash_flow),
        format_currency(v.ttm_net_income),
        format_currency(v.ttm_depreciation),
        format_currency(v.change_in_working_capital),
        format_currency(v.capital_expenditures)
    )
}

pub fn valuation_section(valuation: &Result<Valuation, AnalysisError>, config: &ValuationConfig) -> String {
    let Ok(v) = valuation else {
        return VALUATION_FALLBACK.to_string();
    };
    format!(
        "Estimated business value: {} on {} SDE at {:.1}x, {} on {} EBITDA at {:.1}x, and {} from a five-year discounted cash flow ({} discount rate, {} terminal growth).",
        format_currency(v.sde_value),
        format_currency(v.ttm_sde),
        config.sde_multiplier,
        format_currency(v.ebitda_value),
        format_currency(v.ttm_ebitda),
        config.ebitda_multiplier,
        format_currency(v.dcf_value),
        format_percent(config.dcf_discount_rate * 100.0),
        format_percent(config.dcf_terminal_growth * 100.0)
    )
}
