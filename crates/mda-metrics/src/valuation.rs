//! Valuation path: EBITDA, SDE, multiples, DCF and scenario projections.
//!
//! EBITDA here starts from the imported `expense` aggregate and adds interest
//! back as a financing cost. This differs from the income statement path in
//! [`crate::income`], where interest stays an operating line item.

use mda_core::{AnalysisError, MonthlyRecord};
use serde::{Deserialize, Serialize};

use crate::growth::{self, year_ago};
use crate::income::{self, total_operating_expense};
use crate::ratios::working_capital;
use crate::{trailing, TTM_MONTHS};

/// Projection years in the discounted cash flow.
pub const DCF_YEARS: i32 = 5;

/// Externally supplied valuation and scenario scalars. Not validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationConfig {
    pub sde_multiplier: f64,
    pub ebitda_multiplier: f64,
    /// Fraction, e.g. 0.25
    pub dcf_discount_rate: f64,
    /// Fraction, e.g. 0.03
    pub dcf_terminal_growth: f64,
    pub best_case_rev_multiplier: f64,
    pub best_case_exp_multiplier: f64,
    pub worst_case_rev_multiplier: f64,
    pub worst_case_exp_multiplier: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            sde_multiplier: 2.5,
            ebitda_multiplier: 4.0,
            dcf_discount_rate: 0.25,
            dcf_terminal_growth: 0.03,
            best_case_rev_multiplier: 1.5,
            best_case_exp_multiplier: 0.8,
            worst_case_rev_multiplier: 0.5,
            worst_case_exp_multiplier: 1.2,
        }
    }
}

impl ValuationConfig {
    /// Read `MDA_*` overrides from the environment, falling back to defaults.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let d = Self::default();
        Ok(Self {
            sde_multiplier: env_or("MDA_SDE_MULTIPLIER", d.sde_multiplier)?,
            ebitda_multiplier: env_or("MDA_EBITDA_MULTIPLIER", d.ebitda_multiplier)?,
            dcf_discount_rate: env_or("MDA_DCF_DISCOUNT_RATE", d.dcf_discount_rate)?,
            dcf_terminal_growth: env_or("MDA_DCF_TERMINAL_GROWTH", d.dcf_terminal_growth)?,
            best_case_rev_multiplier: env_or("MDA_BEST_CASE_REV_MULTIPLIER", d.best_case_rev_multiplier)?,
            best_case_exp_multiplier: env_or("MDA_BEST_CASE_EXP_MULTIPLIER", d.best_case_exp_multiplier)?,
            worst_case_rev_multiplier: env_or("MDA_WORST_CASE_REV_MULTIPLIER", d.worst_case_rev_multiplier)?,
            worst_case_exp_multiplier: env_or("MDA_WORST_CASE_EXP_MULTIPLIER", d.worst_case_exp_multiplier)?,
        })
    }
}

fn env_or(key: &str, default: f64) -> Result<f64, AnalysisError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AnalysisError::InvalidData(format!("{} is not a number: {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}

/// Expense figure used for EBITDA: the imported aggregate, else the line-item sum.
pub fn valuation_expense(record: &MonthlyRecord) -> f64 {
    record.expense.unwrap_or_else(|| total_operating_expense(record))
}

/// revenue - cogs - expense + interest
pub fn ebit(record: &MonthlyRecord) -> f64 {
    record.revenue - record.cogs_total - valuation_expense(record) + record.interest_expense
}

pub fn ebitda(record: &MonthlyRecord) -> f64 {
    ebit(record) + record.depreciation_amortization
}

/// Seller's discretionary earnings: EBITDA plus owner base pay.
pub fn sde(record: &MonthlyRecord) -> f64 {
    ebitda(record) + record.owner_base_pay
}

/// Trailing-twelve inputs and the three valuation estimates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub ttm_ebitda: f64,
    pub ttm_sde: f64,
    pub ttm_net_income: f64,
    pub ttm_depreciation: f64,
    pub change_in_working_capital: f64,
    pub capital_expenditures: f64,
    pub ttm_free_cash_flow: f64,
    /// Fraction applied to free cash flow each projection year
    pub growth_rate: f64,
    pub sde_value: f64,
    pub ebitda_value: f64,
    pub dcf_value: f64,
    /// Present value of each projection year, year 1 first
    pub dcf_projection: Vec<f64>,
    pub terminal_value: f64,
    pub discounted_terminal_value: f64,
}

/// Value the company from its last twelve months. Needs 12 records.
pub fn value_company(records: &[MonthlyRecord], config: &ValuationConfig) -> Result<Valuation, AnalysisError> {
    if records.len() < TTM_MONTHS {
        return Err(AnalysisError::needs_months(TTM_MONTHS, records.len()));
    }
    let window = trailing(records, TTM_MONTHS);
    let latest = &records[records.len() - 1];
    let prior = year_ago(records).unwrap_or(latest);

    let ttm_ebitda: f64 = window.iter().map(ebitda).sum();
    let ttm_owner_pay: f64 = window.iter().map(|r| r.owner_base_pay).sum();
    let ttm_sde = ttm_ebitda + ttm_owner_pay;
    let ttm_net_income: f64 = window.iter().map(income::net_income).sum();
    let ttm_depreciation: f64 = window.iter().map(|r| r.depreciation_amortization).sum();

    let change_in_working_capital =
        working_capital(latest.tca, latest.tcl) - working_capital(prior.tca, prior.tcl);
    let change_in_fixed_assets = latest.fixed_assets - prior.fixed_assets;
    let capital_expenditures = (change_in_fixed_assets + ttm_depreciation).max(0.0);
    let ttm_free_cash_flow =
        ttm_net_income + ttm_depreciation - change_in_working_capital - capital_expenditures;

    let growth_rate = growth::revenue_growth_24m(records) / 100.0;
    let dcf = discounted_cash_flow(
        ttm_free_cash_flow,
        growth_rate,
        config.dcf_discount_rate,
        config.dcf_terminal_growth,
    );

    tracing::debug!(
        ttm_ebitda,
        ttm_sde,
        ttm_free_cash_flow,
        growth_rate,
        "valuation inputs"
    );

    Ok(Valuation {
        ttm_ebitda,
        ttm_sde,
        ttm_net_income,
        ttm_depreciation,
        change_in_working_capital,
        capital_expenditures,
        ttm_free_cash_flow,
        growth_rate,
        sde_value: ttm_sde * config.sde_multiplier,
        ebitda_value: ttm_ebitda * config.ebitda_multiplier,
        dcf_value: dcf.value,
        dcf_projection: dcf.projection,
        terminal_value: dcf.terminal_value,
        discounted_terminal_value: dcf.discounted_terminal_value,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct DcfResult {
    pub value: f64,
    pub projection: Vec<f64>,
    pub terminal_value: f64,
    pub discounted_terminal_value: f64,
}

/// Five-year DCF with a Gordon-growth terminal value.
///
/// Terminal value is zero when `discount_rate <= terminal_growth`.
pub fn discounted_cash_flow(
    free_cash_flow: f64,
    growth_rate: f64,
    discount_rate: f64,
    terminal_growth: f64,
) -> DcfResult {
    let projection: Vec<f64> = (1..=DCF_YEARS)
        .map(|year| {
            free_cash_flow * (1.0_f64 + growth_rate).powi(year) / (1.0_f64 + discount_rate).powi(year)
        })
        .collect();

    let final_year_fcf = free_cash_flow * (1.0_f64 + growth_rate).powi(DCF_YEARS);
    let terminal_value = if discount_rate > terminal_growth {
        final_year_fcf * (1.0 + terminal_growth) / (discount_rate - terminal_growth)
    } else {
        0.0
    };
    let discount_factor = (1.0_f64 + discount_rate).powi(DCF_YEARS);
    let discounted_terminal_value = if discount_factor != 0.0 {
        terminal_value / discount_factor
    } else {
        0.0
    };

    DcfResult {
        value: projection.iter().sum::<f64>() + discounted_terminal_value,
        projection,
        terminal_value,
        discounted_terminal_value,
    }
}

/// Next-year projection under one set of growth assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub label: String,
    /// Percent
    pub revenue_growth: f64,
    /// Percent
    pub expense_growth: f64,
    pub projected_revenue: f64,
    pub projected_expenses: f64,
    pub projected_profit: f64,
}

/// Base, best and worst case projections from trailing-twelve revenue and expenses.
///
/// Best and worst cases scale the base growth rates by the configured multipliers.
pub fn project_scenarios(
    records: &[MonthlyRecord],
    config: &ValuationConfig,
) -> Result<Vec<ScenarioProjection>, AnalysisError> {
    if records.len() < TTM_MONTHS {
        return Err(AnalysisError::needs_months(TTM_MONTHS, records.len()));
    }
    let window = trailing(records, TTM_MONTHS);
    let ttm_revenue: f64 = window.iter().map(|r| r.revenue).sum();
    let ttm_expenses: f64 = window.iter().map(income::total_expenses).sum();
    let base_revenue_growth = growth::revenue_growth_24m(records);
    let base_expense_growth = growth::expense_growth_24m(records);

    let scenario = |label: &str, rev_mult: f64, exp_mult: f64| {
        let revenue_growth = base_revenue_growth * rev_mult;
        let expense_growth = base_expense_growth * exp_mult;
        let projected_revenue = ttm_revenue * (1.0 + revenue_growth / 100.0);
        let projected_expenses = ttm_expenses * (1.0 + expense_growth / 100.0);
        ScenarioProjection {
            label: label.to_string(),
            revenue_growth,
            expense_growth,
            projected_revenue,
            projected_expenses,
            projected_profit: projected_revenue - projected_expenses,
        }
    };

    Ok(vec![
        scenario("Base Case", 1.0, 1.0),
        scenario("Best Case", config.best_case_rev_multiplier, config.best_case_exp_multiplier),
        scenario("Worst Case", config.worst_case_rev_multiplier, config.worst_case_exp_multiplier),
    ])
}
