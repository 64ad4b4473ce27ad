//! Critical review: severity-tagged risk flags over the record series.
//!
//! Period comparisons use the latest `w` months against the `w` months before,
//! with `w = min(12, len / 2)`. A single-month series compares the month with
//! itself, so every change is 0%.

use mda_core::stats::{coefficient_of_variation, safe_div};
use mda_core::{CriticalReviewIssue, IssueCategory, MonthlyRecord, Severity};
use mda_metrics::growth::{growth_rate, year_ago};
use mda_metrics::income::total_expenses;
use mda_metrics::ratios::{current_ratio, debt_to_equity_for_review};
use mda_metrics::{format_currency, format_percent, trailing, TTM_MONTHS};

const REVENUE_DECLINE_PCT: f64 = -5.0;
const REVENUE_CV_PCT: f64 = 25.0;
const EXPENSE_GROWTH_GAP_PP: f64 = 5.0;
const EXPENSE_RATIO_PCT: f64 = 90.0;
const EXPENSE_RATIO_RISE_PP: f64 = 5.0;
const CURRENT_RATIO_CRITICAL: f64 = 1.0;
const CURRENT_RATIO_WATCH: f64 = 1.2;
const CASH_DECLINE_PCT: f64 = -20.0;
const MAX_DEBT_TO_EQUITY: f64 = 2.0;

struct Periods<'a> {
    months: usize,
    current: &'a [MonthlyRecord],
    prior: &'a [MonthlyRecord],
}

impl<'a> Periods<'a> {
    fn split(records: &'a [MonthlyRecord]) -> Option<Self> {
        let len = records.len();
        if len == 0 {
            return None;
        }
        if len < 2 {
            return Some(Self { months: 1, current: records, prior: records });
        }
        let w = (len / 2).min(TTM_MONTHS);
        Some(Self {
            months: w,
            current: &records[len - w..],
            prior: &records[len - 2 * w..len - w],
        })
    }

    fn sums(&self, accessor: impl Fn(&MonthlyRecord) -> f64) -> (f64, f64) {
        (
            self.current.iter().map(&accessor).sum(),
            self.prior.iter().map(&accessor).sum(),
        )
    }
}

/// Scan the series for risk flags, in a fixed order.
pub fn critical_review(records: &[MonthlyRecord]) -> Vec<CriticalReviewIssue> {
    let mut issues = Vec::new();
    let Some(periods) = Periods::split(records) else {
        return issues;
    };
    let Some(latest) = records.last() else {
        return issues;
    };

    let (revenue_now, revenue_before) = periods.sums(|r| r.revenue);
    let (expense_now, expense_before) = periods.sums(total_expenses);
    let revenue_change = growth_rate(revenue_now, revenue_before);
    let expense_change = growth_rate(expense_now, expense_before);

    if revenue_change < REVENUE_DECLINE_PCT {
        issues.push(CriticalReviewIssue {
            category: IssueCategory::Revenue,
            severity: Severity::High,
            title: "Revenue Decline".to_string(),
            description: format!(
                "Revenue fell {} over the last {} months compared with the {} months before",
                format_percent(revenue_change.abs()),
                periods.months,
                periods.months
            ),
            metric: Some(revenue_change),
        });
    }

    let monthly_revenue: Vec<f64> = trailing(records, TTM_MONTHS).iter().map(|r| r.revenue).collect();
    let volatility = coefficient_of_variation(&monthly_revenue);
    if volatility > REVENUE_CV_PCT {
        issues.push(CriticalReviewIssue {
            category: IssueCategory::Revenue,
            severity: Severity::Medium,
            title: "Revenue Volatility".to_string(),
            description: format!(
                "Monthly revenue varies by {} around its average, making cash planning harder",
                format_percent(volatility)
            ),
            metric: Some(volatility),
        });
    }

    // no expense history means there is no growth to compare
    let growth_gap = expense_change - revenue_change;
    if expense_before > 0.0 && growth_gap > EXPENSE_GROWTH_GAP_PP {
        issues.push(CriticalReviewIssue {
            category: IssueCategory::Expenses,
            severity: Severity::High,
            title: "Expenses Outpacing Revenue".to_string(),
            description: format!(
                "Expenses grew {} while revenue changed {}",
                format_percent(expense_change),
                format_percent(revenue_change)
            ),
            metric: Some(growth_gap),
        });
    }

    let ratio_now = safe_div(expense_now, revenue_now) * 100.0;
    let ratio_before = safe_div(expense_before, revenue_before) * 100.0;
    if ratio_now > EXPENSE_RATIO_PCT {
        issues.push(CriticalReviewIssue {
            category: IssueCategory::Expenses,
            severity: Severity::High,
            title: "High Expense Ratio".to_string(),
            description: format!(
                "Expenses consume {} of revenue, leaving little margin",
                format_percent(ratio_now)
            ),
            metric: Some(ratio_now),
        });
    } else if ratio_now - ratio_before > EXPENSE_RATIO_RISE_PP {
        issues.push(CriticalReviewIssue {
            category: IssueCategory::Expenses,
            severity: Severity::Medium,
            title: "Rising Expense Ratio".to_string(),
            description: format!(
                "Expenses rose from {} to {} of revenue",
                format_percent(ratio_before),
                format_percent(ratio_now)
            ),
            metric: Some(ratio_now - ratio_before),
        });
    }

    if latest.tcl != 0.0 {
        let ratio = current_ratio(latest.tca, latest.tcl);
        if ratio < CURRENT_RATIO_CRITICAL {
            issues.push(CriticalReviewIssue {
                category: IssueCategory::Liquidity,
                severity: Severity::High,
                title: "Liquidity Shortfall".to_string(),
                description: format!(
                    "Current ratio of {:.2} means current liabilities exceed current assets",
                    ratio
                ),
                metric: Some(ratio),
            });
        } else if ratio < CURRENT_RATIO_WATCH {
            issues.push(CriticalReviewIssue {
                category: IssueCategory::Liquidity,
                severity: Severity::Medium,
                title: "Thin Liquidity".to_string(),
                description: format!("Current ratio of {:.2} leaves a narrow safety margin", ratio),
                metric: Some(ratio),
            });
        }
    }

    if let Some(prior) = year_ago(records) {
        let cash_change = growth_rate(latest.cash, prior.cash);
        if cash_change < CASH_DECLINE_PCT {
            issues.push(CriticalReviewIssue {
                category: IssueCategory::Cash,
                severity: Severity::High,
                title: "Cash Decline".to_string(),
                description: format!(
                    "Cash fell {} year over year, from {} to {}",
                    format_percent(cash_change.abs()),
                    format_currency(prior.cash),
                    format_currency(latest.cash)
                ),
                metric: Some(cash_change),
            });
        }
    }

    if latest.total_equity < 0.0 {
        issues.push(CriticalReviewIssue {
            category: IssueCategory::Equity,
            severity: Severity::High,
            title: "Negative Equity".to_string(),
            description: format!(
                "Total equity is {}: the business owes more than it owns",
                format_currency(latest.total_equity)
            ),
            metric: Some(latest.total_equity),
        });
    }

    if latest.total_liab > 0.0 {
        let debt_to_equity = debt_to_equity_for_review(latest.total_liab, latest.total_equity);
        if debt_to_equity > MAX_DEBT_TO_EQUITY {
            let description = if latest.total_equity > 0.0 {
                format!("Debt-to-equity of {:.2} exceeds the 2.0 comfort level", debt_to_equity)
            } else {
                "Liabilities with no positive equity behind them".to_string()
            };
            issues.push(CriticalReviewIssue {
                category: IssueCategory::Leverage,
                severity: Severity::High,
                title: "High Leverage".to_string(),
                description,
                metric: Some(debt_to_equity),
            });
        }
    }

    issues
}
