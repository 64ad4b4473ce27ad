use chrono::NaiveDate;
use mda_core::{BenchmarkSet, CriticalReviewIssue, MdaAnalysis, MonthlyRecord, TrendDataPoint};
use mda_metrics::income::{evaluate_expense_goals, ExpenseGoal, ExpenseGoalStatus, IncomeStatement};
use mda_metrics::valuation::{project_scenarios, value_company};
use mda_metrics::{build_trend, ScenarioProjection, ScoreSummary, Valuation, ValuationConfig, TTM_MONTHS};
use serde::{Deserialize, Serialize};

use crate::context::NarrativeContext;
use crate::review::critical_review;
use crate::rules::generate_analysis;
use crate::sections::ReportSections;

/// Balance sheets further than this from `assets = liabilities + equity` are logged.
const BALANCE_TOLERANCE: f64 = 1.0;

/// Everything the presentation layer renders for one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdaReport {
    pub months: usize,
    pub latest_month: Option<NaiveDate>,
    pub trend: Vec<TrendDataPoint>,
    pub scores: ScoreSummary,
    pub analysis: MdaAnalysis,
    pub critical_review: Vec<CriticalReviewIssue>,
    pub sections: ReportSections,
    pub ttm_income_statement: Option<IncomeStatement>,
    pub valuation: Option<Valuation>,
    pub scenarios: Vec<ScenarioProjection>,
    pub expense_goals: Vec<ExpenseGoalStatus>,
}

/// Compute the full report from a record series ordered oldest to newest.
pub fn generate_report(
    records: &[MonthlyRecord],
    benchmarks: &BenchmarkSet,
    config: &ValuationConfig,
    expense_goals: &[ExpenseGoal],
) -> MdaReport {
    for record in records {
        let gap = record.balance_gap();
        if gap.abs() > BALANCE_TOLERANCE {
            tracing::warn!(month = %record.month, gap, "balance sheet does not balance");
        }
    }

    let trend = build_trend(records);
    let scores = ScoreSummary::from_records(records);
    let ctx = NarrativeContext::new(records, &trend, benchmarks, &scores);
    let analysis = generate_analysis(&ctx);
    let review = critical_review(records);

    let valuation = value_company(records, config);
    if let Err(e) = &valuation {
        tracing::debug!("valuation skipped: {}", e);
    }
    let sections = ReportSections::build(records, &valuation, config);
    let scenarios = project_scenarios(records, config).unwrap_or_default();

    tracing::debug!(
        months = records.len(),
        strengths = analysis.strengths.len(),
        weaknesses = analysis.weaknesses.len(),
        insights = analysis.insights.len(),
        issues = review.len(),
        "report assembled"
    );

    MdaReport {
        months: records.len(),
        latest_month: records.last().map(|r| r.month),
        ttm_income_statement: (records.len() >= TTM_MONTHS).then(|| IncomeStatement::ttm(records)),
        expense_goals: evaluate_expense_goals(records, expense_goals),
        trend,
        scores,
        analysis,
        critical_review: review,
        sections,
        valuation: valuation.ok(),
        scenarios,
    }
}
