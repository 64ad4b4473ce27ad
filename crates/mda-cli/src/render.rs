//! Plain-text rendering of a report.

use std::fmt::Write;

use mda_metrics::{format_currency, format_percent};
use mda_narrative::MdaReport;

pub fn render_text(company_id: &str, report: &MdaReport) -> String {
    let mut out = String::new();
    let latest = report
        .latest_month
        .map(|m| m.format("%B %Y").to_string())
        .unwrap_or_else(|| "no data".to_string());

    // writeln! into a String cannot fail
    let _ = writeln!(out, "MD&A report: {} ({} months, latest {})", company_id, report.months, latest);
    let _ = writeln!(
        out,
        "Score {:.0}/100 (profitability {:.0}, growth {:.0}, asset development {:.0})",
        report.scores.final_score,
        report.scores.profitability_score,
        report.scores.growth_score,
        report.scores.asset_development_score
    );

    push_list(&mut out, "Strengths", &report.analysis.strengths);
    push_list(&mut out, "Weaknesses", &report.analysis.weaknesses);
    push_list(&mut out, "Insights", &report.analysis.insights);

    let _ = writeln!(out, "\nCritical review");
    if report.critical_review.is_empty() {
        let _ = writeln!(out, "  no issues flagged");
    }
    for issue in &report.critical_review {
        let _ = writeln!(out, "  [{}] {}: {}", issue.severity.as_str(), issue.title, issue.description);
    }

    let sections = &report.sections;
    for (title, body) in [
        ("Margins", &sections.ttm_margins),
        ("Growth", &sections.growth),
        ("Equity", &sections.equity_trend),
        ("Cash flow", &sections.cash_flow),
        ("Valuation", &sections.valuation),
    ] {
        let _ = writeln!(out, "\n{}\n  {}", title, body);
    }

    if !report.scenarios.is_empty() {
        let _ = writeln!(out, "\nScenarios (next twelve months)");
        for s in &report.scenarios {
            let _ = writeln!(
                out,
                "  {:<10} revenue {} ({}), expenses {} ({}), profit {}",
                s.label,
                format_currency(s.projected_revenue),
                format_percent(s.revenue_growth),
                format_currency(s.projected_expenses),
                format_percent(s.expense_growth),
                format_currency(s.projected_profit)
            );
        }
    }

    if !report.expense_goals.is_empty() {
        let _ = writeln!(out, "\nExpense goals");
        for goal in &report.expense_goals {
            let _ = writeln!(
                out,
                "  {:<28} actual {} vs target {}{}",
                goal.category.label(),
                format_percent(goal.actual_pct),
                format_percent(goal.target_pct),
                if goal.over_goal { "  OVER" } else { "" }
            );
        }
    }

    out
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "\n{}", title);
    if items.is_empty() {
        let _ = writeln!(out, "  none");
    }
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mda_core::{BenchmarkSet, MonthlyRecord};
    use mda_metrics::ValuationConfig;
    use mda_narrative::generate_report;

    #[test]
    fn empty_report_renders_placeholders() {
        let report = generate_report(&[], &BenchmarkSet::default(), &ValuationConfig::default(), &[]);
        let text = render_text("acme", &report);
        assert!(text.starts_with("MD&A report: acme (0 months, latest no data)"));
        assert!(text.contains("no issues flagged"));
        assert!(text.contains("Valuation requires 12+ months of data."));
        assert!(!text.contains("Scenarios"));
    }

    #[test]
    fn scenario_labels_are_aligned() {
        let start = chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let records: Vec<MonthlyRecord> = (0..12)
            .map(|i| {
                let mut record = MonthlyRecord::new(start + chrono::Months::new(i));
                record.revenue = 10_000.0;
                record.cogs_total = 6_000.0;
                record
            })
            .collect();
        let report = generate_report(&records, &BenchmarkSet::default(), &ValuationConfig::default(), &[]);
        let text = render_text("acme", &report);
        assert!(text.contains("  Base Case  revenue"));
        assert!(text.contains("  Best Case  revenue"));
        assert!(text.contains("  Worst Case revenue"));
    }
}
