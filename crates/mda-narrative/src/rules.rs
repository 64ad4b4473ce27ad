//! Threshold rules behind the strengths / weaknesses / insights lists.
//!
//! Each rule is independent and looks at the context on its own. The table
//! order is the order statements appear in the output.

use mda_core::stats::{linear_slope, mean, safe_div};
use mda_core::{BenchmarkMetric, MdaAnalysis};
use mda_metrics::growth::{expense_growth_24m, growth_rate, revenue_growth_24m, year_ago};
use mda_metrics::income::IncomeStatement;
use mda_metrics::ratios::{cash_conversion_cycle, wc_ratio, working_capital};
use mda_metrics::{format_currency, format_percent, trailing, TTM_MONTHS, TWO_YEAR_MONTHS};
use serde::{Deserialize, Serialize};

use crate::context::NarrativeContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingKind {
    Strength,
    Weakness,
    Insight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub text: String,
}

impl Finding {
    fn strength(text: String) -> Option<Self> {
        Some(Self { kind: FindingKind::Strength, text })
    }

    fn weakness(text: String) -> Option<Self> {
        Some(Self { kind: FindingKind::Weakness, text })
    }

    fn insight(text: String) -> Option<Self> {
        Some(Self { kind: FindingKind::Insight, text })
    }
}

/// A named predicate producing at most one statement
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub evaluate: fn(&NarrativeContext) -> Option<Finding>,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

pub const RULES: &[Rule] = &[
    Rule { name: "overall_score", evaluate: overall_score },
    Rule { name: "profitability_score", evaluate: profitability_score },
    Rule { name: "revenue_growth_24m", evaluate: revenue_growth_two_year },
    Rule { name: "expense_revenue_spread", evaluate: expense_revenue_spread },
    Rule { name: "asset_development_score", evaluate: asset_development_score },
    Rule { name: "current_ratio", evaluate: current_ratio },
    Rule { name: "quick_ratio", evaluate: quick_ratio },
    Rule { name: "return_on_equity", evaluate: return_on_equity },
    Rule { name: "debt_to_net_worth", evaluate: debt_to_net_worth },
    Rule { name: "interest_coverage", evaluate: interest_coverage },
    Rule { name: "ttm_margins", evaluate: ttm_margins },
    Rule { name: "revenue_trend_12m", evaluate: revenue_trend },
    Rule { name: "revenue_projection", evaluate: revenue_projection },
    Rule { name: "equity_trend", evaluate: equity_trend },
    Rule { name: "growth_momentum", evaluate: growth_momentum },
    Rule { name: "working_capital", evaluate: working_capital_position },
    Rule { name: "days_ar", evaluate: days_ar },
    Rule { name: "days_inventory", evaluate: days_inventory },
    Rule { name: "days_ap", evaluate: days_ap },
    Rule { name: "cash_conversion_cycle", evaluate: cash_conversion },
    Rule { name: "asset_turnover", evaluate: asset_turnover },
    Rule { name: "ebitda_margin", evaluate: ebitda_margin },
    Rule { name: "cash_yoy", evaluate: cash_year_over_year },
    Rule { name: "benchmark_current_ratio", evaluate: benchmark_current_ratio },
    Rule { name: "benchmark_quick_ratio", evaluate: benchmark_quick_ratio },
    Rule { name: "benchmark_debt_to_net_worth", evaluate: benchmark_debt_to_net_worth },
    Rule { name: "benchmark_roe", evaluate: benchmark_roe },
    Rule { name: "benchmark_roa", evaluate: benchmark_roa },
    Rule { name: "benchmark_asset_turnover", evaluate: benchmark_asset_turnover },
];

/// Run every rule in table order.
pub fn generate_analysis(ctx: &NarrativeContext) -> MdaAnalysis {
    let mut analysis = MdaAnalysis::default();
    for rule in RULES {
        if let Some(finding) = (rule.evaluate)(ctx) {
            tracing::trace!(rule = rule.name, kind = ?finding.kind, "rule fired");
            match finding.kind {
                FindingKind::Strength => analysis.strengths.push(finding.text),
                FindingKind::Weakness => analysis.weaknesses.push(finding.text),
                FindingKind::Insight => analysis.insights.push(finding.text),
            }
        }
    }
    analysis
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

fn overall_score(ctx: &NarrativeContext) -> Option<Finding> {
    let score = ctx.scores.final_score;
    if score >= 70.0 {
        Finding::strength(format!("Strong overall financial score of {:.0}/100", score))
    } else if score < 50.0 {
        Finding::weakness(format!(
            "Overall financial score of {:.0}/100 is below the healthy range",
            score
        ))
    } else {
        None
    }
}

fn profitability_score(ctx: &NarrativeContext) -> Option<Finding> {
    let score = ctx.scores.profitability_score;
    if score >= 70.0 {
        Finding::strength(format!("Profitability score of {:.0}/100 reflects healthy margins", score))
    } else if score < 50.0 {
        Finding::weakness(format!("Profitability score of {:.0}/100 signals weak margins", score))
    } else {
        None
    }
}

fn asset_development_score(ctx: &NarrativeContext) -> Option<Finding> {
    let score = ctx.scores.asset_development_score;
    if score >= 70.0 {
        Finding::strength(format!(
            "Asset development score of {:.0}/100 shows a solid balance sheet",
            score
        ))
    } else if score < 50.0 {
        Finding::weakness(format!(
            "Asset development score of {:.0}/100 points to a thin balance sheet",
            score
        ))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Growth (24-month gated)
// ---------------------------------------------------------------------------

fn revenue_growth_two_year(ctx: &NarrativeContext) -> Option<Finding> {
    if !ctx.has_months(TWO_YEAR_MONTHS) {
        return None;
    }
    let growth = revenue_growth_24m(ctx.records);
    if growth >= 10.0 {
        Finding::strength(format!(
            "Revenue grew {} over the trailing twelve months versus the prior year",
            format_percent(growth)
        ))
    } else if growth < 0.0 {
        Finding::weakness(format!(
            "Revenue declined {} over the trailing twelve months versus the prior year",
            format_percent(growth.abs())
        ))
    } else {
        Finding::insight(format!(
            "Revenue grew a modest {} year over year",
            format_percent(growth)
        ))
    }
}

fn expense_revenue_spread(ctx: &NarrativeContext) -> Option<Finding> {
    if !ctx.has_months(TWO_YEAR_MONTHS) {
        return None;
    }
    let spread = revenue_growth_24m(ctx.records) - expense_growth_24m(ctx.records);
    if spread >= 5.0 {
        Finding::strength(format!(
            "Revenue growth outpaced expense growth by {:.1} percentage points",
            spread
        ))
    } else if spread <= -5.0 {
        Finding::weakness(format!(
            "Expenses grew {:.1} percentage points faster than revenue",
            spread.abs()
        ))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Liquidity, returns and leverage
// ---------------------------------------------------------------------------

fn current_ratio(ctx: &NarrativeContext) -> Option<Finding> {
    let ratio = ctx.latest_point()?.current_ratio;
    if ratio <= 0.0 {
        return None;
    }
    if ratio >= 2.0 {
        Finding::strength(format!("Current ratio of {:.2} shows strong short-term liquidity", ratio))
    } else if ratio < 1.0 {
        Finding::weakness(format!(
            "Current ratio of {:.2} means current liabilities exceed current assets",
            ratio
        ))
    } else {
        None
    }
}

fn quick_ratio(ctx: &NarrativeContext) -> Option<Finding> {
    let ratio = ctx.latest_point()?.quick_ratio;
    if ratio <= 0.0 {
        return None;
    }
    if ratio >= 1.0 {
        Finding::strength(format!(
            "Quick ratio of {:.2} covers current liabilities without selling inventory",
            ratio
        ))
    } else if ratio < 0.5 {
        Finding::weakness(format!("Quick ratio of {:.2} leaves little liquid cushion", ratio))
    } else {
        None
    }
}

fn return_on_equity(ctx: &NarrativeContext) -> Option<Finding> {
    let record = ctx.latest_record()?;
    if record.total_equity <= 0.0 {
        return None;
    }
    let roe = ctx.latest_point()?.roe;
    if roe >= 15.0 {
        Finding::strength(format!("Return on equity of {} rewards owners well", format_percent(roe)))
    } else if roe < 5.0 {
        Finding::weakness(format!("Return on equity of {} is below expectations", format_percent(roe)))
    } else {
        None
    }
}

fn debt_to_net_worth(ctx: &NarrativeContext) -> Option<Finding> {
    let record = ctx.latest_record()?;
    if record.total_equity <= 0.0 && record.total_liab > 0.0 {
        return Finding::weakness("Negative net worth: liabilities exceed total assets".to_string());
    }
    if record.total_equity <= 0.0 {
        return None;
    }
    let ratio = ctx.latest_point()?.debt_to_net_worth;
    if ratio < 1.0 {
        Finding::strength(format!("Conservative leverage with debt-to-net-worth of {:.2}", ratio))
    } else if ratio > 3.0 {
        Finding::weakness(format!("High leverage with debt-to-net-worth of {:.2}", ratio))
    } else {
        None
    }
}

fn interest_coverage(ctx: &NarrativeContext) -> Option<Finding> {
    let interest: f64 = trailing(ctx.records, TTM_MONTHS)
        .iter()
        .map(|r| r.interest_expense)
        .sum();
    if interest <= 0.0 {
        return None;
    }
    let coverage = ctx.latest_point()?.interest_coverage;
    if coverage >= 3.0 {
        Finding::strength(format!("Earnings cover interest expense {:.1}x", coverage))
    } else if coverage < 1.5 {
        Finding::weakness(format!(
            "Interest coverage of {:.1}x leaves little room to service debt",
            coverage
        ))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Trends (12-month gated)
// ---------------------------------------------------------------------------

fn ttm_margins(ctx: &NarrativeContext) -> Option<Finding> {
    if !ctx.has_months(TTM_MONTHS) {
        return None;
    }
    let ttm = IncomeStatement::ttm(ctx.records);
    if ttm.revenue <= 0.0 {
        return None;
    }
    Finding::insight(format!(
        "Trailing twelve months: {} revenue, {} gross margin, {} net margin",
        format_currency(ttm.revenue),
        format_percent(ttm.gross_margin),
        format_percent(ttm.net_margin)
    ))
}

fn last_twelve_revenue(ctx: &NarrativeContext) -> Vec<f64> {
    trailing(ctx.records, TTM_MONTHS).iter().map(|r| r.revenue).collect()
}

fn revenue_trend(ctx: &NarrativeContext) -> Option<Finding> {
    if !ctx.has_months(TTM_MONTHS) {
        return None;
    }
    let revenue = last_twelve_revenue(ctx);
    let slope = linear_slope(&revenue);
    let average = mean(&revenue);
    // under 1% of the average month counts as flat
    if average == 0.0 || safe_div(slope.abs(), average.abs()) < 0.01 {
        return Finding::insight("Monthly revenue has been flat over the last 12 months".to_string());
    }
    let direction = if slope > 0.0 { "upward" } else { "downward" };
    Finding::insight(format!(
        "Monthly revenue is trending {} by about {} per month over the last 12 months",
        direction,
        format_currency(slope.abs())
    ))
}

fn revenue_projection(ctx: &NarrativeContext) -> Option<Finding> {
    if !ctx.has_months(TTM_MONTHS) {
        return None;
    }
    let revenue = last_twelve_revenue(ctx);
    let ttm: f64 = revenue.iter().sum();
    if ttm <= 0.0 {
        return None;
    }
    let slope = linear_slope(&revenue);
    let x_mean = (revenue.len() - 1) as f64 / 2.0;
    let intercept = mean(&revenue) - slope * x_mean;
    let start = revenue.len();
    let projected: f64 = (start..start + TTM_MONTHS)
        .map(|x| (intercept + slope * x as f64).max(0.0))
        .sum();
    Finding::insight(format!(
        "At the current trend, revenue over the next 12 months projects to {} ({} versus the trailing twelve)",
        format_currency(projected),
        signed_percent(growth_rate(projected, ttm))
    ))
}

fn equity_trend(ctx: &NarrativeContext) -> Option<Finding> {
    if !ctx.has_months(TTM_MONTHS) {
        return None;
    }
    let latest = ctx.latest_record()?;
    let prior = year_ago(ctx.records)?;
    let change = latest.total_equity - prior.total_equity;
    if change > 0.0 {
        Finding::strength(format!(
            "Owner's equity increased {} over the past year to {}",
            format_currency(change),
            format_currency(latest.total_equity)
        ))
    } else if change < 0.0 {
        Finding::weakness(format!(
            "Owner's equity decreased {} over the past year to {}",
            format_currency(change.abs()),
            format_currency(latest.total_equity)
        ))
    } else {
        None
    }
}

fn growth_momentum(ctx: &NarrativeContext) -> Option<Finding> {
    if ctx.trend.len() < 4 {
        return None;
    }
    let latest = ctx.trend[ctx.trend.len() - 1].revenue_growth_score;
    let earlier = ctx.trend[ctx.trend.len() - 4].revenue_growth_score;
    let delta = latest - earlier;
    if delta >= 10.0 {
        Finding::insight(format!(
            "Revenue growth momentum is accelerating (growth score up {:.0} points in 3 months)",
            delta
        ))
    } else if delta <= -10.0 {
        Finding::insight(format!(
            "Revenue growth momentum is slowing (growth score down {:.0} points in 3 months)",
            delta.abs()
        ))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Working capital and activity
// ---------------------------------------------------------------------------

fn working_capital_position(ctx: &NarrativeContext) -> Option<Finding> {
    let record = ctx.latest_record()?;
    if record.tca == 0.0 && record.tcl == 0.0 {
        return None;
    }
    let wc = working_capital(record.tca, record.tcl);
    let ratio = wc_ratio(record.tca, record.tcl);
    if ratio >= 1.5 {
        Finding::strength(format!(
            "Healthy positive working capital of {} (ratio {:.2})",
            format_currency(wc),
            ratio
        ))
    } else if wc < 0.0 {
        Finding::weakness(format!(
            "Negative working capital of {}: short-term obligations exceed current assets",
            format_currency(wc.abs())
        ))
    } else {
        Finding::insight(format!(
            "Working capital of {} provides a thin cushion (ratio {:.2})",
            format_currency(wc),
            ratio
        ))
    }
}

fn days_ar(ctx: &NarrativeContext) -> Option<Finding> {
    let days = ctx.latest_point()?.days_ar;
    if days <= 0.0 {
        return None;
    }
    if days <= 30.0 {
        Finding::strength(format!("Customers pay in {:.0} days on average", days))
    } else if days > 60.0 {
        Finding::weakness(format!("Receivables take {:.0} days to collect", days))
    } else {
        None
    }
}

fn days_inventory(ctx: &NarrativeContext) -> Option<Finding> {
    let days = ctx.latest_point()?.days_inventory;
    if days <= 0.0 {
        return None;
    }
    if days <= 30.0 {
        Finding::strength(format!("Inventory turns quickly at {:.0} days on hand", days))
    } else if days > 90.0 {
        Finding::weakness(format!("Inventory sits {:.0} days on average, tying up cash", days))
    } else {
        None
    }
}

fn days_ap(ctx: &NarrativeContext) -> Option<Finding> {
    let days = ctx.latest_point()?.days_ap;
    if days <= 0.0 {
        return None;
    }
    if days > 60.0 {
        Finding::weakness(format!("Payables are outstanding {:.0} days, which may strain vendors", days))
    } else if days <= 30.0 {
        Finding::insight(format!("Vendors are paid promptly, in {:.0} days on average", days))
    } else {
        None
    }
}

fn cash_conversion(ctx: &NarrativeContext) -> Option<Finding> {
    let point = ctx.latest_point()?;
    if point.days_ar <= 0.0 && point.days_inventory <= 0.0 && point.days_ap <= 0.0 {
        return None;
    }
    let ccc = cash_conversion_cycle(point.days_inventory, point.days_ar, point.days_ap);
    if ccc < 30.0 {
        Finding::strength(format!("Cash conversion cycle of {:.0} days keeps cash moving", ccc))
    } else if ccc > 90.0 {
        Finding::weakness(format!("Cash conversion cycle of {:.0} days ties up working capital", ccc))
    } else {
        None
    }
}

fn asset_turnover(ctx: &NarrativeContext) -> Option<Finding> {
    let turnover = ctx.latest_point()?.total_asset_turnover;
    if turnover <= 0.0 {
        return None;
    }
    if turnover >= 2.0 {
        Finding::strength(format!("Assets generate {:.2}x their value in annual revenue", turnover))
    } else if turnover < 0.5 {
        Finding::weakness(format!("Asset turnover of {:.2}x suggests underused assets", turnover))
    } else {
        None
    }
}

fn ebitda_margin(ctx: &NarrativeContext) -> Option<Finding> {
    let revenue: f64 = trailing(ctx.records, TTM_MONTHS).iter().map(|r| r.revenue).sum();
    if revenue <= 0.0 {
        return None;
    }
    let margin = ctx.latest_point()?.ebitda_margin;
    if margin >= 15.0 {
        Finding::strength(format!("EBITDA margin of {} shows strong operating earnings", format_percent(margin)))
    } else if margin < 5.0 {
        Finding::weakness(format!("EBITDA margin of {} is thin", format_percent(margin)))
    } else {
        None
    }
}

fn cash_year_over_year(ctx: &NarrativeContext) -> Option<Finding> {
    if ctx.records.len() < 2 {
        return None;
    }
    let latest = ctx.latest_record()?;
    let prior = year_ago(ctx.records)?;
    let change = growth_rate(latest.cash, prior.cash);
    if change >= 10.0 {
        Finding::strength(format!(
            "Cash increased {} year over year to {}",
            format_percent(change),
            format_currency(latest.cash)
        ))
    } else if change <= -20.0 {
        Finding::weakness(format!(
            "Cash declined {} year over year to {}",
            format_percent(change.abs()),
            format_currency(latest.cash)
        ))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Industry benchmarks
// ---------------------------------------------------------------------------

/// Band above which a metric counts as a strength (below, for lower-is-better).
const BENCHMARK_STRENGTH_BAND: f64 = 0.20;
/// Band beyond which a metric counts as a weakness.
const BENCHMARK_WEAKNESS_BAND: f64 = 0.30;

fn compare_benchmark(ctx: &NarrativeContext, metric: BenchmarkMetric) -> Option<Finding> {
    let benchmark = ctx.benchmarks.get(metric)?;
    if benchmark <= 0.0 || !benchmark.is_finite() {
        return None;
    }
    let point = ctx.latest_point()?;
    let actual = match metric {
        BenchmarkMetric::CurrentRatio => point.current_ratio,
        BenchmarkMetric::QuickRatio => point.quick_ratio,
        BenchmarkMetric::DebtToNetWorth => point.debt_to_net_worth,
        BenchmarkMetric::ReturnOnEquity => point.roe,
        BenchmarkMetric::ReturnOnAssets => point.roa,
        BenchmarkMetric::TotalAssetTurnover => point.total_asset_turnover,
    };
    // 0 means the ratio could not be computed
    if actual == 0.0 || !actual.is_finite() {
        return None;
    }
    let equity_based = matches!(metric, BenchmarkMetric::DebtToNetWorth | BenchmarkMetric::ReturnOnEquity);
    if equity_based && ctx.latest_record()?.total_equity <= 0.0 {
        return None;
    }
    let above_pct = ((actual / benchmark - 1.0) * 100.0).round();
    let below_pct = ((1.0 - actual / benchmark) * 100.0).round();
    let label = metric.label();

    if metric.lower_is_better() {
        if actual < benchmark * (1.0 - BENCHMARK_STRENGTH_BAND) {
            Finding::strength(format!(
                "{} of {:.2} is {:.0}% below the industry average of {:.2}",
                label, actual, below_pct, benchmark
            ))
        } else if actual > benchmark * (1.0 + BENCHMARK_WEAKNESS_BAND) {
            Finding::weakness(format!(
                "{} of {:.2} is {:.0}% above the industry average of {:.2}",
                label, actual, above_pct, benchmark
            ))
        } else {
            None
        }
    } else if actual > benchmark * (1.0 + BENCHMARK_STRENGTH_BAND) {
        Finding::strength(format!(
            "{} of {:.2} is {:.0}% above the industry average of {:.2}",
            label, actual, above_pct, benchmark
        ))
    } else if actual < benchmark * (1.0 - BENCHMARK_WEAKNESS_BAND) {
        Finding::weakness(format!(
            "{} of {:.2} is {:.0}% below the industry average of {:.2}",
            label, actual, below_pct, benchmark
        ))
    } else {
        None
    }
}

fn benchmark_current_ratio(ctx: &NarrativeContext) -> Option<Finding> {
    compare_benchmark(ctx, BenchmarkMetric::CurrentRatio)
}

fn benchmark_quick_ratio(ctx: &NarrativeContext) -> Option<Finding> {
    compare_benchmark(ctx, BenchmarkMetric::QuickRatio)
}

fn benchmark_debt_to_net_worth(ctx: &NarrativeContext) -> Option<Finding> {
    compare_benchmark(ctx, BenchmarkMetric::DebtToNetWorth)
}

fn benchmark_roe(ctx: &NarrativeContext) -> Option<Finding> {
    compare_benchmark(ctx, BenchmarkMetric::ReturnOnEquity)
}

fn benchmark_roa(ctx: &NarrativeContext) -> Option<Finding> {
    compare_benchmark(ctx, BenchmarkMetric::ReturnOnAssets)
}

fn benchmark_asset_turnover(ctx: &NarrativeContext) -> Option<Finding> {
    compare_benchmark(ctx, BenchmarkMetric::TotalAssetTurnover)
}

fn signed_percent(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_percent(value))
    } else {
        format_percent(value)
    }
}

#[cfg(test)]
mod tests {
    use super::FindingKind::{Insight, Strength, Weakness};
    use super::*;
    use crate::test_support::{blank_point, series};
    use mda_core::{Benchmark, BenchmarkSet, MonthlyRecord, TrendDataPoint};
    use mda_metrics::{build_trend, ScoreSummary};

    type Evaluate = fn(&NarrativeContext) -> Option<Finding>;

    struct Fixture {
        records: Vec<MonthlyRecord>,
        trend: Vec<TrendDataPoint>,
        benchmarks: BenchmarkSet,
        scores: ScoreSummary,
    }

    impl Fixture {
        /// One all-zero month with a blank trend point.
        fn new() -> Self {
            let records = series(1, |_, _| {});
            let trend = vec![blank_point(records[0].month)];
            Self {
                records,
                trend,
                benchmarks: BenchmarkSet::default(),
                scores: ScoreSummary::default(),
            }
        }

        fn from_records(records: Vec<MonthlyRecord>) -> Self {
            let trend = build_trend(&records);
            Self { records, trend, ..Self::new() }
        }

        fn record(mut self, f: impl FnOnce(&mut MonthlyRecord)) -> Self {
            if let Some(r) = self.records.last_mut() {
                f(r);
            }
            self
        }

        fn point(mut self, f: impl FnOnce(&mut TrendDataPoint)) -> Self {
            if let Some(p) = self.trend.last_mut() {
                f(p);
            }
            self
        }

        fn scores(mut self, f: impl FnOnce(&mut ScoreSummary)) -> Self {
            f(&mut self.scores);
            self
        }

        fn benchmark(mut self, name: &str, value: f64) -> Self {
            self.benchmarks = BenchmarkSet::new(vec![Benchmark {
                metric_name: name.into(),
                five_year_value: value,
            }]);
            self
        }

        fn run(&self, rule: Evaluate) -> Option<Finding> {
            let ctx = NarrativeContext::new(&self.records, &self.trend, &self.benchmarks, &self.scores);
            rule(&ctx)
        }

        fn kind(&self, rule: Evaluate) -> Option<FindingKind> {
            self.run(rule).map(|f| f.kind)
        }

        fn text(&self, rule: Evaluate) -> String {
            self.run(rule).map(|f| f.text).unwrap_or_default()
        }
    }


    #[test]
    fn test_overall_score_bands() {
        let at = |v: f64| Fixture::new().scores(|s| s.final_score = v).kind(overall_score);
        assert_eq!(at(75.0), Some(Strength));
        assert_eq!(at(70.0), Some(Strength));
        assert_eq!(at(45.0), Some(Weakness));
        assert_eq!(at(60.0), None);
        assert_eq!(at(50.0), None);
    }

    #[test]
    fn test_profitability_score_bands() {
        let at = |v: f64| Fixture::new().scores(|s| s.profitability_score = v).kind(profitability_score);
        assert_eq!(at(80.0), Some(Strength));
        assert_eq!(at(30.0), Some(Weakness));
        assert_eq!(at(55.0), None);
    }

    #[test]
    fn test_asset_development_score_bands() {
        let at = |v: f64| Fixture::new().scores(|s| s.asset_development_score = v).kind(asset_development_score);
        assert_eq!(at(90.0), Some(Strength));
        assert_eq!(at(12.5), Some(Weakness));
        assert_eq!(at(65.0), None);
    }

    #[test]
    fn test_current_ratio_bands() {
        let at = |v: f64| Fixture::new().point(|p| p.current_ratio = v).kind(current_ratio);
        assert_eq!(at(2.5), Some(Strength));
        assert_eq!(at(0.8), Some(Weakness));
        assert_eq!(at(1.5), None);
        assert_eq!(at(0.0), None);
    }

    #[test]
    fn test_quick_ratio_bands() {
        let at = |v: f64| Fixture::new().point(|p| p.quick_ratio = v).kind(quick_ratio);
        assert_eq!(at(1.2), Some(Strength));
        assert_eq!(at(0.3), Some(Weakness));
        assert_eq!(at(0.7), None);
        assert_eq!(at(0.0), None);
    }

    #[test]
    fn test_return_on_equity_bands() {
        let at = |roe: f64, equity: f64| {
            Fixture::new()
                .record(|r| r.total_equity = equity)
                .point(|p| p.roe = roe)
                .kind(return_on_equity)
        };
        assert_eq!(at(20.0, 100.0), Some(Strength));
        assert_eq!(at(2.0, 100.0), Some(Weakness));
        assert_eq!(at(10.0, 100.0), None);
        // a loss over negative equity is not a return
        assert_eq!(at(20.0, -100.0), None);
    }

    #[test]
    fn test_debt_to_net_worth_bands() {
        let at = |ratio: f64| {
            Fixture::new()
                .record(|r| {
                    r.total_equity = 100.0;
                    r.total_liab = 100.0 * ratio;
                })
                .point(|p| p.debt_to_net_worth = ratio)
                .kind(debt_to_net_worth)
        };
        assert_eq!(at(0.5), Some(Strength));
        assert_eq!(at(4.0), Some(Weakness));
        assert_eq!(at(2.0), None);

        let negative = Fixture::new().record(|r| {
            r.total_equity = -10.0;
            r.total_liab = 50.0;
        });
        assert!(negative.text(debt_to_net_worth).starts_with("Negative net worth"));
        assert_eq!(Fixture::new().kind(debt_to_net_worth), None);
    }

    #[test]
    fn test_interest_coverage_bands() {
        let at = |coverage: f64| {
            Fixture::new()
                .record(|r| r.interest_expense = 100.0)
                .point(|p| p.interest_coverage = coverage)
                .kind(interest_coverage)
        };
        assert_eq!(at(5.0), Some(Strength));
        assert_eq!(at(1.0), Some(Weakness));
        assert_eq!(at(2.0), None);
        // no interest paid, nothing to cover
        assert_eq!(Fixture::new().point(|p| p.interest_coverage = 5.0).kind(interest_coverage), None);
    }

    #[test]
    fn test_revenue_trend_direction() {
        let rising = Fixture::from_records(series(12, |i, r| r.revenue = 1_000.0 + 100.0 * i as f64));
        assert!(rising.text(revenue_trend).starts_with("Monthly revenue is trending upward"));

        let falling = Fixture::from_records(series(12, |i, r| r.revenue = 3_000.0 - 100.0 * i as f64));
        assert!(falling.text(revenue_trend).starts_with("Monthly revenue is trending downward"));

        let flat = Fixture::from_records(series(12, |_, r| r.revenue = 1_000.0));
        assert_eq!(flat.kind(revenue_trend), Some(Insight));
        assert!(flat.text(revenue_trend).contains("flat"));

        let short = Fixture::from_records(series(11, |_, r| r.revenue = 1_000.0));
        assert_eq!(short.kind(revenue_trend), None);
    }

    #[test]
    fn test_revenue_projection() {
        let flat = Fixture::from_records(series(12, |_, r| r.revenue = 1_000.0));
        assert!(flat.text(revenue_projection).contains("projects to $12.0K (0.0% versus"));

        let rising = Fixture::from_records(series(12, |i, r| r.revenue = 1_000.0 + 100.0 * i as f64));
        assert!(rising.text(revenue_projection).contains("(+"));

        let no_revenue = Fixture::from_records(series(12, |_, _| {}));
        assert_eq!(no_revenue.kind(revenue_projection), None);
    }

    #[test]
    fn test_equity_trend() {
        let growing = Fixture::from_records(series(12, |i, r| r.total_equity = 100_000.0 + 1_000.0 * i as f64));
        assert_eq!(
            growing.text(equity_trend),
            "Owner's equity increased $11.0K over the past year to $111.0K"
        );

        let shrinking = Fixture::from_records(series(12, |i, r| r.total_equity = 100_000.0 - 1_000.0 * i as f64));
        assert_eq!(shrinking.kind(equity_trend), Some(Weakness));

        let steady = Fixture::from_records(series(12, |_, r| r.total_equity = 100_000.0));
        assert_eq!(steady.kind(equity_trend), None);

        let short = Fixture::from_records(series(11, |i, r| r.total_equity = 1_000.0 * i as f64));
        assert_eq!(short.kind(equity_trend), None);
    }

    #[test]
    fn test_growth_momentum() {
        let with_scores = |scores: &[f64]| {
            let mut fixture = Fixture::from_records(series(scores.len(), |_, _| {}));
            for (point, score) in fixture.trend.iter_mut().zip(scores) {
                point.revenue_growth_score = *score;
            }
            fixture
        };
        assert!(with_scores(&[50.0, 50.0, 50.0, 70.0]).text(growth_momentum).contains("accelerating"));
        assert!(with_scores(&[50.0, 50.0, 50.0, 30.0]).text(growth_momentum).contains("slowing"));
        assert_eq!(with_scores(&[50.0, 50.0, 50.0, 55.0]).kind(growth_momentum), None);
        assert_eq!(with_scores(&[0.0, 50.0, 100.0]).kind(growth_momentum), None);
    }

    #[test]
    fn test_working_capital_thin_cushion() {
        let thin = Fixture::new().record(|r| {
            r.tca = 120.0;
            r.tcl = 100.0;
        });
        assert_eq!(thin.kind(working_capital_position), Some(Insight));
        assert_eq!(Fixture::new().kind(working_capital_position), None);
    }

    #[test]
    fn test_days_ar_bands() {
        let at = |v: f64| Fixture::new().point(|p| p.days_ar = v).kind(days_ar);
        assert_eq!(at(20.0), Some(Strength));
        assert_eq!(at(75.0), Some(Weakness));
        assert_eq!(at(45.0), None);
        assert_eq!(at(0.0), None);
    }

    #[test]
    fn test_days_inventory_bands() {
        let at = |v: f64| Fixture::new().point(|p| p.days_inventory = v).kind(days_inventory);
        assert_eq!(at(20.0), Some(Strength));
        assert_eq!(at(120.0), Some(Weakness));
        assert_eq!(at(60.0), None);
        assert_eq!(at(0.0), None);
    }

    #[test]
    fn test_days_ap_bands() {
        let at = |v: f64| Fixture::new().point(|p| p.days_ap = v).kind(days_ap);
        assert_eq!(at(75.0), Some(Weakness));
        assert_eq!(at(20.0), Some(Insight));
        assert_eq!(at(45.0), None);
        assert_eq!(at(0.0), None);
    }

    #[test]
    fn test_cash_conversion_bands() {
        let at = |ar: f64, inventory: f64, ap: f64| {
            Fixture::new()
                .point(|p| {
                    p.days_ar = ar;
                    p.days_inventory = inventory;
                    p.days_ap = ap;
                })
                .kind(cash_conversion)
        };
        assert_eq!(at(10.0, 10.0, 5.0), Some(Strength));
        assert_eq!(at(60.0, 60.0, 10.0), Some(Weakness));
        assert_eq!(at(40.0, 30.0, 10.0), None);
        assert_eq!(at(0.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_asset_turnover_bands() {
        let at = |v: f64| Fixture::new().point(|p| p.total_asset_turnover = v).kind(asset_turnover);
        assert_eq!(at(2.5), Some(Strength));
        assert_eq!(at(0.3), Some(Weakness));
        assert_eq!(at(1.0), None);
        assert_eq!(at(0.0), None);
    }

    #[test]
    fn test_ebitda_margin_bands() {
        let at = |margin: f64| {
            Fixture::new()
                .record(|r| r.revenue = 1_000.0)
                .point(|p| p.ebitda_margin = margin)
                .kind(ebitda_margin)
        };
        assert_eq!(at(20.0), Some(Strength));
        assert_eq!(at(2.0), Some(Weakness));
        assert_eq!(at(10.0), None);
        // without revenue there is no margin
        assert_eq!(Fixture::new().point(|p| p.ebitda_margin = 2.0).kind(ebitda_margin), None);
    }

    #[test]
    fn test_cash_year_over_year() {
        let at = |latest: f64| {
            Fixture::from_records(series(2, |i, r| r.cash = if i == 0 { 100.0 } else { latest }))
                .kind(cash_year_over_year)
        };
        assert_eq!(at(120.0), Some(Strength));
        assert_eq!(at(70.0), Some(Weakness));
        assert_eq!(at(105.0), None);
        assert_eq!(Fixture::new().record(|r| r.cash = 100.0).kind(cash_year_over_year), None);
    }

    #[test]
    fn test_quick_ratio_benchmark() {
        let at = |v: f64| Fixture::new().benchmark("Quick Ratio", 1.0).point(|p| p.quick_ratio = v);
        assert_eq!(
            at(1.5).text(benchmark_quick_ratio),
            "Quick Ratio of 1.50 is 50% above the industry average of 1.00"
        );
        assert_eq!(
            at(0.5).text(benchmark_quick_ratio),
            "Quick Ratio of 0.50 is 50% below the industry average of 1.00"
        );
        assert_eq!(at(0.9).kind(benchmark_quick_ratio), None);
    }

    #[test]
    fn test_roe_benchmark_needs_positive_equity() {
        let at = |roe: f64, equity: f64| {
            Fixture::new()
                .benchmark("ROE", 10.0)
                .record(|r| r.total_equity = equity)
                .point(|p| p.roe = roe)
                .kind(benchmark_roe)
        };
        assert_eq!(at(15.0, 100.0), Some(Strength));
        assert_eq!(at(5.0, 100.0), Some(Weakness));
        assert_eq!(at(11.0, 100.0), None);
        assert_eq!(at(15.0, -100.0), None);
    }

    #[test]
    fn test_roa_benchmark() {
        let at = |v: f64| Fixture::new().benchmark("Return on Assets", 5.0).point(|p| p.roa = v).kind(benchmark_roa);
        assert_eq!(at(8.0), Some(Strength));
        assert_eq!(at(2.0), Some(Weakness));
        assert_eq!(at(5.5), None);
    }

    #[test]
    fn test_asset_turnover_benchmark() {
        let at = |v: f64| {
            Fixture::new()
                .benchmark("Total Asset Turnover", 2.0)
                .point(|p| p.total_asset_turnover = v)
                .kind(benchmark_asset_turnover)
        };
        assert_eq!(at(3.0), Some(Strength));
        assert_eq!(at(1.0), Some(Weakness));
        assert_eq!(at(2.2), None);
    }

    #[test]
    fn test_debt_benchmark_skips_negative_equity() {
        let fixture = Fixture::new()
            .benchmark("Debt/Net Worth", 2.0)
            .record(|r| {
                r.total_liab = 200_000.0;
                r.total_equity = -50_000.0;
            })
            .point(|p| p.debt_to_net_worth = -4.0);
        assert_eq!(fixture.kind(benchmark_debt_to_net_worth), None);

        let conservative = Fixture::new()
            .benchmark("Debt/Net Worth", 2.0)
            .record(|r| r.total_equity = 100.0)
            .point(|p| p.debt_to_net_worth = 1.0);
        assert_eq!(conservative.kind(benchmark_debt_to_net_worth), Some(Strength));
    }

    #[test]
    fn test_benchmark_skips_uncomputable_ratio() {
        let fixture = Fixture::new().benchmark("Current Ratio", 2.0);
        assert_eq!(fixture.kind(benchmark_current_ratio), None);

        let nan = Fixture::new().benchmark("Current Ratio", 2.0).point(|p| p.current_ratio = f64::NAN);
        assert_eq!(nan.kind(benchmark_current_ratio), None);
    }
}
