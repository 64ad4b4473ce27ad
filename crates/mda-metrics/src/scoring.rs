use mda_core::stats::safe_div;
use mda_core::MonthlyRecord;
use serde::{Deserialize, Serialize};

use crate::growth::{revenue_growth_24m, revenue_growth_quarter};
use crate::income::IncomeStatement;
use crate::ratios::current_ratio;
use crate::TWO_YEAR_MONTHS;

/// 0-100 scores summarising the series. 50 is neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub final_score: f64,
    pub profitability_score: f64,
    pub growth_score: f64,
    pub asset_development_score: f64,
}

impl Default for ScoreSummary {
    fn default() -> Self {
        Self {
            final_score: 50.0,
            profitability_score: 50.0,
            growth_score: 50.0,
            asset_development_score: 50.0,
        }
    }
}

impl ScoreSummary {
    pub fn from_records(records: &[MonthlyRecord]) -> Self {
        let Some(latest) = records.last() else {
            return Self::default();
        };

        // 20% net margin scores 100, -20% scores 0
        let ttm = IncomeStatement::ttm(records);
        let profitability_score = clamp_score(50.0 + ttm.net_margin * 2.5);

        let growth = if records.len() >= TWO_YEAR_MONTHS {
            revenue_growth_24m(records)
        } else {
            revenue_growth_quarter(records)
        };
        let growth_score = clamp_score(50.0 + growth * 2.5);

        // Half liquidity (current ratio 2.0 is full marks), half equity share of assets
        let liquidity = (current_ratio(latest.tca, latest.tcl) / 2.0).clamp(0.0, 1.0);
        let equity_share = safe_div(latest.total_equity, latest.total_assets).clamp(0.0, 1.0);
        let asset_development_score = clamp_score(liquidity * 50.0 + equity_share * 50.0);

        let final_score = clamp_score(
            profitability_score * 0.4 + growth_score * 0.3 + asset_development_score * 0.3,
        );

        Self {
            final_score,
            profitability_score,
            growth_score,
            asset_development_score,
        }
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        50.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::series;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_series_is_neutral() {
        assert_eq!(ScoreSummary::from_records(&[]), ScoreSummary::default());
    }

    #[test]
    fn test_healthy_company_scores_high() {
        let records = series(24, |i, r| {
            r.revenue = if i < 12 { 100_000.0 } else { 120_000.0 };
            r.cogs_total = 60_000.0;
            r.tca = 300_000.0;
            r.tcl = 100_000.0;
            r.total_assets = 1_000_000.0;
            r.total_equity = 800_000.0;
        });
        let scores = ScoreSummary::from_records(&records);
        // net margin 50% -> capped at 100
        assert_eq!(scores.profitability_score, 100.0);
        // 20% growth -> 100
        assert_eq!(scores.growth_score, 100.0);
        assert_relative_eq!(scores.asset_development_score, 90.0, epsilon = 1e-9);
        assert_relative_eq!(scores.final_score, 97.0, epsilon = 1e-9);
    }

    #[test]
    fn test_loss_making_company_scores_low() {
        let records = series(12, |_, r| {
            r.revenue = 10_000.0;
            r.cogs_total = 9_000.0;
            r.payroll = 4_000.0;
            r.tca = 5_000.0;
            r.tcl = 10_000.0;
            r.total_assets = 20_000.0;
            r.total_equity = -1_000.0;
        });
        let scores = ScoreSummary::from_records(&records);
        assert_eq!(scores.profitability_score, 0.0);
        assert_relative_eq!(scores.asset_development_score, 12.5, epsilon = 1e-9);
        assert!(scores.final_score < 50.0);
    }
}
