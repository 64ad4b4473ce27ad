use mda_core::{BenchmarkSet, MonthlyRecord, TrendDataPoint};
use mda_metrics::ScoreSummary;

/// Everything the narrative rules read. Borrowed, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext<'a> {
    pub records: &'a [MonthlyRecord],
    pub trend: &'a [TrendDataPoint],
    pub benchmarks: &'a BenchmarkSet,
    pub scores: &'a ScoreSummary,
}

impl<'a> NarrativeContext<'a> {
    pub fn new(
        records: &'a [MonthlyRecord],
        trend: &'a [TrendDataPoint],
        benchmarks: &'a BenchmarkSet,
        scores: &'a ScoreSummary,
    ) -> Self {
        Self {
            records,
            trend,
            benchmarks,
            scores,
        }
    }

    pub fn latest_record(&self) -> Option<&'a MonthlyRecord> {
        self.records.last()
    }

    pub fn latest_point(&self) -> Option<&'a TrendDataPoint> {
        self.trend.last()
    }

    /// At least `months` records are available.
    pub fn has_months(&self, months: usize) -> bool {
        self.records.len() >= months
    }
}
