use async_trait::async_trait;
use crate::{AnalysisError, Benchmark, MonthlyRecord};

/// Source of monthly financial records for a company
#[async_trait]
pub trait MonthlyRecordProvider: Send + Sync {
    /// Records ordered oldest to newest.
    async fn monthly_records(&self, company_id: &str) -> Result<Vec<MonthlyRecord>, AnalysisError>;
}

/// Source of industry benchmark values
#[async_trait]
pub trait BenchmarkProvider: Send + Sync {
    async fn benchmarks(&self) -> Result<Vec<Benchmark>, AnalysisError>;
}
