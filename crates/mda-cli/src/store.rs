//! JSON file-backed record and benchmark providers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use mda_core::{AnalysisError, Benchmark, BenchmarkProvider, MonthlyRecord, MonthlyRecordProvider};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A records file holds either one company's series or a map of series keyed by company id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordsFile {
    Single(Vec<MonthlyRecord>),
    ByCompany(HashMap<String, Vec<MonthlyRecord>>),
}

pub struct JsonFileStore {
    records_path: PathBuf,
    benchmarks_path: Option<PathBuf>,
}

impl JsonFileStore {
    pub fn new(records_path: impl Into<PathBuf>) -> Self {
        Self {
            records_path: records_path.into(),
            benchmarks_path: None,
        }
    }

    pub fn with_benchmarks(mut self, path: impl Into<PathBuf>) -> Self {
        self.benchmarks_path = Some(path.into());
        self
    }
}

pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AnalysisError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AnalysisError::DataSource(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| AnalysisError::InvalidData(format!("{}: {}", path.display(), e)))
}

#[async_trait]
impl MonthlyRecordProvider for JsonFileStore {
    async fn monthly_records(&self, company_id: &str) -> Result<Vec<MonthlyRecord>, AnalysisError> {
        let mut records = match read_json::<RecordsFile>(&self.records_path).await? {
            RecordsFile::Single(records) => records,
            RecordsFile::ByCompany(mut companies) => companies.remove(company_id).ok_or_else(|| {
                AnalysisError::DataSource(format!(
                    "company '{}' not found in {}",
                    company_id,
                    self.records_path.display()
                ))
            })?,
        };
        records.sort_by_key(|r| r.month);
        tracing::debug!(company_id, months = records.len(), "loaded monthly records");
        Ok(records)
    }
}

#[async_trait]
impl BenchmarkProvider for JsonFileStore {
    async fn benchmarks(&self) -> Result<Vec<Benchmark>, AnalysisError> {
        match &self.benchmarks_path {
            Some(path) => read_json(path).await,
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("mda-store-{}-{}.json", std::process::id(), name));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[tokio::test]
    async fn records_are_sorted_oldest_first() {
        let path = temp_file(
            "unsorted",
            r#"[
                {"month": "2023-03-01", "revenue": 300.0},
                {"month": "2023-01-01", "revenue": 100.0},
                {"month": "2023-02-01", "revenue": 200.0}
            ]"#,
        );
        let store = JsonFileStore::new(&path);
        let records = store.monthly_records("any").await.unwrap();
        let revenue: Vec<f64> = records.iter().map(|r| r.revenue).collect();
        assert_eq!(revenue, vec![100.0, 200.0, 300.0]);
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn company_map_selects_by_id() {
        let path = temp_file(
            "companies",
            r#"{
                "acme": [{"month": "2023-01-01", "revenue": 10.0}],
                "globex": [{"month": "2023-01-01", "revenue": 20.0}]
            }"#,
        );
        let store = JsonFileStore::new(&path);
        let records = store.monthly_records("globex").await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].revenue, 20.0);

        let missing = store.monthly_records("initech").await;
        assert!(matches!(missing, Err(AnalysisError::DataSource(_))));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_data() {
        let path = temp_file("malformed", "{ not json");
        let store = JsonFileStore::new(&path);
        let result = store.monthly_records("any").await;
        assert!(matches!(result, Err(AnalysisError::InvalidData(_))));
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn missing_file_is_a_data_source_error() {
        let store = JsonFileStore::new(std::env::temp_dir().join("mda-store-does-not-exist.json"));
        let result = store.monthly_records("any").await;
        assert!(matches!(result, Err(AnalysisError::DataSource(_))));
    }

    #[tokio::test]
    async fn benchmarks_default_to_empty() {
        let path = temp_file("records-only", "[]");
        let store = JsonFileStore::new(&path);
        assert!(store.benchmarks().await.unwrap().is_empty());
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn benchmarks_load_from_file() {
        let records = temp_file("bench-records", "[]");
        let benchmarks = temp_file(
            "benchmarks",
            r#"[{"metricName": "Current Ratio", "fiveYearValue": 1.8}]"#,
        );
        let store = JsonFileStore::new(&records).with_benchmarks(&benchmarks);
        let loaded = store.benchmarks().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].metric_name, "Current Ratio");
        std::fs::remove_file(records).ok();
        std::fs::remove_file(benchmarks).ok();
    }
}
