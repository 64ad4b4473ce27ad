use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Data source error: {0}")]
    DataSource(String),
}

impl AnalysisError {
    /// Shorthand for the history-length guard used by trailing metrics.
    pub fn needs_months(required: usize, available: usize) -> Self {
        AnalysisError::InsufficientData(format!(
            "requires {}+ months of data, have {}",
            required, available
        ))
    }
}
