use crate::ingest::RejectedSubmission;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("invalid date format for {field}: expected YYYY-MM-DD, got {value:?}")]
    InvalidDateFormat { field: &'static str, value: String },
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// Location not registered or body missing/empty. The echoed record is
    /// returned to the caller but never stored.
    #[error("invalid submission")]
    InvalidSubmission(RejectedSubmission),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a valid port number, got {0:?}")]
    InvalidPort(String),
}
