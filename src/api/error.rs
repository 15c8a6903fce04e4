use thiserror::Error;

/// Failures a request against the MeshComm backend can produce. None of
/// these surface in the UI: reads retry on the next poll tick, writes retry
/// when the user resubmits.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network failure: {0}")]
    Network(#[source] reqwest::Error),
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("write rejected: HTTP {0}")]
    Rejected(reqwest::StatusCode),
}
