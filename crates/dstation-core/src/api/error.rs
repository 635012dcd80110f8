//! Transport-level faults. Vendor `success: false` responses are not errors here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// Curl reported an error (timeout, connection refused, bad URL, etc.).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// Building the multipart body failed.
    #[error("multipart form: {0}")]
    Form(#[from] curl::FormError),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Body was not a valid envelope.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The blocking transfer task panicked or was cancelled.
    #[error("transfer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Curl(e) if e.is_operation_timedout())
    }
}
