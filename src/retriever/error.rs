use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the hybrid search backend call.
///
/// The client never swallows these; the orchestrator decides whether they
/// degrade the outcome.
pub enum RetrieverError {
    /// The HTTP request itself failed (connect, TLS, body transfer).
    #[error("search request to '{url}' failed: {message}")]
    RequestFailed {
        /// Endpoint URL.
        url: String,
        /// Error detail.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("search backend returned status {status}: {message}")]
    BadStatus {
        /// HTTP status code.
        status: u16,
        /// Response body or reason, truncated.
        message: String,
    },

    /// The response body did not match the candidate contract.
    #[error("search backend returned a malformed response: {message}")]
    MalformedResponse {
        /// Parse error detail.
        message: String,
    },
}
