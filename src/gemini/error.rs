use thiserror::Error;

/// Failures from the remote model call. All of them end up rendered as a
/// single error string where the review would have appeared.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The HTTP request itself failed (DNS, TLS, connection reset, ...).
    #[error("request failed: {0}")]
    Http(String),

    /// The remote call exceeded the client timeout.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// The API answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Parse(String),

    /// The prompt was blocked by the content-safety filters.
    #[error("response blocked: {0}")]
    Blocked(String),

    /// The model answered without any review text.
    #[error("model returned no review text")]
    Empty,
}
