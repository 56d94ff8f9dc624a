use thiserror::Error;

/// Connectivity-level failure for a single attempt. The only error family
/// the retry loop will retry.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),
}

/// Terminal outcome of an ask. Display strings are shown to the user as-is
/// by the conversation layer.
#[derive(Debug, Error)]
pub enum AskError {
    /// Every attempt failed at the transport level.
    #[error("Service unavailable (connection refused). Please try again shortly.")]
    Unavailable,

    /// Non-2xx reply; message is server-supplied when the body parsed,
    /// otherwise constructed from the status code.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// 2xx reply whose body was not JSON.
    #[error("Invalid JSON response from AI service")]
    InvalidJson,

    /// The service itself reported failure (`success: false`).
    #[error("{0}")]
    Upstream(String),

    #[error("Empty answer from AI")]
    EmptyAnswer,

    #[error("Empty answer after sanitization")]
    EmptySanitized,
}

pub type Result<T> = std::result::Result<T, AskError>;
