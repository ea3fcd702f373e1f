use thiserror::Error;

/// Failures crossing the backend boundary.
///
/// Every operation converts its failure into one of these at the call site;
/// nothing propagates as a panic. `AuthInvalid` ends the session wherever it
/// surfaces, with one documented exception in the conversation-list fetch.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session token rejected")]
    AuthInvalid,

    #[error("request deadline exceeded")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
