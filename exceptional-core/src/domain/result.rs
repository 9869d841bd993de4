//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Failures are classified by kind so callers can branch on the variant
/// instead of inspecting message strings.
#[derive(Error, Debug)]
pub enum Error {
    /// Credentials or token were rejected by the server
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The session lacks the role or ownership the action requires
    #[error("Not allowed: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The action clashes with existing state, e.g. a duplicate date or a
    /// decision on a request that is no longer pending
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure before any HTTP status was received
    #[error("Network error: {0}")]
    Network(String),

    /// The server did not answer within the configured deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// All slots of the day-off allowance are taken by pending or
    /// approved requests
    #[error("Day-off quota reached: all {max} requests are in use")]
    QuotaExceeded { max: u32 },

    /// Another action on the same request has not finished yet
    #[error("An action is already in flight for request {0}")]
    ActionInFlight(String),

    /// Unexpected HTTP status with no finer classification
    #[error("API error: HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an authorization error
    pub fn authorization(msg: impl Into<String>) -> Self {
        Self::Authorization(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a conflict error
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
