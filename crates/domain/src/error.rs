//! Bridge error taxonomy
//!
//! One enum for the whole acquisition chain plus startup validation.
//! Pipeline errors are logged and the poll cycle abandoned; only
//! configuration errors are fatal.

use thiserror::Error;

/// Errors raised by the telemetry pipeline and configuration loading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// Device unreachable, or it answered with a rejecting status code.
    #[error("Connect failed: {0}")]
    ConnectFailed(String),

    /// Malformed envelope or cipher failure.
    #[error("Decrypt failed: {0}")]
    DecryptFailed(String),

    /// Non-JSON or structurally invalid payload.
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// Missing or invalid mandatory startup parameter. Fatal.
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
}

/// Result alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
