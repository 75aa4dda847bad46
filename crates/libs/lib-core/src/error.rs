//! # Centralized Error Handling
//!
//! This module defines the error type [`AppError`] used across the client crates.
//! It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! Errors are categorized by their source:
//!
//! 1. **User-facing rejections**
//!    - [`CapabilityDenied`](AppError::CapabilityDenied): write attempted without a
//!      wallet, before the wallet settled, or on the wrong network
//!    - [`InvalidInput`](AppError::InvalidInput): malformed action input
//!    - [`NotFound`](AppError::NotFound): unknown project, comment or campaign
//!
//! 2. **Adapter boundary failures**
//!    - [`Adapter`](AppError::Adapter): network error or unreachable contract endpoint
//!    - [`Transaction`](AppError::Transaction): contract revert or rejected transaction
//!    - [`Decoding`](AppError::Decoding): response could not be decoded at all
//!
//! 3. **Process failures**
//!    - [`Config`](AppError::Config) and [`Internal`](AppError::Internal)
//!
//! Connection lifecycle transience is never an error; it is absorbed by the
//! wallet synchronizer's ready gate.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_amount(raw: &str) -> Result<u128> {
//!     raw.parse()
//!         .map_err(|_| AppError::InvalidInput(format!("Invalid amount: {}", raw)))
//! }
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Error type covering all failure scenarios of the client core.
///
/// Each variant includes a descriptive `String` for context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Contract adapter call failed before reaching a verdict (network, endpoint).
    #[error("Adapter error: {0}")]
    Adapter(String),

    /// A write was attempted while writes are not allowed.
    #[error("Action not allowed: {0}")]
    CapabilityDenied(String),

    /// Transaction was rejected or reverted by the contract.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Response payload could not be decoded.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested record not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get a user-friendly error message for the initiating action.
    ///
    /// Internal details are replaced with a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::CapabilityDenied(msg)
            | AppError::InvalidInput(msg)
            | AppError::NotFound(msg)
            | AppError::Transaction(msg) => msg.clone(),
            AppError::Adapter(_) => "Network temporarily unavailable, please retry".to_string(),
            AppError::Config(_) | AppError::Decoding(_) | AppError::Internal(_) => {
                "An internal error occurred".to_string()
            }
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}
