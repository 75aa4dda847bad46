//! # Core Library
//!
//! Process configuration and the central error type shared by the client crates.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
