//! # Logging
//!
//! Structured logging for the client and the demo binary.
//!
//! ## Usage
//!
//! ```no_run
//! // Keep the guard alive until shutdown so buffered file logs are flushed.
//! let _guard = client::debug::init_logger();
//!
//! tracing::info!(project_id = 7, "Project loaded");
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (default `client=info,warn`)
//! - `TOKENTALK_LOG_DIR`: When set, also write daily-rotated logs to this directory

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init as init_logger;
