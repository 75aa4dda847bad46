//! # Core Abstractions
//!
//! Adapter traits and error types used throughout the client.
//!
//! ## Modules
//!
//! - **[`service`]**: contract adapter traits (`ContractReader`, `ContractWriter`)
//!
//! ## Error Handling
//!
//! All fallible operations return [`lib_core::Result`]:
//!
//! ```rust,no_run
//! use client::core::{AppError, Result};
//!
//! fn validate_content(content: &str) -> Result<()> {
//!     if content.trim().is_empty() {
//!         return Err(AppError::InvalidInput("Comment cannot be empty".to_string()));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Dependency Injection
//!
//! The adapter traits let the same session and actions run against the
//! deployed contracts or the in-memory simulator:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use client::core::service::{ContractReader, ContractWriter};
//! use client::services::memory::InMemoryContracts;
//!
//! let contracts = Arc::new(InMemoryContracts::new());
//! let reader: Arc<dyn ContractReader> = contracts.clone();
//! let writer: Arc<dyn ContractWriter> = contracts;
//! ```

pub mod service;

pub use lib_core::error::{AppError, Result};
pub use service::{ContractReader, ContractWriter};
