//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, numeric coercion, and validation.

pub mod envs;
pub mod numeric;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_or, get_env_parse};
pub use numeric::{coerce_bool, coerce_i64, coerce_u128, coerce_u64, parse_u128_lenient};
pub use time::{format_unix, now_unix};
pub use validation::{validate_address, validate_max_length, validate_not_empty};
