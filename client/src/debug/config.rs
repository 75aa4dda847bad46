//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_FILTER: &str = "client=info,warn";
pub const LOG_FILE_NAME: &str = "tokentalk.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive (e.g., "client=debug,info")
    pub log_level: String,
    /// Directory for rotated log files; console only when `None`
    pub log_dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_FILTER.to_string(),
            log_dir: None,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("RUST_LOG").ok(),
            std::env::var("TOKENTALK_LOG_DIR").ok(),
        )
    }

    fn from_vars(rust_log: Option<String>, log_dir: Option<String>) -> Self {
        Self {
            log_level: rust_log
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            log_dir: log_dir.filter(|v| !v.trim().is_empty()).map(PathBuf::from),
        }
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }
}
