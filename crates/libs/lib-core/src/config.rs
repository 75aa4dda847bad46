//! # Application Configuration
//!
//! This module manages process configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured, and
//! never changes afterwards: the contract network in particular is fixed per
//! deployment and is not user-controlled.
//!
//! ## Global Config Access
//!
//! Use [`core_config()`] to access the global configuration instance:
//!
//! ```rust,no_run
//! use lib_core::config::core_config;
//!
//! let config = core_config();
//! let chain_id = config.contract_chain_id;
//! ```
//!
//! The config must be initialized once at application startup using [`init_config()`].

use std::sync::OnceLock;
use std::time::Duration;

use lib_utils::envs::{self, get_env_or, get_env_parse};
use shared::ContractNetwork;

use crate::error::{AppError, Result};

/// Process configuration loaded from environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Chain id of the network the contracts are deployed on
    pub contract_chain_id: u64,

    /// Human-readable name of the contract network
    pub contract_network_name: String,

    /// Refresh period for live views, in seconds
    ///
    /// Valid range: 1-3600
    pub live_refresh_secs: u64,

    /// Artificial latency added by the in-memory contract simulator, in milliseconds
    pub simulated_latency_ms: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let contract_chain_id = get_env_parse::<u64>("CONTRACT_CHAIN_ID").map_err(|e| match e {
            envs::Error::MissingEnv(_) => {
                AppError::Config("CONTRACT_CHAIN_ID must be set in environment".to_string())
            }
            envs::Error::WrongFormat(_) => {
                AppError::Config("CONTRACT_CHAIN_ID must be a valid number".to_string())
            }
        })?;

        let contract_network_name = get_env_or("CONTRACT_NETWORK_NAME", "Contract Network");

        let live_refresh_secs = get_env_or("LIVE_REFRESH_SECS", "15")
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("LIVE_REFRESH_SECS must be a valid number: {}", e)))?;

        let simulated_latency_ms = get_env_or("SIMULATED_LATENCY_MS", "0")
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("SIMULATED_LATENCY_MS must be a valid number: {}", e)))?;

        Ok(Self {
            contract_chain_id,
            contract_network_name,
            live_refresh_secs,
            simulated_latency_ms,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.contract_chain_id == 0 {
            return Err(AppError::Config("CONTRACT_CHAIN_ID must be non-zero".to_string()));
        }

        if self.contract_network_name.trim().is_empty() {
            return Err(AppError::Config("CONTRACT_NETWORK_NAME cannot be empty".to_string()));
        }

        if self.live_refresh_secs < 1 || self.live_refresh_secs > 3600 {
            return Err(AppError::Config(
                "LIVE_REFRESH_SECS must be between 1 and 3600".to_string(),
            ));
        }

        Ok(())
    }

    /// The fixed contract network descriptor.
    pub fn contract_network(&self) -> ContractNetwork {
        ContractNetwork {
            chain_id: self.contract_chain_id,
            name: self.contract_network_name.clone(),
        }
    }

    pub fn live_refresh_period(&self) -> Duration {
        Duration::from_secs(self.live_refresh_secs)
    }

    pub fn simulated_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_latency_ms)
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// This should be called once at application startup, before any session
/// or service that needs configuration is built.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are missing or invalid
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<&'static Config> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| AppError::Config("Config has already been initialized".to_string()))?;

    tracing::debug!("Configuration initialized");
    Ok(core_config())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet. This ensures
/// configuration is always available when accessed.
pub fn core_config() -> &'static Config {
    CONFIG.get().expect("Config must be initialized with init_config() before use")
}
