//! Configuration loader for the `codemetal-weathersignal` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). The defaults reproduce the fixed constants of the
//! prediction workflow: an 80/20 split seeded with 42 and an L2 penalty of 0.01.
//!
use std::env;

use anyhow::{anyhow, bail, Result};

/// Parse an optional environment variable of type `$ty` with a default value.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable with a default value.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name).unwrap_or_else(|_| $default.to_string())
    };
}

pub const DEFAULT_DATASET_PATH: &str = "weather_analysis.csv";
pub const DEFAULT_LISTEN_PORT: u16 = 8080;
pub const DEFAULT_TRAIN_RATIO: f64 = 0.8;
pub const DEFAULT_SPLIT_SEED: u64 = 42;
pub const DEFAULT_REG_PARAM: f64 = 0.01;

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    // ---
    /// CSV dataset loaded once at startup.
    pub dataset_path: String,

    /// HTTP listen port.
    pub listen_port: u16,

    /// Fraction of rows used for training; the rest are held out.
    pub train_ratio: f64,

    /// Seed for the train/test split.
    pub split_seed: u64,

    /// L2 regularization strength of the regression.
    pub reg_param: f64,
}

impl Default for Config {
    fn default() -> Self {
        // ---
        Self {
            dataset_path: DEFAULT_DATASET_PATH.to_string(),
            listen_port: DEFAULT_LISTEN_PORT,
            train_ratio: DEFAULT_TRAIN_RATIO,
            split_seed: DEFAULT_SPLIT_SEED,
            reg_param: DEFAULT_REG_PARAM,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `DATASET_PATH` – CSV dataset (default: `weather_analysis.csv`)
/// - `LISTEN_PORT` – HTTP port (default: 8080)
/// - `TRAIN_RATIO` – train fraction, strictly between 0 and 1 (default: 0.8)
/// - `SPLIT_SEED` – train/test split seed (default: 42)
/// - `REG_PARAM` – L2 penalty, non-negative (default: 0.01)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let dataset_path = env_or!("DATASET_PATH", DEFAULT_DATASET_PATH);
    let listen_port = parse_env!("LISTEN_PORT", u16, DEFAULT_LISTEN_PORT);
    let train_ratio = parse_env!("TRAIN_RATIO", f64, DEFAULT_TRAIN_RATIO);
    let split_seed = parse_env!("SPLIT_SEED", u64, DEFAULT_SPLIT_SEED);
    let reg_param = parse_env!("REG_PARAM", f64, DEFAULT_REG_PARAM);

    let cfg = Config {
        dataset_path,
        listen_port,
        train_ratio,
        split_seed,
        reg_param,
    };
    cfg.validate()?;
    Ok(cfg)
}

impl Config {
    // ---
    /// Reject values the training pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        // ---
        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            bail!("Invalid TRAIN_RATIO: {} is not between 0 and 1", self.train_ratio);
        }
        if !(self.reg_param >= 0.0 && self.reg_param.is_finite()) {
            bail!("Invalid REG_PARAM: {} must be a non-negative number", self.reg_param);
        }
        Ok(())
    }

    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  DATASET_PATH : {}", self.dataset_path);
        tracing::info!("  LISTEN_PORT  : {}", self.listen_port);
        tracing::info!("  TRAIN_RATIO  : {}", self.train_ratio);
        tracing::info!("  SPLIT_SEED   : {}", self.split_seed);
        tracing::info!("  REG_PARAM    : {}", self.reg_param);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_defaults_are_fixed_constants() {
        // ---
        let cfg = Config::default();
        assert_eq!(cfg.train_ratio, 0.8);
        assert_eq!(cfg.split_seed, 42);
        assert_eq!(cfg.reg_param, 0.01);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_ratio() {
        // ---
        for ratio in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let cfg = Config {
                train_ratio: ratio,
                ..Config::default()
            };
            assert!(cfg.validate().is_err(), "ratio {ratio} should be rejected");
        }
    }

    #[test]
    fn test_validate_rejects_bad_penalty() {
        // ---
        for reg in [-0.01, f64::INFINITY, f64::NAN] {
            let cfg = Config {
                reg_param: reg,
                ..Config::default()
            };
            assert!(cfg.validate().is_err(), "penalty {reg} should be rejected");
        }

        let unpenalized = Config {
            reg_param: 0.0,
            ..Config::default()
        };
        assert!(unpenalized.validate().is_ok());
    }
}
