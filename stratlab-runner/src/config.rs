//! Run configuration loaded from TOML.
//!
//! A run file has a `[run]` section describing the simulation and one
//! optional section per component slot:
//!
//! ```toml
//! [run]
//! start = "2024-03-04T14:30:00Z"
//! ticks = 390
//! symbols = ["SPY", "QQQ"]
//!
//! [alpha]
//! type = "constant"
//! params = { direction = 1, period_minutes = 60 }
//! ```
//!
//! Missing component sections fall back to the framework defaults. A missing
//! `[universe_selection]` stays empty so that model validation decides.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use stratlab_core::domain::{ConfigHash, Market, Symbol};
use stratlab_core::fingerprint::{ComponentConfig, FrameworkConfig};
use stratlab_core::framework::AlgorithmKind;
use stratlab_core::services::AccountType;

/// Market assigned to entries of `crypto_symbols`.
pub const CRYPTO_MARKET: &str = "coinbase";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse run config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid run config: {0}")]
    Invalid(String),
}

fn default_ticks() -> usize {
    390
}

fn default_step_minutes() -> i64 {
    1
}

fn default_seed() -> u64 {
    42
}

fn default_initial_cash() -> f64 {
    100_000.0
}

/// The `[run]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSection {
    /// First tick, RFC 3339 in UTC.
    pub start: DateTime<Utc>,
    #[serde(default = "default_ticks")]
    pub ticks: usize,
    #[serde(default = "default_step_minutes")]
    pub step_minutes: i64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_initial_cash")]
    pub initial_cash: f64,
    #[serde(default)]
    pub account_type: AccountType,
    #[serde(default)]
    pub algorithm: AlgorithmKind,
    #[serde(default)]
    pub debug: bool,
    /// US equity tickers.
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Crypto tickers, always-open market.
    #[serde(default)]
    pub crypto_symbols: Vec<String>,
}

/// A complete run description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    pub run: RunSection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universe_selection: Option<ComponentConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<ComponentConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portfolio_construction: Option<ComponentConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_management: Option<ComponentConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<ComponentConfig>,
}

impl RunConfig {
    /// Load and validate a run config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a run config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let run = &self.run;
        if run.ticks == 0 {
            return Err(ConfigError::Invalid("ticks must be at least 1".into()));
        }
        if run.step_minutes < 1 {
            return Err(ConfigError::Invalid(format!(
                "step_minutes must be at least 1, got {}",
                run.step_minutes
            )));
        }
        if run.ticks > i32::MAX as usize {
            return Err(ConfigError::Invalid(format!(
                "ticks must be at most {}, got {}",
                i32::MAX,
                run.ticks
            )));
        }
        if self.try_end().is_none() {
            return Err(ConfigError::Invalid(format!(
                "step_minutes {} over {} ticks runs past the supported date range",
                run.step_minutes, run.ticks
            )));
        }
        if !run.initial_cash.is_finite() || run.initial_cash <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_cash must be positive, got {}",
                run.initial_cash
            )));
        }
        if run.symbols.is_empty() && run.crypto_symbols.is_empty() {
            return Err(ConfigError::Invalid("no symbols configured".into()));
        }
        if let Some(blank) = run
            .symbols
            .iter()
            .chain(&run.crypto_symbols)
            .find(|t| t.trim().is_empty())
        {
            return Err(ConfigError::Invalid(format!("blank ticker {blank:?}")));
        }
        Ok(())
    }

    /// Tick spacing. Saturates for configs that failed validation.
    pub fn step(&self) -> Duration {
        Duration::try_minutes(self.run.step_minutes).unwrap_or(Duration::MAX)
    }

    /// Time of the last tick, clamped to the latest representable time for
    /// configs that failed validation.
    pub fn end(&self) -> DateTime<Utc> {
        self.try_end().unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn try_end(&self) -> Option<DateTime<Utc>> {
        let step = Duration::try_minutes(self.run.step_minutes)?;
        let last = i32::try_from(self.run.ticks.saturating_sub(1)).ok()?;
        let span = step.checked_mul(last)?;
        self.run.start.checked_add_signed(span)
    }

    /// Every configured symbol, equities first.
    pub fn symbols(&self) -> Vec<Symbol> {
        let crypto = Market::new(CRYPTO_MARKET);
        self.run
            .symbols
            .iter()
            .map(|t| Symbol::equity(t.trim()))
            .chain(
                self.run
                    .crypto_symbols
                    .iter()
                    .map(|t| Symbol::crypto(t.trim(), crypto.clone())),
            )
            .collect()
    }

    /// The framework half of the config, with defaults for missing slots.
    pub fn framework_config(&self) -> FrameworkConfig {
        let defaults = FrameworkConfig::default();
        FrameworkConfig {
            universe_selection: self.universe_selection.clone(),
            alpha: self.alpha.clone().unwrap_or(defaults.alpha),
            portfolio_construction: self
                .portfolio_construction
                .clone()
                .unwrap_or(defaults.portfolio_construction),
            risk_management: self
                .risk_management
                .clone()
                .unwrap_or(defaults.risk_management),
            execution: self.execution.clone().unwrap_or(defaults.execution),
            algorithm: self.run.algorithm,
            debug: self.run.debug,
        }
    }

    /// Fingerprint of the whole run: simulation settings plus the framework
    /// config with defaults filled in. The debug switch does not count.
    pub fn config_hash(&self) -> ConfigHash {
        #[derive(Serialize)]
        struct Canonical<'a> {
            run: RunSection,
            framework: &'a str,
        }
        let framework = self.framework_config().config_hash();
        let canonical = Canonical {
            run: RunSection {
                debug: false,
                ..self.run.clone()
            },
            framework: &framework.0,
        };
        let json = serde_json::to_vec(&canonical).unwrap_or_default();
        ConfigHash::from_bytes(&json)
    }
}
