//! Factory system: converts `ComponentConfig` into runtime trait objects.
//!
//! One factory function per component slot (`create_universe_selection`,
//! `create_alpha`, `create_portfolio`, `create_risk`, `create_execution`) plus
//! `build_model_set`, which assembles a complete `ModelSet` from a
//! `FrameworkConfig`.

use chrono::Duration;

use crate::domain::{InsightDirection, InsightPeriod, InsightType, Symbol};
use crate::fingerprint::{ComponentConfig, FrameworkConfig};
use crate::framework::ModelSet;

use super::alpha::{AlphaModel, ConstantAlpha, NullAlpha};
use super::execution::{ExecutionModel, ImmediateExecution};
use super::portfolio::{EqualWeightingPortfolio, NullPortfolioConstruction, PortfolioConstructionModel};
use super::risk::{MaximumPositionSize, NullRiskManagement, RiskManagementModel};
use super::universe_selection::{
    ManualUniverseSelection, RotatingUniverseSelection, UniverseSelectionModel,
};

// ─── Error type ──────────────────────────────────────────────────────

/// Errors that can occur during component construction.
#[derive(Debug, thiserror::Error)]
pub enum FactoryError {
    #[error("Unknown universe selection type: {0}")]
    UnknownUniverseSelection(String),
    #[error("Unknown alpha type: {0}")]
    UnknownAlpha(String),
    #[error("Unknown portfolio construction type: {0}")]
    UnknownPortfolio(String),
    #[error("Unknown risk management type: {0}")]
    UnknownRisk(String),
    #[error("Unknown execution type: {0}")]
    UnknownExecution(String),
    #[error("Invalid parameter {param} = {value} for {component}: {reason}")]
    InvalidParam {
        component: String,
        param: String,
        value: f64,
        reason: &'static str,
    },
}

// ─── Helpers ─────────────────────────────────────────────────────────

/// Extract a named f64 parameter from a `ComponentConfig`, falling back to `default`.
fn param(config: &ComponentConfig, name: &str, default: f64) -> f64 {
    config.params.get(name).copied().unwrap_or(default)
}

fn optional_param(config: &ComponentConfig, name: &str) -> Option<f64> {
    config.params.get(name).copied()
}

/// Extract a strictly positive whole-number parameter.
fn positive_int(config: &ComponentConfig, name: &str, default: f64) -> Result<i64, FactoryError> {
    let value = param(config, name, default);
    if !value.is_finite() || value < 1.0 {
        return Err(invalid(config, name, value, "must be a positive number"));
    }
    Ok(value as i64)
}

/// Longest schedule interval or insight period accepted, about a century.
const MAX_MINUTES: i64 = 100 * 366 * 24 * 60;

/// Extract a positive whole number of minutes, at most `MAX_MINUTES`.
fn minutes_param(config: &ComponentConfig, name: &str, default: f64) -> Result<i64, FactoryError> {
    let minutes = positive_int(config, name, default)?;
    if minutes > MAX_MINUTES || Duration::try_minutes(minutes).is_none() {
        let value = param(config, name, default);
        return Err(invalid(config, name, value, "must be at most 100 years"));
    }
    Ok(minutes)
}

fn invalid(config: &ComponentConfig, name: &str, value: f64, reason: &'static str) -> FactoryError {
    FactoryError::InvalidParam {
        component: config.component_type.clone(),
        param: name.to_string(),
        value,
        reason,
    }
}

// ─── Universe selection factory ──────────────────────────────────────

/// Create a universe selection model over `symbols`.
pub fn create_universe_selection(
    config: &ComponentConfig,
    symbols: &[Symbol],
) -> Result<Box<dyn UniverseSelectionModel>, FactoryError> {
    match config.component_type.as_str() {
        "manual" => Ok(Box::new(ManualUniverseSelection::new(symbols.iter().cloned()))),
        "rotating" => {
            let basket_size = positive_int(config, "basket_size", 1.0)? as usize;
            let interval = minutes_param(config, "interval_minutes", 390.0)?;
            let interval = Duration::try_minutes(interval)
                .ok_or_else(|| invalid(config, "interval_minutes", interval as f64, "out of range"))?;
            Ok(Box::new(RotatingUniverseSelection::chunked(symbols, basket_size, interval)))
        }
        other => Err(FactoryError::UnknownUniverseSelection(other.into())),
    }
}

// ─── Alpha factory ───────────────────────────────────────────────────

/// Create an alpha model from a `ComponentConfig`.
///
/// `constant` params: `direction` (sign: -1, 0, 1), `period_minutes`,
/// `insight_type` (0 = price, 1 = volatility), and optional `magnitude`,
/// `confidence`, `weight`.
pub fn create_alpha(config: &ComponentConfig) -> Result<Box<dyn AlphaModel>, FactoryError> {
    match config.component_type.as_str() {
        "null" => Ok(Box::new(NullAlpha)),
        "constant" => {
            let direction = InsightDirection::from_sign(param(config, "direction", 1.0));
            let minutes = minutes_param(config, "period_minutes", 390.0)?;
            let period = InsightPeriod::checked_minutes(minutes)
                .ok_or_else(|| invalid(config, "period_minutes", minutes as f64, "out of range"))?;
            let insight_type = match param(config, "insight_type", 0.0) {
                v if v == 0.0 => InsightType::Price,
                v if v == 1.0 => InsightType::Volatility,
                v => return Err(invalid(config, "insight_type", v, "expected 0 (price) or 1 (volatility)")),
            };
            let mut alpha = ConstantAlpha::new(insight_type, direction, period);
            if let Some(magnitude) = optional_param(config, "magnitude") {
                alpha = alpha.with_magnitude(magnitude);
            }
            if let Some(confidence) = optional_param(config, "confidence") {
                if !(0.0..=1.0).contains(&confidence) {
                    return Err(invalid(config, "confidence", confidence, "must be within [0, 1]"));
                }
                alpha = alpha.with_confidence(confidence);
            }
            if let Some(weight) = optional_param(config, "weight") {
                alpha = alpha.with_weight(weight);
            }
            Ok(Box::new(alpha))
        }
        other => Err(FactoryError::UnknownAlpha(other.into())),
    }
}

// ─── Portfolio construction factory ──────────────────────────────────

pub fn create_portfolio(
    config: &ComponentConfig,
) -> Result<Box<dyn PortfolioConstructionModel>, FactoryError> {
    match config.component_type.as_str() {
        "null" => Ok(Box::new(NullPortfolioConstruction)),
        "equal_weighting" => Ok(Box::new(EqualWeightingPortfolio::new())),
        other => Err(FactoryError::UnknownPortfolio(other.into())),
    }
}

// ─── Risk management factory ─────────────────────────────────────────

pub fn create_risk(config: &ComponentConfig) -> Result<Box<dyn RiskManagementModel>, FactoryError> {
    match config.component_type.as_str() {
        "null" => Ok(Box::new(NullRiskManagement)),
        "maximum_position_size" => {
            let max_quantity = param(config, "max_quantity", 100.0);
            if !max_quantity.is_finite() || max_quantity < 0.0 {
                return Err(invalid(config, "max_quantity", max_quantity, "must be non-negative"));
            }
            Ok(Box::new(MaximumPositionSize::new(max_quantity)))
        }
        other => Err(FactoryError::UnknownRisk(other.into())),
    }
}

// ─── Execution factory ───────────────────────────────────────────────

pub fn create_execution(config: &ComponentConfig) -> Result<Box<dyn ExecutionModel>, FactoryError> {
    match config.component_type.as_str() {
        "immediate" => Ok(Box::new(ImmediateExecution::new())),
        other => Err(FactoryError::UnknownExecution(other.into())),
    }
}

// ─── Model set ───────────────────────────────────────────────────────

/// Build a complete model set. `symbols` feeds the universe selection model.
pub fn build_model_set(config: &FrameworkConfig, symbols: &[Symbol]) -> Result<ModelSet, FactoryError> {
    let mut models = ModelSet::new(config.algorithm);
    if let Some(selection) = &config.universe_selection {
        models.set_universe_selection(create_universe_selection(selection, symbols)?);
    }
    models.set_alpha(create_alpha(&config.alpha)?);
    models.set_portfolio_construction(create_portfolio(&config.portfolio_construction)?);
    models.set_risk_management(create_risk(&config.risk_management)?);
    models.set_execution(create_execution(&config.execution)?);
    Ok(models)
}
