//! Framework configuration and its fingerprint.
//!
//! - `ComponentConfig`: one pluggable component, by type name plus numeric params.
//! - `FrameworkConfig`: the five component slots plus mode flags.
//! - `config_hash()`: blake3 over canonical JSON, so two runs with the same
//!   components and parameters share a hash.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::ConfigHash;
use crate::framework::AlgorithmKind;

/// Configuration of a single pluggable component.
///
/// Uses `BTreeMap` for deterministic key ordering during serialization → hashing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentConfig {
    #[serde(rename = "type")]
    pub component_type: String,
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl ComponentConfig {
    pub fn new(component_type: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

fn default_alpha() -> ComponentConfig {
    ComponentConfig::new("null")
}

fn default_portfolio() -> ComponentConfig {
    ComponentConfig::new("null")
}

fn default_risk() -> ComponentConfig {
    ComponentConfig::new("null")
}

fn default_execution() -> ComponentConfig {
    ComponentConfig::new("immediate")
}

/// The full model set description.
///
/// A missing universe selection is kept as `None` so that validation decides
/// between the manual default and a configuration error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameworkConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universe_selection: Option<ComponentConfig>,
    #[serde(default = "default_alpha")]
    pub alpha: ComponentConfig,
    #[serde(default = "default_portfolio")]
    pub portfolio_construction: ComponentConfig,
    #[serde(default = "default_risk")]
    pub risk_management: ComponentConfig,
    #[serde(default = "default_execution")]
    pub execution: ComponentConfig,
    #[serde(default)]
    pub algorithm: AlgorithmKind,
    #[serde(default)]
    pub debug: bool,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            universe_selection: None,
            alpha: default_alpha(),
            portfolio_construction: default_portfolio(),
            risk_management: default_risk(),
            execution: default_execution(),
            algorithm: AlgorithmKind::default(),
            debug: false,
        }
    }
}

impl FrameworkConfig {
    /// Hash of the canonical JSON form. The debug switch is excluded: it does
    /// not change what the algorithm does.
    pub fn config_hash(&self) -> ConfigHash {
        let canonical = Self {
            debug: false,
            ..self.clone()
        };
        // Plain structs with BTreeMap params serialize infallibly.
        let json = serde_json::to_vec(&canonical).unwrap_or_default();
        ConfigHash::from_bytes(&json)
    }
}
