//! The five pluggable components plus the mode decision.
//!
//! A `ModelSet` is populated during setup, validated once, and from then on
//! only read by the controller. Replacing models after validation is rejected
//! by the controller, not here.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::components::alpha::{AlphaModel, CompositeAlpha, NullAlpha};
use crate::components::execution::{ExecutionModel, ImmediateExecution};
use crate::components::portfolio::{NullPortfolioConstruction, PortfolioConstructionModel};
use crate::components::risk::{CompositeRisk, NullRiskManagement, RiskManagementModel};
use crate::components::universe_selection::{
    CompositeUniverseSelection, ManualUniverseSelection, UniverseSelectionModel,
};
use crate::error::{FrameworkError, MISSING_UNIVERSE_SELECTION};

/// What the host algorithm declares itself to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmKind {
    #[default]
    Standard,
    /// Compatibility variant that may emit insights by hand.
    Bridge,
}

/// How the controller runs, decided once by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameworkMode {
    /// Full pipeline driven by the alpha model.
    Framework,
    /// Full pipeline; insights may also be emitted manually.
    Bridge,
    /// Framework disabled: the algorithm trades by hand.
    Legacy,
}

impl FrameworkMode {
    pub fn framework_enabled(&self) -> bool {
        !matches!(self, Self::Legacy)
    }
}

impl fmt::Display for FrameworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Framework => f.write_str("framework"),
            Self::Bridge => f.write_str("bridge"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

pub struct ModelSet {
    pub(crate) universe_selection: Option<Box<dyn UniverseSelectionModel>>,
    pub(crate) alpha: Box<dyn AlphaModel>,
    pub(crate) portfolio_construction: Box<dyn PortfolioConstructionModel>,
    pub(crate) risk_management: Box<dyn RiskManagementModel>,
    pub(crate) execution: Box<dyn ExecutionModel>,
    kind: AlgorithmKind,
    mode: Option<FrameworkMode>,
}

impl ModelSet {
    /// Defaults: no universe selection, null alpha/portfolio/risk, immediate execution.
    pub fn new(kind: AlgorithmKind) -> Self {
        Self {
            universe_selection: None,
            alpha: Box::new(NullAlpha),
            portfolio_construction: Box::new(NullPortfolioConstruction),
            risk_management: Box::new(NullRiskManagement),
            execution: Box::new(ImmediateExecution::new()),
            kind,
            mode: None,
        }
    }

    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    pub fn is_bridge(&self) -> bool {
        self.kind == AlgorithmKind::Bridge
    }

    /// `None` until validated.
    pub fn mode(&self) -> Option<FrameworkMode> {
        self.mode
    }

    /// True until validation decides otherwise.
    pub fn framework_enabled(&self) -> bool {
        self.mode.map_or(true, |m| m.framework_enabled())
    }

    pub fn has_universe_selection(&self) -> bool {
        self.universe_selection.is_some()
    }

    pub fn alpha_name(&self) -> &str {
        self.alpha.name()
    }

    // ─── Setters ─────────────────────────────────────────────────────

    pub fn set_universe_selection(&mut self, model: Box<dyn UniverseSelectionModel>) {
        self.universe_selection = Some(model);
    }

    /// Add a selection model alongside the current one.
    pub fn add_universe_selection(&mut self, model: Box<dyn UniverseSelectionModel>) {
        self.universe_selection = Some(match self.universe_selection.take() {
            None => model,
            Some(current) => Box::new(CompositeUniverseSelection::new(vec![current, model])),
        });
    }

    pub fn set_alpha(&mut self, model: Box<dyn AlphaModel>) {
        self.alpha = model;
    }

    /// Add an alpha model alongside the current one. A no-op current model is
    /// replaced rather than wrapped.
    pub fn add_alpha(&mut self, model: Box<dyn AlphaModel>) {
        if self.alpha.is_no_op() {
            self.alpha = model;
            return;
        }
        let current = std::mem::replace(&mut self.alpha, Box::new(NullAlpha));
        self.alpha = Box::new(CompositeAlpha::new(vec![current, model]));
    }

    pub fn set_portfolio_construction(&mut self, model: Box<dyn PortfolioConstructionModel>) {
        self.portfolio_construction = model;
    }

    pub fn set_risk_management(&mut self, model: Box<dyn RiskManagementModel>) {
        self.risk_management = model;
    }

    pub fn add_risk_management(&mut self, model: Box<dyn RiskManagementModel>) {
        if self.risk_management.is_no_op() {
            self.risk_management = model;
            return;
        }
        let current = std::mem::replace(&mut self.risk_management, Box::new(NullRiskManagement));
        self.risk_management = Box::new(CompositeRisk::new(vec![current, model]));
    }

    pub fn set_execution(&mut self, model: Box<dyn ExecutionModel>) {
        self.execution = model;
    }

    // ─── Validation ──────────────────────────────────────────────────

    /// Decide the framework mode and fill in a missing universe selection.
    ///
    /// A no-op alpha outside bridge mode disables the framework. Legacy and
    /// bridge algorithms fall back to manual selection of the securities the
    /// author adds; framework algorithms must configure one.
    pub fn validate(&mut self) -> Result<FrameworkMode, FrameworkError> {
        let bridge = self.is_bridge();
        let mut enabled = true;

        if self.alpha.is_no_op() && !bridge {
            enabled = false;
            info!(
                alpha = self.alpha.name(),
                "no alpha model configured; framework disabled, running as a legacy algorithm"
            );
        }

        if self.universe_selection.is_none() {
            if !enabled || bridge {
                self.universe_selection = Some(Box::new(ManualUniverseSelection::default()));
            } else {
                return Err(FrameworkError::Configuration(MISSING_UNIVERSE_SELECTION.into()));
            }
        }

        let mode = match (bridge, enabled) {
            (true, _) => FrameworkMode::Bridge,
            (false, true) => FrameworkMode::Framework,
            (false, false) => FrameworkMode::Legacy,
        };
        self.mode = Some(mode);
        Ok(mode)
    }
}

impl fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelSet")
            .field(
                "universe_selection",
                &self.universe_selection.as_ref().map(|m| m.name()),
            )
            .field("alpha", &self.alpha.name())
            .field("portfolio_construction", &self.portfolio_construction.name())
            .field("risk_management", &self.risk_management.name())
            .field("execution", &self.execution.name())
            .field("kind", &self.kind)
            .field("mode", &self.mode)
            .finish()
    }
}
