//! Risk management: reviews portfolio targets and returns overrides.
//!
//! The returned targets replace the portfolio construction targets for the
//! symbols they cover. Returning nothing leaves every target untouched.

pub mod composite;
pub mod max_position;

pub use composite::CompositeRisk;
pub use max_position::MaximumPositionSize;

use crate::domain::{PortfolioTarget, SecurityChanges};
use crate::error::ComponentResult;
use crate::services::AlgorithmContext;

/// Trait for risk management models.
pub trait RiskManagementModel: Send + Sync {
    fn name(&self) -> &str;

    /// True for the placeholder model; `add_risk_management` replaces it
    /// instead of wrapping it.
    fn is_no_op(&self) -> bool {
        false
    }

    fn manage_risk(
        &mut self,
        ctx: &AlgorithmContext<'_>,
        targets: &[PortfolioTarget],
    ) -> ComponentResult<Vec<PortfolioTarget>>;

    fn on_securities_changed(&mut self, _changes: &SecurityChanges) {}
}

/// Never overrides anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRiskManagement;

impl RiskManagementModel for NullRiskManagement {
    fn name(&self) -> &str {
        "null_risk"
    }

    fn is_no_op(&self) -> bool {
        true
    }

    fn manage_risk(
        &mut self,
        _ctx: &AlgorithmContext<'_>,
        _targets: &[PortfolioTarget],
    ) -> ComponentResult<Vec<PortfolioTarget>> {
        Ok(Vec::new())
    }
}
