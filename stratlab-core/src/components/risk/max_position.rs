use crate::domain::PortfolioTarget;
use crate::error::{ComponentError, ComponentResult};
use crate::services::AlgorithmContext;

use super::RiskManagementModel;

/// Caps the absolute target quantity per symbol.
///
/// Only targets that exceed the cap produce an override; the sign of the
/// target is preserved.
#[derive(Debug, Clone)]
pub struct MaximumPositionSize {
    max_quantity: f64,
}

impl MaximumPositionSize {
    pub fn new(max_quantity: f64) -> Self {
        Self { max_quantity }
    }

    pub fn max_quantity(&self) -> f64 {
        self.max_quantity
    }
}

impl RiskManagementModel for MaximumPositionSize {
    fn name(&self) -> &str {
        "maximum_position_size"
    }

    fn manage_risk(
        &mut self,
        _ctx: &AlgorithmContext<'_>,
        targets: &[PortfolioTarget],
    ) -> ComponentResult<Vec<PortfolioTarget>> {
        if self.max_quantity.is_nan() || self.max_quantity < 0.0 {
            return Err(ComponentError::new(
                self.name(),
                format!("max_quantity must be non-negative, got {}", self.max_quantity),
            ));
        }
        Ok(targets
            .iter()
            .filter(|t| t.quantity.abs() > self.max_quantity)
            .map(|t| {
                PortfolioTarget::new(t.symbol.clone(), self.max_quantity.copysign(t.quantity))
                    .with_tag("max position")
            })
            .collect())
    }
}
