use crate::domain::{PortfolioTarget, SecurityChanges};
use crate::error::ComponentResult;
use crate::services::AlgorithmContext;

use super::RiskManagementModel;

/// Runs several risk models against the same targets and concatenates their
/// overrides in registration order. When two members override the same
/// symbol the earlier one wins at merge time.
pub struct CompositeRisk {
    name: String,
    models: Vec<Box<dyn RiskManagementModel>>,
}

impl CompositeRisk {
    pub fn new(models: Vec<Box<dyn RiskManagementModel>>) -> Self {
        let names: Vec<&str> = models.iter().map(|m| m.name()).collect();
        let name = format!("composite({})", names.join(","));
        Self { name, models }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl RiskManagementModel for CompositeRisk {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_no_op(&self) -> bool {
        self.models.iter().all(|m| m.is_no_op())
    }

    fn manage_risk(
        &mut self,
        ctx: &AlgorithmContext<'_>,
        targets: &[PortfolioTarget],
    ) -> ComponentResult<Vec<PortfolioTarget>> {
        let mut overrides = Vec::new();
        for model in &mut self.models {
            overrides.extend(model.manage_risk(ctx, targets)?);
        }
        Ok(overrides)
    }

    fn on_securities_changed(&mut self, changes: &SecurityChanges) {
        for model in &mut self.models {
            model.on_securities_changed(changes);
        }
    }
}
