//! Portfolio construction: converts insights into desired holdings.

pub mod equal_weighting;

pub use equal_weighting::EqualWeightingPortfolio;

use crate::domain::{Insight, PortfolioTarget, SecurityChanges};
use crate::error::ComponentResult;
use crate::services::AlgorithmContext;

/// Trait for portfolio construction models.
///
/// Called once per data tick with the stamped insights of that tick (possibly
/// empty). Models that keep insights across ticks must do so themselves.
pub trait PortfolioConstructionModel: Send + Sync {
    fn name(&self) -> &str;

    fn create_targets(
        &mut self,
        ctx: &AlgorithmContext<'_>,
        insights: &[Insight],
    ) -> ComponentResult<Vec<PortfolioTarget>>;

    fn on_securities_changed(&mut self, _changes: &SecurityChanges) {}
}

/// Produces no targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPortfolioConstruction;

impl PortfolioConstructionModel for NullPortfolioConstruction {
    fn name(&self) -> &str {
        "null_portfolio"
    }

    fn create_targets(
        &mut self,
        _ctx: &AlgorithmContext<'_>,
        _insights: &[Insight],
    ) -> ComponentResult<Vec<PortfolioTarget>> {
        Ok(Vec::new())
    }
}
