//! Target pipeline: portfolio construction, risk overrides, merge.
//!
//! Risk overrides win: for any symbol they cover, the merged output carries
//! the override and never the original target. The merged output holds at
//! most one target per symbol, in symbol order.

use std::collections::BTreeMap;

use crate::components::portfolio::PortfolioConstructionModel;
use crate::components::risk::RiskManagementModel;
use crate::domain::{Insight, PortfolioTarget, PortfolioTargetCollection, Symbol};
use crate::error::ComponentResult;
use crate::services::AlgorithmContext;

/// Everything one pass of the pipeline produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetRun {
    pub targets: Vec<PortfolioTarget>,
    pub overrides: Vec<PortfolioTarget>,
    pub merged: Vec<PortfolioTarget>,
}

/// Concatenate `overrides` then `targets`, keeping the first entry per symbol.
pub fn merge_targets(overrides: &[PortfolioTarget], targets: &[PortfolioTarget]) -> Vec<PortfolioTarget> {
    let mut merged: BTreeMap<&Symbol, &PortfolioTarget> = BTreeMap::new();
    for target in overrides.iter().chain(targets) {
        merged.entry(&target.symbol).or_insert(target);
    }
    merged.into_values().cloned().collect()
}

/// Run portfolio construction and risk management for one tick.
///
/// `holdings` receives the construction targets first and the overrides
/// second, so it ends up agreeing with the merged output.
pub fn run_targets(
    ctx: &AlgorithmContext<'_>,
    insights: &[Insight],
    portfolio_construction: &mut dyn PortfolioConstructionModel,
    risk_management: &mut dyn RiskManagementModel,
    holdings: &mut PortfolioTargetCollection,
) -> ComponentResult<TargetRun> {
    let targets = portfolio_construction.create_targets(ctx, insights)?;
    holdings.apply(&targets);

    let overrides = risk_management.manage_risk(ctx, &targets)?;
    holdings.apply(&overrides);

    let merged = merge_targets(&overrides, &targets);
    Ok(TargetRun {
        targets,
        overrides,
        merged,
    })
}
