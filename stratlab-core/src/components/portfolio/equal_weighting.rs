//! Equal weighting: every symbol with an active non-flat insight gets the
//! same share of portfolio value.
//!
//! - Up insight: `+1/N` of total portfolio value
//! - Down insight: `-1/N`
//! - Flat insight, expired insight, or removed security: flat target
//!
//! `N` is the number of symbols with an active Up or Down insight. Targets are
//! only recomputed when something changed: a new insight arrived, an insight
//! expired, or a security was removed.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{
    Insight, InsightDirection, InsightType, PortfolioTarget, SecurityChanges, Symbol,
};
use crate::error::ComponentResult;
use crate::services::AlgorithmContext;

use super::PortfolioConstructionModel;

#[derive(Debug, Clone, Default)]
pub struct EqualWeightingPortfolio {
    /// Latest insight per symbol.
    active: BTreeMap<Symbol, Insight>,
    removed: BTreeSet<Symbol>,
}

impl EqualWeightingPortfolio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_insights(&self) -> impl Iterator<Item = &Insight> {
        self.active.values()
    }
}

impl PortfolioConstructionModel for EqualWeightingPortfolio {
    fn name(&self) -> &str {
        "equal_weighting"
    }

    fn create_targets(
        &mut self,
        ctx: &AlgorithmContext<'_>,
        insights: &[Insight],
    ) -> ComponentResult<Vec<PortfolioTarget>> {
        for insight in insights {
            self.active.insert(insight.symbol.clone(), insight.clone());
        }

        let expired: Vec<Symbol> = self
            .active
            .values()
            .filter(|i| i.is_expired(ctx.time))
            .map(|i| i.symbol.clone())
            .collect();
        let removed = std::mem::take(&mut self.removed);

        if insights.is_empty() && expired.is_empty() && removed.is_empty() {
            return Ok(Vec::new());
        }

        let mut targets = Vec::new();
        for symbol in expired.into_iter().chain(removed) {
            self.active.remove(&symbol);
            targets.push(PortfolioTarget::flat(symbol));
        }

        let directional = self
            .active
            .values()
            .filter(|i| i.direction != InsightDirection::Flat)
            .count();
        let share = if directional == 0 {
            0.0
        } else {
            1.0 / directional as f64
        };
        let portfolio_value = ctx.portfolio.total_portfolio_value();

        for insight in self.active.values() {
            if insight.direction == InsightDirection::Flat {
                targets.push(PortfolioTarget::flat(insight.symbol.clone()));
                continue;
            }
            let price = ctx.price(&insight.symbol).or(match insight.insight_type {
                InsightType::Price => insight.reference_value,
                InsightType::Volatility => None,
            });
            let Some(price) = price else {
                continue;
            };
            if let Some(target) = PortfolioTarget::percent(
                insight.symbol.clone(),
                insight.direction.sign() * share,
                price,
                portfolio_value,
            ) {
                targets.push(target);
            }
        }
        Ok(targets)
    }

    fn on_securities_changed(&mut self, changes: &SecurityChanges) {
        for symbol in &changes.removed {
            if self.active.contains_key(symbol) {
                self.removed.insert(symbol.clone());
            }
        }
    }
}
