//! Immediate execution: market orders for the full remaining delta.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{PortfolioTarget, PortfolioTargetCollection, SecurityChanges, QUANTITY_EPSILON};
use crate::error::ComponentResult;
use crate::services::{Brokerage, OrderRequest};

use super::ExecutionModel;

/// Submits `target - holdings - open orders` as a market order for every
/// unfulfilled target. Targets stay pending until holdings reach them.
#[derive(Debug, Clone, Default)]
pub struct ImmediateExecution {
    pending: PortfolioTargetCollection,
}

impl ImmediateExecution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &PortfolioTargetCollection {
        &self.pending
    }
}

impl ExecutionModel for ImmediateExecution {
    fn name(&self) -> &str {
        "immediate"
    }

    fn execute(
        &mut self,
        time: DateTime<Utc>,
        targets: &[PortfolioTarget],
        brokerage: &mut dyn Brokerage,
    ) -> ComponentResult<()> {
        self.pending.apply(targets);

        let orders: Vec<OrderRequest> = self
            .pending
            .iter()
            .filter_map(|target| {
                let delta = target.quantity
                    - brokerage.holdings(&target.symbol)
                    - brokerage.open_order_quantity(&target.symbol);
                (delta.abs() > QUANTITY_EPSILON).then(|| {
                    let order = OrderRequest::market(target.symbol.clone(), delta, time);
                    match &target.tag {
                        Some(tag) => order.with_tag(tag.clone()),
                        None => order,
                    }
                })
            })
            .collect();

        for order in orders {
            debug!(symbol = %order.symbol, quantity = order.quantity, "submitting market order");
            brokerage.submit_order(order)?;
        }

        self.pending.clear_fulfilled(|symbol| brokerage.holdings(symbol));
        Ok(())
    }

    /// Pending targets of added securities are dropped so a stale target from
    /// an earlier membership is not resumed. Removed securities keep theirs
    /// until liquidation completes.
    fn on_securities_changed(&mut self, changes: &SecurityChanges) {
        for symbol in &changes.added {
            self.pending.remove(symbol);
        }
    }
}
