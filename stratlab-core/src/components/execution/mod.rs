//! Execution: turns merged portfolio targets into orders.
//!
//! The only component that receives mutable access to the brokerage.

pub mod immediate;

pub use immediate::ImmediateExecution;

use chrono::{DateTime, Utc};

use crate::domain::{PortfolioTarget, SecurityChanges};
use crate::error::ComponentResult;
use crate::services::Brokerage;

/// Trait for execution models.
pub trait ExecutionModel: Send + Sync {
    fn name(&self) -> &str;

    fn execute(
        &mut self,
        time: DateTime<Utc>,
        targets: &[PortfolioTarget],
        brokerage: &mut dyn Brokerage,
    ) -> ComponentResult<()>;

    fn on_securities_changed(&mut self, _changes: &SecurityChanges) {}
}
