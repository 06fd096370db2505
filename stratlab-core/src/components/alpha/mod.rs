//! Alpha models: turn market data into insights.
//!
//! Alpha models see the slice and a read-only view of the algorithm state.
//! They never stamp their own insights: generation time, reference value and
//! close time are filled in by the framework after `update` returns.

pub mod composite;
pub mod constant;

pub use composite::CompositeAlpha;
pub use constant::ConstantAlpha;

use crate::domain::{Insight, SecurityChanges, Slice};
use crate::error::ComponentResult;
use crate::services::AlgorithmContext;

/// Trait for alpha models.
pub trait AlphaModel: Send + Sync {
    /// Human-readable name (e.g., "constant_alpha(price,up,1d)").
    ///
    /// Used as the source model of insights that do not name one.
    fn name(&self) -> &str;

    /// True for the placeholder model that produces nothing. An algorithm
    /// whose alpha is a no-op runs without the framework pipeline.
    fn is_no_op(&self) -> bool {
        false
    }

    /// Produce raw insights for one slice of data.
    fn update(&mut self, ctx: &AlgorithmContext<'_>, slice: &Slice) -> ComponentResult<Vec<Insight>>;

    fn on_securities_changed(&mut self, _changes: &SecurityChanges) {}
}

/// The no-op alpha. Default for a fresh model set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAlpha;

impl AlphaModel for NullAlpha {
    fn name(&self) -> &str {
        "null_alpha"
    }

    fn is_no_op(&self) -> bool {
        true
    }

    fn update(&mut self, _ctx: &AlgorithmContext<'_>, _slice: &Slice) -> ComponentResult<Vec<Insight>> {
        Ok(Vec::new())
    }
}
