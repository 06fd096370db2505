//! Portfolio targets: desired holdings per symbol.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::symbol::Symbol;

/// Quantities closer than this are treated as equal.
pub const QUANTITY_EPSILON: f64 = 1e-9;

/// A desired holding for one symbol, in units of the instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTarget {
    pub symbol: Symbol,
    pub quantity: f64,
    pub tag: Option<String>,
}

impl PortfolioTarget {
    pub fn new(symbol: Symbol, quantity: f64) -> Self {
        Self {
            symbol,
            quantity,
            tag: None,
        }
    }

    /// Target for `percent` of `portfolio_value` at `price`, truncated to whole units.
    ///
    /// Returns `None` when the price is not positive.
    pub fn percent(symbol: Symbol, percent: f64, price: f64, portfolio_value: f64) -> Option<Self> {
        if price <= 0.0 || !price.is_finite() {
            return None;
        }
        let quantity = (percent * portfolio_value / price).trunc();
        Some(Self::new(symbol, quantity))
    }

    /// Liquidation target.
    pub fn flat(symbol: Symbol) -> Self {
        Self::new(symbol, 0.0)
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

impl fmt::Display for PortfolioTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.symbol, self.quantity)?;
        if let Some(tag) = &self.tag {
            write!(f, " ({tag})")?;
        }
        Ok(())
    }
}

/// Symbol-keyed target set: at most one target per symbol.
///
/// Applying a target for a symbol replaces the previous one. Iteration is in
/// symbol order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioTargetCollection {
    targets: BTreeMap<Symbol, PortfolioTarget>,
}

impl PortfolioTargetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, targets: &[PortfolioTarget]) {
        for target in targets {
            self.targets.insert(target.symbol.clone(), target.clone());
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&PortfolioTarget> {
        self.targets.get(symbol)
    }

    pub fn remove(&mut self, symbol: &Symbol) -> Option<PortfolioTarget> {
        self.targets.remove(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PortfolioTarget> {
        self.targets.values()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Drop every target already reached by current holdings.
    pub fn clear_fulfilled<F>(&mut self, holdings: F)
    where
        F: Fn(&Symbol) -> f64,
    {
        self.targets
            .retain(|symbol, target| (holdings(symbol) - target.quantity).abs() > QUANTITY_EPSILON);
    }
}
