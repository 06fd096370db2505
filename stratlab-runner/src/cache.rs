//! Security value cache: the host's value provider.
//!
//! Updated from every slice before the controller runs. Holds the last close
//! and an exponentially weighted volatility of bar-to-bar returns.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::debug;

use stratlab_core::domain::{Slice, Symbol};
use stratlab_core::services::{SecurityValues, ValueProvider};

/// Decay of the EWMA variance (RiskMetrics daily convention).
pub const DEFAULT_LAMBDA: f64 = 0.94;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub price: f64,
    pub variance: f64,
    pub observations: u64,
    pub updated: DateTime<Utc>,
}

impl CacheEntry {
    pub fn volatility(&self) -> f64 {
        self.variance.sqrt()
    }
}

#[derive(Debug, Clone)]
pub struct SecurityCache {
    lambda: f64,
    entries: BTreeMap<Symbol, CacheEntry>,
}

impl Default for SecurityCache {
    fn default() -> Self {
        Self::new(DEFAULT_LAMBDA)
    }
}

impl SecurityCache {
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda: lambda.clamp(0.0, 1.0),
            entries: BTreeMap::new(),
        }
    }

    /// Fold every sane bar of the slice into the cache. Void or insane bars
    /// leave the previous values in place.
    pub fn update(&mut self, slice: &Slice) {
        for (symbol, bar) in &slice.bars {
            if !bar.is_sane() {
                debug!(%symbol, time = %slice.time, "skipping unusable bar");
                continue;
            }
            match self.entries.get_mut(symbol) {
                Some(entry) => {
                    let r = bar.close / entry.price - 1.0;
                    entry.variance = self.lambda * entry.variance + (1.0 - self.lambda) * r * r;
                    entry.price = bar.close;
                    entry.observations += 1;
                    entry.updated = slice.time;
                }
                None => {
                    self.entries.insert(
                        symbol.clone(),
                        CacheEntry {
                            price: bar.close,
                            variance: 0.0,
                            observations: 1,
                            updated: slice.time,
                        },
                    );
                }
            }
        }
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&CacheEntry> {
        self.entries.get(symbol)
    }

    pub fn price(&self, symbol: &Symbol) -> Option<f64> {
        self.entries.get(symbol).map(|e| e.price)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ValueProvider for SecurityCache {
    fn values(&self, symbol: &Symbol) -> Option<SecurityValues> {
        self.entries.get(symbol).map(|e| SecurityValues {
            price: e.price,
            volatility: e.volatility(),
        })
    }
}
