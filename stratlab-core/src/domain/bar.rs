//! Bar and Slice: the market data delivered to the framework each tick.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::symbol::Symbol;

/// OHLCV bar for a single symbol ending at `time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: Symbol,
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Returns true if any OHLC field is NaN (void bar).
    pub fn is_void(&self) -> bool {
        self.open.is_nan() || self.high.is_nan() || self.low.is_nan() || self.close.is_nan()
    }

    /// Basic OHLC sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// All data that arrived for one tick.
///
/// A slice with no bars is still delivered so that time-driven work (universe
/// refresh) can happen on data-less ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slice {
    pub time: DateTime<Utc>,
    pub bars: BTreeMap<Symbol, Bar>,
}

impl Slice {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self {
            time,
            bars: BTreeMap::new(),
        }
    }

    pub fn with_bars(time: DateTime<Utc>, bars: impl IntoIterator<Item = Bar>) -> Self {
        let mut slice = Self::new(time);
        for bar in bars {
            slice.insert(bar);
        }
        slice
    }

    /// Void bars are dropped: they carry no usable data.
    pub fn insert(&mut self, bar: Bar) {
        if !bar.is_void() {
            self.bars.insert(bar.symbol.clone(), bar);
        }
    }

    pub fn has_data(&self) -> bool {
        !self.bars.is_empty()
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Bar> {
        self.bars.get(symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.bars.contains_key(symbol)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.bars.keys()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
