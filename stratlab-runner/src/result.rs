//! Result of a simulated run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stratlab_core::domain::{SecurityChanges, Symbol};
use stratlab_core::framework::FrameworkMode;

use crate::broker::{Fill, Position, Rejection};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Portfolio value after one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub time: DateTime<Utc>,
    pub cash: f64,
    pub holdings_value: f64,
    pub total: f64,
}

/// One securities-change notification delivered by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub time: DateTime<Utc>,
    pub added: Vec<Symbol>,
    pub removed: Vec<Symbol>,
}

impl ChangeRecord {
    pub fn new(time: DateTime<Utc>, changes: &SecurityChanges) -> Self {
        Self {
            time,
            added: changes.added.iter().cloned().collect(),
            removed: changes.removed.iter().cloned().collect(),
        }
    }
}

/// How many ticks ended in each controller outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickCounts {
    pub processed: u64,
    pub refresh_only: u64,
    pub disabled: u64,
}

impl TickCounts {
    pub fn total(&self) -> u64 {
        self.processed + self.refresh_only + self.disabled
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub config_hash: String,
    pub mode: FrameworkMode,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub ticks: TickCounts,
    pub universe_refreshes: u64,
    pub insights_generated: u64,
    pub orders_submitted: u64,
    pub initial_cash: f64,
    pub final_value: f64,
    pub fills: Vec<Fill>,
    pub rejections: Vec<Rejection>,
    pub positions: Vec<Position>,
    pub security_changes: Vec<ChangeRecord>,
    pub equity_curve: Vec<EquityPoint>,
}

impl RunResult {
    pub fn total_return(&self) -> f64 {
        if self.initial_cash == 0.0 {
            return 0.0;
        }
        self.final_value / self.initial_cash - 1.0
    }
}
