//! Scheduled recomputation of the active universe set.
//!
//! Removal is two-phase. A universe missing from the desired set is first
//! marked disposed so its subscriptions can be torn down; if it is still
//! missing on a later refresh it is removed. User-defined universes are never
//! touched by this path.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::debug;

use crate::components::universe_selection::UniverseSelectionModel;
use crate::domain::{Symbol, UniverseRegistry};
use crate::error::ComponentResult;

/// What one refresh changed, by universe symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub added: Vec<Symbol>,
    pub disposed: Vec<Symbol>,
    pub removed: Vec<Symbol>,
}

impl RefreshOutcome {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.disposed.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct UniverseRefreshScheduler {
    last_refresh_utc: Option<DateTime<Utc>>,
    refresh_count: u64,
}

impl UniverseRefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_refresh_utc(&self) -> Option<DateTime<Utc>> {
        self.last_refresh_utc
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count
    }

    /// Due once the model's next refresh time has arrived, at most once per
    /// timestamp.
    pub fn is_due(&self, now: DateTime<Utc>, selection: &dyn UniverseSelectionModel) -> bool {
        now >= selection.next_refresh_time_utc()
            && self.last_refresh_utc.map_or(true, |last| now > last)
    }

    /// Refresh if due. `None` when nothing was evaluated.
    pub fn maybe_refresh(
        &mut self,
        now: DateTime<Utc>,
        selection: &mut dyn UniverseSelectionModel,
        active: &mut UniverseRegistry,
    ) -> ComponentResult<Option<RefreshOutcome>> {
        if !self.is_due(now, selection) {
            return Ok(None);
        }
        self.refresh(now, selection, active).map(Some)
    }

    /// Unconditionally diff the desired universes against `active`.
    pub fn refresh(
        &mut self,
        now: DateTime<Utc>,
        selection: &mut dyn UniverseSelectionModel,
        active: &mut UniverseRegistry,
    ) -> ComponentResult<RefreshOutcome> {
        let desired = selection.create_universes(now)?;
        let desired_symbols: BTreeSet<&Symbol> = desired.iter().map(|u| &u.symbol).collect();
        let mut outcome = RefreshOutcome::default();

        for symbol in active.symbols() {
            if desired_symbols.contains(&symbol) {
                continue;
            }
            let Some(universe) = active.get_mut(&symbol) else {
                continue;
            };
            if universe.is_user_defined() {
                continue;
            }
            if universe.dispose_requested() {
                active.remove(&symbol);
                outcome.removed.push(symbol);
            } else {
                universe.mark_disposed();
                outcome.disposed.push(symbol);
            }
        }

        for universe in desired {
            let symbol = universe.symbol.clone();
            if active.insert_if_absent(universe) {
                outcome.added.push(symbol);
            }
        }

        self.last_refresh_utc = Some(now);
        self.refresh_count += 1;
        debug!(
            model = selection.name(),
            added = outcome.added.len(),
            disposed = outcome.disposed.len(),
            removed = outcome.removed.len(),
            "universe refresh"
        );
        Ok(outcome)
    }
}
