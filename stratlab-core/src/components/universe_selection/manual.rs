//! Manual selection: trades exactly the instruments it was given.
//!
//! Creates its universes once; the refresh time never arrives afterwards.

use chrono::{DateTime, Utc};

use crate::domain::{Symbol, Universe};
use crate::error::ComponentResult;

use super::{group_universes, UniverseSelectionModel};

#[derive(Debug, Clone, Default)]
pub struct ManualUniverseSelection {
    symbols: Vec<Symbol>,
}

impl ManualUniverseSelection {
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }
}

impl UniverseSelectionModel for ManualUniverseSelection {
    fn name(&self) -> &str {
        "manual_universe"
    }

    fn next_refresh_time_utc(&self) -> DateTime<Utc> {
        DateTime::<Utc>::MAX_UTC
    }

    fn create_universes(&mut self, _now: DateTime<Utc>) -> ComponentResult<Vec<Universe>> {
        Ok(group_universes("MANUAL", &self.symbols))
    }
}
