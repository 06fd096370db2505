//! Universe selection: decides which universes should be active.
//!
//! The framework asks for the desired universe set whenever the model's next
//! refresh time has passed, then diffs it against the active set.

pub mod composite;
pub mod manual;
pub mod rotating;

pub use composite::CompositeUniverseSelection;
pub use manual::ManualUniverseSelection;
pub use rotating::RotatingUniverseSelection;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::domain::{Market, SecurityType, Symbol, Universe};
use crate::error::ComponentResult;

/// Trait for universe selection models.
pub trait UniverseSelectionModel: Send + Sync {
    /// Human-readable name (e.g., "manual_universe").
    fn name(&self) -> &str;

    /// Earliest time at which `create_universes` should be called again.
    fn next_refresh_time_utc(&self) -> DateTime<Utc>;

    /// The desired universe set as of `now`.
    fn create_universes(&mut self, now: DateTime<Utc>) -> ComponentResult<Vec<Universe>>;
}

/// Group symbols into one universe per security type/market pair.
pub(crate) fn group_universes(prefix: &str, symbols: &[Symbol]) -> Vec<Universe> {
    let mut groups: BTreeMap<(SecurityType, Market), Vec<Symbol>> = BTreeMap::new();
    for symbol in symbols {
        groups
            .entry((symbol.security_type, symbol.market.clone()))
            .or_default()
            .push(symbol.clone());
    }
    groups
        .into_iter()
        .map(|((security_type, market), members)| {
            Universe::new(Symbol::universe(prefix, security_type, market), members)
        })
        .collect()
}
