//! Security changes: instrument-set deltas for one refresh cycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::symbol::Symbol;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityChanges {
    pub added: BTreeSet<Symbol>,
    pub removed: BTreeSet<Symbol>,
}

impl SecurityChanges {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(
        added: impl IntoIterator<Item = Symbol>,
        removed: impl IntoIterator<Item = Symbol>,
    ) -> Self {
        Self {
            added: added.into_iter().collect(),
            removed: removed.into_iter().collect(),
        }
    }

    /// Delta that turns `previous` into `current`.
    pub fn between(previous: &BTreeSet<Symbol>, current: &BTreeSet<Symbol>) -> Self {
        Self {
            added: current.difference(previous).cloned().collect(),
            removed: previous.difference(current).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

impl fmt::Display for SecurityChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |set: &BTreeSet<Symbol>| {
            set.iter().map(|s| s.ticker.as_str()).collect::<Vec<_>>().join(", ")
        };
        write!(f, "added: [{}] removed: [{}]", join(&self.added), join(&self.removed))
    }
}
