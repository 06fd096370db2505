//! Universes: named, symbol-keyed groups of tradeable instruments.
//!
//! A universe is identified by its own [`Symbol`] and scoped to one security
//! type/market pair. Removal is two-phase: a universe is first marked
//! `dispose_requested` (its members are torn down by the data layer), and only
//! removed from the registry on a later refresh.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::symbol::{Market, SecurityType, Symbol};

/// Security type and market a universe subscribes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniverseConfig {
    pub security_type: SecurityType,
    pub market: Market,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub symbol: Symbol,
    pub config: UniverseConfig,
    pub members: BTreeSet<Symbol>,
    dispose_requested: bool,
}

impl Universe {
    pub fn new(symbol: Symbol, members: impl IntoIterator<Item = Symbol>) -> Self {
        let config = UniverseConfig {
            security_type: symbol.security_type,
            market: symbol.market.clone(),
        };
        Self {
            symbol,
            config,
            members: members.into_iter().collect(),
            dispose_requested: false,
        }
    }

    /// Empty user-defined universe for a security type/market pair.
    pub fn user_defined(security_type: SecurityType, market: Market) -> Self {
        Self::new(Symbol::user_defined_universe(security_type, market), [])
    }

    /// True when this universe's symbol is the canonical user-defined symbol
    /// for its own configuration.
    pub fn is_user_defined(&self) -> bool {
        self.symbol
            == Symbol::user_defined_universe(self.config.security_type, self.config.market.clone())
    }

    pub fn dispose_requested(&self) -> bool {
        self.dispose_requested
    }

    pub fn mark_disposed(&mut self) {
        self.dispose_requested = true;
    }
}

/// The set of active universes, keyed by universe symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UniverseRegistry {
    universes: BTreeMap<Symbol, Universe>,
}

impl UniverseRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&Universe> {
        self.universes.get(symbol)
    }

    pub fn get_mut(&mut self, symbol: &Symbol) -> Option<&mut Universe> {
        self.universes.get_mut(symbol)
    }

    pub fn contains(&self, symbol: &Symbol) -> bool {
        self.universes.contains_key(symbol)
    }

    /// Add a universe unless one with the same symbol exists. Returns true if added.
    pub fn insert_if_absent(&mut self, universe: Universe) -> bool {
        if self.universes.contains_key(&universe.symbol) {
            return false;
        }
        self.universes.insert(universe.symbol.clone(), universe);
        true
    }

    pub fn remove(&mut self, symbol: &Symbol) -> Option<Universe> {
        self.universes.remove(symbol)
    }

    pub fn symbols(&self) -> Vec<Symbol> {
        self.universes.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Universe> {
        self.universes.values()
    }

    pub fn len(&self) -> usize {
        self.universes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.universes.is_empty()
    }

    /// Add an instrument chosen explicitly by the strategy author.
    ///
    /// The instrument lands in the user-defined universe for its security
    /// type/market, which is created on first use.
    pub fn add_security(&mut self, symbol: Symbol) {
        let key = Symbol::user_defined_universe(symbol.security_type, symbol.market.clone());
        self.universes
            .entry(key)
            .or_insert_with(|| Universe::user_defined(symbol.security_type, symbol.market.clone()))
            .members
            .insert(symbol);
    }

    /// Remove an explicitly added instrument. Returns true if it was present.
    pub fn remove_security(&mut self, symbol: &Symbol) -> bool {
        let key = Symbol::user_defined_universe(symbol.security_type, symbol.market.clone());
        self.universes
            .get_mut(&key)
            .is_some_and(|u| u.members.remove(symbol))
    }

    /// Members of every universe not marked for disposal.
    pub fn active_members(&self) -> BTreeSet<Symbol> {
        self.universes
            .values()
            .filter(|u| !u.dispose_requested())
            .flat_map(|u| u.members.iter().cloned())
            .collect()
    }
}
