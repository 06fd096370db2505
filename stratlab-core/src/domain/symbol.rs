//! Symbols: instrument identity keyed by ticker, security type and market.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad instrument class. Together with [`Market`] it scopes universes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityType {
    Equity,
    Forex,
    Crypto,
    Future,
    Base,
}

impl SecurityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equity => "equity",
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Future => "future",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Market (venue family) a symbol trades on, e.g. `usa` or `binance`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Market(pub String);

impl Market {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into().to_lowercase())
    }

    pub fn usa() -> Self {
        Self::new("usa")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tradeable instrument or a universe identifier.
///
/// Ordering is ticker-first, so sorted collections of symbols iterate in
/// ticker-lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub ticker: String,
    pub security_type: SecurityType,
    pub market: Market,
}

impl Symbol {
    pub fn new(ticker: impl Into<String>, security_type: SecurityType, market: Market) -> Self {
        Self {
            ticker: ticker.into().to_uppercase(),
            security_type,
            market,
        }
    }

    /// US equity shorthand.
    pub fn equity(ticker: impl Into<String>) -> Self {
        Self::new(ticker, SecurityType::Equity, Market::usa())
    }

    pub fn crypto(ticker: impl Into<String>, market: Market) -> Self {
        Self::new(ticker, SecurityType::Crypto, market)
    }

    /// Identifier for a universe scoped to a security type and market.
    pub fn universe(name: &str, security_type: SecurityType, market: Market) -> Self {
        let ticker = format!("{}-{}-{}", name, security_type, market);
        Self::new(ticker, security_type, market)
    }

    /// The canonical symbol of the user-defined universe for a security type/market pair.
    ///
    /// Holds the instruments the strategy author added explicitly. Never removed
    /// by universe refresh.
    pub fn user_defined_universe(security_type: SecurityType, market: Market) -> Self {
        Self::universe("USERDEFINED", security_type, market)
    }

    pub fn is_user_defined_universe(&self) -> bool {
        *self == Self::user_defined_universe(self.security_type, self.market.clone())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ticker)
    }
}
