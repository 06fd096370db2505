//! Exchange calendar lookup for the simulated markets.

use std::collections::BTreeMap;

use stratlab_core::calendar::{ExchangeCalendar, ExchangeHours};
use stratlab_core::domain::{Market, SecurityType, Symbol};

/// Resolves a symbol's hours by market override, then by security type.
///
/// Crypto trades around the clock; everything else follows the US equity
/// session unless its market has an override.
#[derive(Debug, Clone)]
pub struct CalendarRegistry {
    session: ExchangeHours,
    always_open: ExchangeHours,
    markets: BTreeMap<Market, ExchangeHours>,
}

impl Default for CalendarRegistry {
    fn default() -> Self {
        Self {
            session: ExchangeHours::us_equity(),
            always_open: ExchangeHours::always_open(),
            markets: BTreeMap::new(),
        }
    }
}

impl CalendarRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_market(mut self, market: Market, hours: ExchangeHours) -> Self {
        self.markets.insert(market, hours);
        self
    }

    pub fn hours(&self, symbol: &Symbol) -> &ExchangeHours {
        if let Some(hours) = self.markets.get(&symbol.market) {
            return hours;
        }
        match symbol.security_type {
            SecurityType::Crypto => &self.always_open,
            _ => &self.session,
        }
    }
}

impl ExchangeCalendar for CalendarRegistry {
    fn exchange_hours(&self, symbol: &Symbol) -> Option<&ExchangeHours> {
        Some(self.hours(symbol))
    }
}
