//! Synthetic market data feed.
//!
//! Produces one slice per tick from a seeded random walk per symbol. A symbol
//! contributes a bar only while its market is open, so ticks outside every
//! session yield empty slices (still delivered, for time-driven refreshes).
//! Each symbol draws from its own stream derived from the seed and ticker, so
//! adding a symbol does not change the path of another.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stratlab_core::domain::{Bar, Slice, Symbol};

use crate::calendar::CalendarRegistry;

/// Starting price of every walk.
pub const START_PRICE: f64 = 100.0;

/// Largest absolute per-tick return.
const MAX_STEP_RETURN: f64 = 0.002;

struct Walk {
    symbol: Symbol,
    price: f64,
    rng: StdRng,
}

impl Walk {
    fn new(seed: u64, symbol: Symbol) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&seed.to_le_bytes());
        hasher.update(symbol.ticker.as_bytes());
        hasher.update(symbol.market.as_str().as_bytes());
        let rng = StdRng::from_seed(*hasher.finalize().as_bytes());
        Self {
            symbol,
            price: START_PRICE,
            rng,
        }
    }

    fn step(&mut self, time: DateTime<Utc>) -> Bar {
        let r: f64 = self.rng.gen_range(-MAX_STEP_RETURN..MAX_STEP_RETURN);
        let open = self.price;
        let close = open * (1.0 + r);
        let high = open.max(close) * (1.0 + self.rng.gen_range(0.0..MAX_STEP_RETURN / 2.0));
        let low = open.min(close) * (1.0 - self.rng.gen_range(0.0..MAX_STEP_RETURN / 2.0));
        let volume = self.rng.gen_range(1_000..50_000u64);
        self.price = close;
        Bar {
            symbol: self.symbol.clone(),
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Iterator over the run's slices.
pub struct SyntheticFeed {
    walks: Vec<Walk>,
    calendar: CalendarRegistry,
    next_time: DateTime<Utc>,
    step: Duration,
    remaining: usize,
}

impl SyntheticFeed {
    pub fn new(
        symbols: &[Symbol],
        seed: u64,
        start: DateTime<Utc>,
        step: Duration,
        ticks: usize,
        calendar: CalendarRegistry,
    ) -> Self {
        Self {
            walks: symbols.iter().map(|s| Walk::new(seed, s.clone())).collect(),
            calendar,
            next_time: start,
            step,
            remaining: ticks,
        }
    }
}

impl Iterator for SyntheticFeed {
    type Item = Slice;

    fn next(&mut self) -> Option<Slice> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let time = self.next_time;
        self.next_time = time
            .checked_add_signed(self.step)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let calendar = &self.calendar;
        let bars: Vec<Bar> = self
            .walks
            .iter_mut()
            .filter(|walk| calendar.hours(&walk.symbol).is_open(time))
            .map(|walk| walk.step(time))
            .collect();
        Some(Slice::with_bars(time, bars))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SyntheticFeed {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stratlab_core::domain::Market;

    fn monday_open() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 14, 30, 0).unwrap()
    }

    fn closes(feed: SyntheticFeed, symbol: &Symbol) -> Vec<f64> {
        feed.filter_map(|s| s.get(symbol).map(|b| b.close)).collect()
    }

    #[test]
    fn same_seed_same_path() {
        let symbols = [Symbol::equity("SPY")];
        let a = SyntheticFeed::new(&symbols, 7, monday_open(), Duration::minutes(1), 50, CalendarRegistry::new());
        let b = SyntheticFeed::new(&symbols, 7, monday_open(), Duration::minutes(1), 50, CalendarRegistry::new());
        assert_eq!(closes(a, &symbols[0]), closes(b, &symbols[0]));
    }

    #[test]
    fn different_seed_different_path() {
        let symbols = [Symbol::equity("SPY")];
        let a = SyntheticFeed::new(&symbols, 7, monday_open(), Duration::minutes(1), 50, CalendarRegistry::new());
        let b = SyntheticFeed::new(&symbols, 8, monday_open(), Duration::minutes(1), 50, CalendarRegistry::new());
        assert_ne!(closes(a, &symbols[0]), closes(b, &symbols[0]));
    }

    #[test]
    fn adding_a_symbol_keeps_other_paths() {
        let spy = Symbol::equity("SPY");
        let alone = SyntheticFeed::new(&[spy.clone()], 7, monday_open(), Duration::minutes(1), 30, CalendarRegistry::new());
        let together = SyntheticFeed::new(
            &[spy.clone(), Symbol::equity("QQQ")],
            7,
            monday_open(),
            Duration::minutes(1),
            30,
            CalendarRegistry::new(),
        );
        assert_eq!(closes(alone, &spy), closes(together, &spy));
    }

    #[test]
    fn closed_market_yields_empty_slices() {
        let spy = Symbol::equity("SPY");
        let btc = Symbol::crypto("BTCUSD", Market::new("coinbase"));
        let before_open = monday_open() - Duration::hours(2);
        let feed = SyntheticFeed::new(&[spy.clone(), btc.clone()], 1, before_open, Duration::hours(1), 3, CalendarRegistry::new());
        let slices: Vec<Slice> = feed.collect();
        assert_eq!(slices.len(), 3);
        assert!(!slices[0].contains(&spy));
        assert!(slices[0].contains(&btc));
        assert!(slices[2].contains(&spy));

        let equities_only = SyntheticFeed::new(&[spy], 1, before_open, Duration::hours(1), 1, CalendarRegistry::new());
        assert!(equities_only.into_iter().all(|s| !s.has_data()));
    }

    #[test]
    fn bars_are_sane_and_ticks_are_spaced() {
        let feed = SyntheticFeed::new(&[Symbol::equity("SPY")], 3, monday_open(), Duration::minutes(5), 20, CalendarRegistry::new());
        assert_eq!(feed.len(), 20);
        let slices: Vec<Slice> = feed.collect();
        for pair in slices.windows(2) {
            assert_eq!(pair[1].time - pair[0].time, Duration::minutes(5));
        }
        assert!(slices.iter().flat_map(|s| s.bars.values()).all(|b| b.is_sane()));
    }
}
