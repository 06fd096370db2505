//! Rotating selection: cycles through fixed baskets on a schedule.
//!
//! Every rotation creates fresh universes (`ROTATION<n>-...`, `n` counting
//! rotations), so the previous rotation's universes drop out of the desired
//! set and go through the usual two-phase removal, even when a basket comes
//! around again.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{Symbol, Universe};
use crate::error::{ComponentError, ComponentResult};

use super::{group_universes, UniverseSelectionModel};

#[derive(Debug, Clone)]
pub struct RotatingUniverseSelection {
    baskets: Vec<Vec<Symbol>>,
    interval: Duration,
    rotation: u64,
    started: bool,
    next_refresh: DateTime<Utc>,
}

impl RotatingUniverseSelection {
    pub fn new(baskets: Vec<Vec<Symbol>>, interval: Duration) -> Self {
        Self {
            baskets,
            interval,
            rotation: 0,
            started: false,
            next_refresh: DateTime::<Utc>::MIN_UTC,
        }
    }

    /// Split `symbols` into consecutive baskets of `basket_size`.
    pub fn chunked(symbols: &[Symbol], basket_size: usize, interval: Duration) -> Self {
        let size = basket_size.max(1);
        Self::new(symbols.chunks(size).map(|c| c.to_vec()).collect(), interval)
    }

    pub fn current_basket(&self) -> usize {
        if self.baskets.is_empty() {
            return 0;
        }
        (self.rotation % self.baskets.len() as u64) as usize
    }
}

impl UniverseSelectionModel for RotatingUniverseSelection {
    fn name(&self) -> &str {
        "rotating_universe"
    }

    fn next_refresh_time_utc(&self) -> DateTime<Utc> {
        self.next_refresh
    }

    fn create_universes(&mut self, now: DateTime<Utc>) -> ComponentResult<Vec<Universe>> {
        if self.baskets.is_empty() {
            return Ok(Vec::new());
        }
        if self.interval <= Duration::zero() {
            return Err(ComponentError::new(self.name(), "rotation interval must be positive"));
        }
        if now >= self.next_refresh {
            if self.started {
                self.rotation += 1;
            }
            self.started = true;
            self.next_refresh = now
                .checked_add_signed(self.interval)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);
        }
        let prefix = format!("ROTATION{}", self.rotation);
        Ok(group_universes(&prefix, &self.baskets[self.current_basket()]))
    }
}
