//! Exchange hours and calendar lookup.
//!
//! Session times are expressed directly in UTC. An insight's period counts
//! only market-open time, so a one-hour insight generated fifteen minutes
//! before the close expires forty-five minutes into the next session.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::Symbol;

/// Regular trading session for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub trading_days: Vec<Weekday>,
    /// Markets that never close (crypto). Session fields are ignored.
    pub always_open: bool,
}

impl ExchangeHours {
    pub fn new(open: NaiveTime, close: NaiveTime, trading_days: Vec<Weekday>) -> Self {
        Self {
            open,
            close,
            trading_days,
            always_open: false,
        }
    }

    pub fn always_open() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default(),
            close: NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default(),
            trading_days: Vec::new(),
            always_open: true,
        }
    }

    /// US equity regular session, 14:30–21:00 UTC, Monday to Friday.
    pub fn us_equity() -> Self {
        Self::new(
            NaiveTime::from_hms_opt(14, 30, 0).unwrap_or_default(),
            NaiveTime::from_hms_opt(21, 0, 0).unwrap_or_default(),
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri],
        )
    }

    fn has_sessions(&self) -> bool {
        !self.trading_days.is_empty() && self.open < self.close
    }

    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        self.always_open || self.trading_days.contains(&date.weekday())
    }

    pub fn is_open(&self, time: DateTime<Utc>) -> bool {
        if self.always_open {
            return true;
        }
        let t = time.time();
        self.is_trading_day(time.date_naive()) && self.open <= t && t < self.close
    }

    /// Advance `start` by `period` of market-open time.
    ///
    /// Time outside the session does not count. A start outside the session
    /// begins counting at the next open. Degenerate calendars (no trading
    /// days, or close not after open) fall back to wall-clock addition.
    pub fn add_market_time(&self, start: DateTime<Utc>, period: Duration) -> DateTime<Utc> {
        if period <= Duration::zero() {
            return start;
        }
        // Market time never finishes before wall-clock time.
        let Some(wall_clock) = start.checked_add_signed(period) else {
            return DateTime::<Utc>::MAX_UTC;
        };
        if self.always_open || !self.has_sessions() {
            return wall_clock;
        }

        let mut remaining = period;
        let mut cursor = start;
        loop {
            let day = cursor.date_naive();
            if self.is_trading_day(day) {
                let open = Utc.from_utc_datetime(&day.and_time(self.open));
                let close = Utc.from_utc_datetime(&day.and_time(self.close));
                if cursor < open {
                    cursor = open;
                }
                if cursor < close {
                    let available = close - cursor;
                    if remaining <= available {
                        return cursor + remaining;
                    }
                    remaining = remaining - available;
                }
            }
            let Some(next) = day.succ_opt().and_then(|d| d.and_hms_opt(0, 0, 0)) else {
                return DateTime::<Utc>::MAX_UTC;
            };
            cursor = Utc.from_utc_datetime(&next);
        }
    }
}

impl Default for ExchangeHours {
    fn default() -> Self {
        Self::us_equity()
    }
}

/// Looks up a symbol's exchange hours.
pub trait ExchangeCalendar: Send + Sync {
    fn exchange_hours(&self, symbol: &Symbol) -> Option<&ExchangeHours>;
}
