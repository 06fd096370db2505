//! Insight stamping: fills in the metadata every emitted insight carries.
//!
//! Stamping resolves everything it needs before touching the insight, so a
//! symbol the collaborators cannot resolve fails without consuming an id.

use chrono::{DateTime, Utc};

use crate::calendar::ExchangeCalendar;
use crate::domain::{Insight, InsightId};
use crate::error::FrameworkError;
use crate::services::ValueProvider;

#[derive(Debug, Clone, Default)]
pub struct InsightPipeline {
    next_id: u64,
}

impl InsightPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of insights stamped so far.
    pub fn stamped_count(&self) -> u64 {
        self.next_id
    }

    /// Stamp one insight at `now`.
    ///
    /// - `generated_time_utc` is `now`
    /// - `reference_value` is the symbol's current value for the insight type
    /// - `source_model` defaults to `alpha_name` when empty
    /// - `close_time_utc` is `now` plus the period in market-open time
    pub fn stamp(
        &mut self,
        mut insight: Insight,
        now: DateTime<Utc>,
        values: &dyn ValueProvider,
        alpha_name: &str,
        calendar: &dyn ExchangeCalendar,
    ) -> Result<Insight, FrameworkError> {
        let current = values
            .values(&insight.symbol)
            .ok_or_else(|| FrameworkError::UnresolvedSymbol {
                symbol: insight.symbol.clone(),
                what: "current value",
            })?;
        let hours = calendar
            .exchange_hours(&insight.symbol)
            .ok_or_else(|| FrameworkError::UnresolvedSymbol {
                symbol: insight.symbol.clone(),
                what: "exchange hours",
            })?;

        self.next_id += 1;
        insight.id = Some(InsightId(self.next_id));
        insight.generated_time_utc = Some(now);
        insight.reference_value = Some(current.get(insight.insight_type));
        if insight.source_model.is_empty() {
            insight.source_model = alpha_name.to_string();
        }
        insight.close_time_utc = Some(hours.add_market_time(now, insight.period.as_duration()));
        Ok(insight)
    }

    /// Stamp a batch, preserving order. Fails on the first unresolvable symbol.
    pub fn stamp_all(
        &mut self,
        insights: Vec<Insight>,
        now: DateTime<Utc>,
        values: &dyn ValueProvider,
        alpha_name: &str,
        calendar: &dyn ExchangeCalendar,
    ) -> Result<Vec<Insight>, FrameworkError> {
        insights
            .into_iter()
            .map(|insight| self.stamp(insight, now, values, alpha_name, calendar))
            .collect()
    }
}
