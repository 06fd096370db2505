//! Insights: timestamped trading signals for one symbol.
//!
//! An alpha model creates an insight with its symbol, type, direction and
//! validity period. Everything else (generation time, reference value, source
//! model, close time, id) is filled in when the framework stamps it. An
//! insight that has not been stamped never leaves the framework.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::InsightId;
use super::symbol::Symbol;

/// What the insight predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    Price,
    Volatility,
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Price => f.write_str("price"),
            Self::Volatility => f.write_str("volatility"),
        }
    }
}

/// Predicted direction of the insight's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightDirection {
    Down,
    Flat,
    Up,
}

impl InsightDirection {
    pub fn sign(&self) -> f64 {
        match self {
            Self::Down => -1.0,
            Self::Flat => 0.0,
            Self::Up => 1.0,
        }
    }

    pub fn from_sign(value: f64) -> Self {
        if value > 0.0 {
            Self::Up
        } else if value < 0.0 {
            Self::Down
        } else {
            Self::Flat
        }
    }
}

impl fmt::Display for InsightDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Down => f.write_str("down"),
            Self::Flat => f.write_str("flat"),
            Self::Up => f.write_str("up"),
        }
    }
}

/// Validity period, stored in whole seconds so it serializes cleanly.
///
/// The period counts market-open time; the close time is derived from the
/// symbol's exchange hours at stamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InsightPeriod(pub i64);

impl InsightPeriod {
    pub fn from_duration(duration: Duration) -> Self {
        Self(duration.num_seconds())
    }

    /// `n` minutes, or `None` when that many seconds is outside chrono's range.
    pub fn checked_minutes(n: i64) -> Option<Self> {
        let seconds = n.checked_mul(60)?;
        Duration::try_seconds(seconds).map(|_| Self(seconds))
    }

    pub fn minutes(n: i64) -> Self {
        Self(n.saturating_mul(60))
    }

    pub fn hours(n: i64) -> Self {
        Self(n.saturating_mul(3_600))
    }

    pub fn days(n: i64) -> Self {
        Self(n.saturating_mul(86_400))
    }

    /// Saturates at chrono's limits.
    pub fn as_duration(&self) -> Duration {
        Duration::try_seconds(self.0).unwrap_or(if self.0 < 0 { Duration::MIN } else { Duration::MAX })
    }
}

impl fmt::Display for InsightPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        if s != 0 && s % 86_400 == 0 {
            write!(f, "{}d", s / 86_400)
        } else if s != 0 && s % 3_600 == 0 {
            write!(f, "{}h", s / 3_600)
        } else if s != 0 && s % 60 == 0 {
            write!(f, "{}m", s / 60)
        } else {
            write!(f, "{}s", s)
        }
    }
}

/// A trading signal for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    /// Assigned at stamping.
    pub id: Option<InsightId>,
    pub symbol: Symbol,
    pub insight_type: InsightType,
    pub direction: InsightDirection,
    pub period: InsightPeriod,
    pub magnitude: Option<f64>,
    pub confidence: Option<f64>,
    pub weight: Option<f64>,
    /// Name of the model that produced the insight. Empty until stamped unless
    /// the producing model set it.
    pub source_model: String,
    pub tag: Option<String>,
    pub generated_time_utc: Option<DateTime<Utc>>,
    pub close_time_utc: Option<DateTime<Utc>>,
    /// The symbol's value for `insight_type` at stamping time.
    pub reference_value: Option<f64>,
}

impl Insight {
    pub fn new(
        symbol: Symbol,
        insight_type: InsightType,
        direction: InsightDirection,
        period: InsightPeriod,
    ) -> Self {
        Self {
            id: None,
            symbol,
            insight_type,
            direction,
            period,
            magnitude: None,
            confidence: None,
            weight: None,
            source_model: String::new(),
            tag: None,
            generated_time_utc: None,
            close_time_utc: None,
            reference_value: None,
        }
    }

    pub fn price(symbol: Symbol, period: InsightPeriod, direction: InsightDirection) -> Self {
        Self::new(symbol, InsightType::Price, direction, period)
    }

    pub fn volatility(symbol: Symbol, period: InsightPeriod, direction: InsightDirection) -> Self {
        Self::new(symbol, InsightType::Volatility, direction, period)
    }

    pub fn with_magnitude(mut self, magnitude: f64) -> Self {
        self.magnitude = Some(magnitude);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_source_model(mut self, source_model: impl Into<String>) -> Self {
        self.source_model = source_model.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// True once every mandatory metadata field has been filled in.
    pub fn is_stamped(&self) -> bool {
        self.id.is_some()
            && self.generated_time_utc.is_some()
            && self.close_time_utc.is_some()
            && self.reference_value.is_some()
            && !self.source_model.is_empty()
    }

    /// Active between generation (inclusive) and close (exclusive).
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match (self.generated_time_utc, self.close_time_utc) {
            (Some(generated), Some(close)) => generated <= now && now < close,
            _ => false,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.close_time_utc.is_some_and(|close| now >= close)
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} within {}",
            self.symbol, self.insight_type, self.direction, self.period
        )?;
        if !self.source_model.is_empty() {
            write!(f, " from {}", self.source_model)?;
        }
        Ok(())
    }
}
