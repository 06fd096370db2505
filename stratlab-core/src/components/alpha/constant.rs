//! Constant alpha: the same view on every tracked security.
//!
//! Emits one insight per tracked symbol present in the slice, then stays quiet
//! for that symbol until the insight period has elapsed.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use crate::domain::{
    Insight, InsightDirection, InsightPeriod, InsightType, SecurityChanges, Slice, Symbol,
};
use crate::error::ComponentResult;
use crate::services::AlgorithmContext;

use super::AlphaModel;

#[derive(Debug, Clone)]
pub struct ConstantAlpha {
    name: String,
    insight_type: InsightType,
    direction: InsightDirection,
    period: InsightPeriod,
    magnitude: Option<f64>,
    confidence: Option<f64>,
    weight: Option<f64>,
    /// Tracked securities and the time of their last emitted insight.
    last_emitted: BTreeMap<Symbol, Option<DateTime<Utc>>>,
}

impl ConstantAlpha {
    pub fn new(insight_type: InsightType, direction: InsightDirection, period: InsightPeriod) -> Self {
        Self {
            name: format!("constant_alpha({insight_type},{direction},{period})"),
            insight_type,
            direction,
            period,
            magnitude: None,
            confidence: None,
            weight: None,
            last_emitted: BTreeMap::new(),
        }
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

    pub fn tracked(&self) -> impl Iterator<Item = &Symbol> {
        self.last_emitted.keys()
    }

    fn is_due(&self, last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match last {
            None => true,
            Some(last) => now - last >= self.period.as_duration(),
        }
    }

    fn build(&self, symbol: Symbol) -> Insight {
        let mut insight = Insight::new(symbol, self.insight_type, self.direction, self.period);
        insight.magnitude = self.magnitude;
        insight.confidence = self.confidence;
        insight.weight = self.weight;
        insight
    }
}

impl AlphaModel for ConstantAlpha {
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&mut self, ctx: &AlgorithmContext<'_>, slice: &Slice) -> ComponentResult<Vec<Insight>> {
        let due: Vec<Symbol> = self
            .last_emitted
            .iter()
            .filter(|(symbol, last)| slice.contains(symbol) && self.is_due(**last, ctx.time))
            .map(|(symbol, _)| symbol.clone())
            .collect();

        let mut insights = Vec::with_capacity(due.len());
        for symbol in due {
            self.last_emitted.insert(symbol.clone(), Some(ctx.time));
            insights.push(self.build(symbol));
        }
        Ok(insights)
    }

    fn on_securities_changed(&mut self, changes: &SecurityChanges) {
        for symbol in &changes.removed {
            self.last_emitted.remove(symbol);
        }
        for symbol in &changes.added {
            self.last_emitted.entry(symbol.clone()).or_insert(None);
        }
    }
}
