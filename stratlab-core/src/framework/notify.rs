//! Insights-generated notification.
//!
//! Observers are plain callbacks invoked synchronously in registration order.

use chrono::{DateTime, Utc};

use crate::domain::Insight;

/// One batch of freshly stamped insights.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightsGenerated {
    pub time: DateTime<Utc>,
    pub insights: Vec<Insight>,
}

pub type InsightObserver = Box<dyn FnMut(&InsightsGenerated) + Send>;

#[derive(Default)]
pub struct InsightNotifier {
    observers: Vec<InsightObserver>,
    last: Option<InsightsGenerated>,
    total: u64,
}

impl InsightNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: InsightObserver) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Most recent batch raised.
    pub fn last(&self) -> Option<&InsightsGenerated> {
        self.last.as_ref()
    }

    /// Insights raised over the lifetime of the notifier.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn raise(&mut self, event: InsightsGenerated) {
        for observer in &mut self.observers {
            observer(&event);
        }
        self.total += event.insights.len() as u64;
        self.last = Some(event);
    }
}
