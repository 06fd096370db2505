//! Collaborator interfaces the framework consumes but does not implement:
//! the security value provider and the brokerage.
//!
//! The host owns the concrete implementations and lends them to the
//! controller for the duration of each call through [`HostServices`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::ExchangeCalendar;
use crate::domain::{InsightType, OrderId, Symbol};
use crate::error::ComponentResult;

/// Current values of a security, one per insight type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SecurityValues {
    pub price: f64,
    pub volatility: f64,
}

impl SecurityValues {
    pub fn get(&self, insight_type: InsightType) -> f64 {
        match insight_type {
            InsightType::Price => self.price,
            InsightType::Volatility => self.volatility,
        }
    }
}

/// Resolves a symbol's current values. `None` means the symbol is unknown.
pub trait ValueProvider: Send + Sync {
    fn values(&self, symbol: &Symbol) -> Option<SecurityValues>;
}

/// Account model of the brokerage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    #[default]
    Margin,
    Cash,
}

/// A market order request produced by an execution model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: Symbol,
    /// Signed quantity: positive buys, negative sells.
    pub quantity: f64,
    pub time: DateTime<Utc>,
    pub tag: Option<String>,
}

impl OrderRequest {
    pub fn market(symbol: Symbol, quantity: f64, time: DateTime<Utc>) -> Self {
        Self {
            symbol,
            quantity,
            time,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// Portfolio state and order entry.
pub trait Brokerage: Send {
    fn account_type(&self) -> AccountType;

    /// Signed quantity currently held.
    fn holdings(&self, symbol: &Symbol) -> f64;

    /// Signed quantity of submitted but unfilled orders.
    fn open_order_quantity(&self, _symbol: &Symbol) -> f64 {
        0.0
    }

    fn cash(&self) -> f64;

    /// Cash plus marked value of all holdings.
    fn total_portfolio_value(&self) -> f64;

    fn submit_order(&mut self, order: OrderRequest) -> ComponentResult<OrderId>;
}

/// Collaborators lent to the controller for one call.
pub struct HostServices<'a> {
    pub values: &'a dyn ValueProvider,
    pub calendar: &'a dyn ExchangeCalendar,
    pub brokerage: &'a mut dyn Brokerage,
}

/// Read-only view handed to alpha, portfolio construction and risk models.
#[derive(Clone, Copy)]
pub struct AlgorithmContext<'a> {
    pub time: DateTime<Utc>,
    pub values: &'a dyn ValueProvider,
    pub calendar: &'a dyn ExchangeCalendar,
    pub portfolio: &'a dyn Brokerage,
}

impl<'a> AlgorithmContext<'a> {
    pub fn price(&self, symbol: &Symbol) -> Option<f64> {
        self.values.values(symbol).map(|v| v.price)
    }
}
