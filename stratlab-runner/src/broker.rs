//! Paper brokerage: immediate fills at the last marked price.
//!
//! - Margin accounts may go short and borrow against holdings.
//! - Cash accounts reject buys beyond available cash and sells beyond the
//!   position held; rejections are recorded and logged, not raised.
//! - Orders on a symbol that was never marked fail: there is no price to
//!   fill at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use stratlab_core::domain::{OrderId, Slice, Symbol, QUANTITY_EPSILON};
use stratlab_core::services::{AccountType, Brokerage, OrderRequest};
use stratlab_core::{ComponentError, ComponentResult};

const BROKER_NAME: &str = "paper_broker";

/// A filled order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub order_id: u64,
    pub time: DateTime<Utc>,
    pub symbol: Symbol,
    /// Signed: positive buys, negative sells.
    pub quantity: f64,
    pub price: f64,
    pub tag: Option<String>,
}

impl Fill {
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}

/// An order the account could not carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub order_id: u64,
    pub time: DateTime<Utc>,
    pub symbol: Symbol,
    pub quantity: f64,
    pub reason: String,
}

/// Current position in one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: Symbol,
    pub quantity: f64,
    pub mark: f64,
}

impl Position {
    pub fn market_value(&self) -> f64 {
        self.quantity * self.mark
    }
}

#[derive(Debug, Clone)]
pub struct PaperBroker {
    account_type: AccountType,
    cash: f64,
    holdings: BTreeMap<Symbol, f64>,
    marks: BTreeMap<Symbol, f64>,
    fills: Vec<Fill>,
    rejections: Vec<Rejection>,
    next_order_id: u64,
}

impl PaperBroker {
    pub fn new(initial_cash: f64, account_type: AccountType) -> Self {
        Self {
            account_type,
            cash: initial_cash,
            holdings: BTreeMap::new(),
            marks: BTreeMap::new(),
            fills: Vec::new(),
            rejections: Vec::new(),
            next_order_id: 0,
        }
    }

    /// Mark every symbol in the slice at its close. Void bars are ignored.
    pub fn mark(&mut self, slice: &Slice) {
        for (symbol, bar) in &slice.bars {
            if bar.is_sane() {
                self.marks.insert(symbol.clone(), bar.close);
            }
        }
    }

    pub fn mark_price(&self, symbol: &Symbol) -> Option<f64> {
        self.marks.get(symbol).copied()
    }

    pub fn holdings_value(&self) -> f64 {
        self.holdings
            .iter()
            .map(|(symbol, qty)| qty * self.marks.get(symbol).copied().unwrap_or(0.0))
            .sum()
    }

    /// Non-flat positions in symbol order.
    pub fn positions(&self) -> Vec<Position> {
        self.holdings
            .iter()
            .filter(|(_, qty)| qty.abs() > QUANTITY_EPSILON)
            .map(|(symbol, qty)| Position {
                symbol: symbol.clone(),
                quantity: *qty,
                mark: self.marks.get(symbol).copied().unwrap_or(0.0),
            })
            .collect()
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    pub fn orders_submitted(&self) -> u64 {
        self.next_order_id
    }

    fn cash_account_violation(&self, symbol: &Symbol, quantity: f64, price: f64) -> Option<String> {
        if self.account_type != AccountType::Cash {
            return None;
        }
        let cost = quantity * price;
        if quantity > 0.0 && cost > self.cash + QUANTITY_EPSILON {
            return Some(format!(
                "insufficient cash: order costs {cost:.2}, available {:.2}",
                self.cash
            ));
        }
        let held = self.holdings(symbol);
        if quantity < 0.0 && held + quantity < -QUANTITY_EPSILON {
            return Some(format!(
                "cash accounts cannot sell short: holding {held}, selling {}",
                -quantity
            ));
        }
        None
    }
}

impl Brokerage for PaperBroker {
    fn account_type(&self) -> AccountType {
        self.account_type
    }

    fn holdings(&self, symbol: &Symbol) -> f64 {
        self.holdings.get(symbol).copied().unwrap_or(0.0)
    }

    fn cash(&self) -> f64 {
        self.cash
    }

    fn total_portfolio_value(&self) -> f64 {
        self.cash + self.holdings_value()
    }

    fn submit_order(&mut self, order: OrderRequest) -> ComponentResult<OrderId> {
        let Some(price) = self.mark_price(&order.symbol) else {
            return Err(ComponentError::new(
                BROKER_NAME,
                format!("no price for {}, cannot fill", order.symbol),
            ));
        };
        self.next_order_id += 1;
        let order_id = self.next_order_id;

        if let Some(reason) = self.cash_account_violation(&order.symbol, order.quantity, price) {
            warn!(symbol = %order.symbol, quantity = order.quantity, %reason, "order rejected");
            self.rejections.push(Rejection {
                order_id,
                time: order.time,
                symbol: order.symbol,
                quantity: order.quantity,
                reason,
            });
            return Ok(OrderId(order_id));
        }

        self.cash -= order.quantity * price;
        *self.holdings.entry(order.symbol.clone()).or_insert(0.0) += order.quantity;
        debug!(order_id, symbol = %order.symbol, quantity = order.quantity, price, "filled");
        self.fills.push(Fill {
            order_id,
            time: order.time,
            symbol: order.symbol,
            quantity: order.quantity,
            price,
            tag: order.tag,
        });
        Ok(OrderId(order_id))
    }
}
