//! Shared test collaborators: stub value provider, calendar and brokerage,
//! plus recording components that write every call into a shared log.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use stratlab_core::calendar::{ExchangeCalendar, ExchangeHours};
use stratlab_core::components::{
    AlphaModel, ExecutionModel, PortfolioConstructionModel, RiskManagementModel,
    UniverseSelectionModel,
};
use stratlab_core::domain::{
    Bar, Insight, OrderId, PortfolioTarget, SecurityChanges, Slice, Symbol, Universe,
};
use stratlab_core::services::{
    AccountType, AlgorithmContext, Brokerage, HostServices, OrderRequest, SecurityValues,
    ValueProvider,
};
use stratlab_core::{ComponentError, ComponentResult};

// ──────────────────────────────────────────────
// Time and data helpers
// ──────────────────────────────────────────────

/// 2024-03-04 (a Monday) at `h`:00 UTC.
pub fn t(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, h, 0, 0).unwrap()
}

pub fn bar(ticker: &str, time: DateTime<Utc>, close: f64) -> Bar {
    Bar {
        symbol: Symbol::equity(ticker),
        time,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 10_000,
    }
}

pub fn slice(time: DateTime<Utc>, tickers: &[&str]) -> Slice {
    Slice::with_bars(time, tickers.iter().map(|ticker| bar(ticker, time, 100.0)))
}

pub fn empty_slice(time: DateTime<Utc>) -> Slice {
    Slice::new(time)
}

pub fn target(ticker: &str, quantity: f64) -> PortfolioTarget {
    PortfolioTarget::new(Symbol::equity(ticker), quantity)
}

// ──────────────────────────────────────────────
// Collaborators
// ──────────────────────────────────────────────

/// Every equity is priced at 100 unless overridden; symbols in `unknown`
/// resolve to nothing.
#[derive(Default)]
pub struct StubValues {
    pub prices: BTreeMap<Symbol, f64>,
    pub unknown: BTreeSet<Symbol>,
}

impl ValueProvider for StubValues {
    fn values(&self, symbol: &Symbol) -> Option<SecurityValues> {
        if self.unknown.contains(symbol) {
            return None;
        }
        Some(SecurityValues {
            price: self.prices.get(symbol).copied().unwrap_or(100.0),
            volatility: 0.01,
        })
    }
}

pub struct StubCalendar {
    pub hours: ExchangeHours,
}

impl Default for StubCalendar {
    fn default() -> Self {
        Self {
            hours: ExchangeHours::always_open(),
        }
    }
}

impl ExchangeCalendar for StubCalendar {
    fn exchange_hours(&self, _symbol: &Symbol) -> Option<&ExchangeHours> {
        Some(&self.hours)
    }
}

/// Fills every order immediately.
pub struct StubBroker {
    pub account_type: AccountType,
    pub holdings: BTreeMap<Symbol, f64>,
    pub orders: Vec<OrderRequest>,
}

impl Default for StubBroker {
    fn default() -> Self {
        Self {
            account_type: AccountType::Margin,
            holdings: BTreeMap::new(),
            orders: Vec::new(),
        }
    }
}

impl Brokerage for StubBroker {
    fn account_type(&self) -> AccountType {
        self.account_type
    }

    fn holdings(&self, symbol: &Symbol) -> f64 {
        self.holdings.get(symbol).copied().unwrap_or(0.0)
    }

    fn cash(&self) -> f64 {
        100_000.0
    }

    fn total_portfolio_value(&self) -> f64 {
        100_000.0
    }

    fn submit_order(&mut self, order: OrderRequest) -> ComponentResult<OrderId> {
        *self.holdings.entry(order.symbol.clone()).or_insert(0.0) += order.quantity;
        self.orders.push(order);
        Ok(OrderId(self.orders.len() as u64))
    }
}

#[derive(Default)]
pub struct Host {
    pub values: StubValues,
    pub calendar: StubCalendar,
    pub broker: StubBroker,
}

impl Host {
    pub fn services(&mut self) -> HostServices<'_> {
        HostServices {
            values: &self.values,
            calendar: &self.calendar,
            brokerage: &mut self.broker,
        }
    }
}

// ──────────────────────────────────────────────
// Recording components
// ──────────────────────────────────────────────

pub type CallLog = Arc<Mutex<Vec<String>>>;

pub fn call_log() -> CallLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn entries(log: &CallLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Emits the scripted insights on every update.
pub struct RecordingAlpha {
    pub log: CallLog,
    pub emit: Vec<Insight>,
    pub fail: bool,
}

impl RecordingAlpha {
    pub fn new(log: &CallLog, emit: Vec<Insight>) -> Self {
        Self {
            log: Arc::clone(log),
            emit,
            fail: false,
        }
    }
}

impl AlphaModel for RecordingAlpha {
    fn name(&self) -> &str {
        "recording_alpha"
    }

    fn update(&mut self, _ctx: &AlgorithmContext<'_>, _slice: &Slice) -> ComponentResult<Vec<Insight>> {
        self.log.lock().unwrap().push("alpha.update".into());
        if self.fail {
            return Err(ComponentError::new(self.name(), "scripted failure"));
        }
        Ok(self.emit.clone())
    }

    fn on_securities_changed(&mut self, _changes: &SecurityChanges) {
        self.log.lock().unwrap().push("alpha.changed".into());
    }
}

/// Returns fixed targets and records the insights it was given.
pub struct RecordingPortfolio {
    pub log: CallLog,
    pub targets: Vec<PortfolioTarget>,
    pub seen: Arc<Mutex<Vec<Vec<Insight>>>>,
}

impl RecordingPortfolio {
    pub fn new(log: &CallLog, targets: Vec<PortfolioTarget>) -> Self {
        Self {
            log: Arc::clone(log),
            targets,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl PortfolioConstructionModel for RecordingPortfolio {
    fn name(&self) -> &str {
        "recording_portfolio"
    }

    fn create_targets(
        &mut self,
        _ctx: &AlgorithmContext<'_>,
        insights: &[Insight],
    ) -> ComponentResult<Vec<PortfolioTarget>> {
        self.log.lock().unwrap().push("portfolio.create_targets".into());
        self.seen.lock().unwrap().push(insights.to_vec());
        Ok(self.targets.clone())
    }

    fn on_securities_changed(&mut self, _changes: &SecurityChanges) {
        self.log.lock().unwrap().push("portfolio.changed".into());
    }
}

pub struct RecordingRisk {
    pub log: CallLog,
    pub overrides: Vec<PortfolioTarget>,
    pub fail: bool,
}

impl RecordingRisk {
    pub fn new(log: &CallLog, overrides: Vec<PortfolioTarget>) -> Self {
        Self {
            log: Arc::clone(log),
            overrides,
            fail: false,
        }
    }

    pub fn failing(log: &CallLog) -> Self {
        Self {
            fail: true,
            ..Self::new(log, Vec::new())
        }
    }
}

impl RiskManagementModel for RecordingRisk {
    fn name(&self) -> &str {
        "recording_risk"
    }

    fn manage_risk(
        &mut self,
        _ctx: &AlgorithmContext<'_>,
        _targets: &[PortfolioTarget],
    ) -> ComponentResult<Vec<PortfolioTarget>> {
        self.log.lock().unwrap().push("risk.manage_risk".into());
        if self.fail {
            return Err(ComponentError::new(self.name(), "scripted failure"));
        }
        Ok(self.overrides.clone())
    }

    fn on_securities_changed(&mut self, _changes: &SecurityChanges) {
        self.log.lock().unwrap().push("risk.changed".into());
    }
}

/// Records the merged targets of every execute call.
pub struct RecordingExecution {
    pub log: CallLog,
    pub executed: Arc<Mutex<Vec<Vec<PortfolioTarget>>>>,
}

impl RecordingExecution {
    pub fn new(log: &CallLog) -> Self {
        Self {
            log: Arc::clone(log),
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl ExecutionModel for RecordingExecution {
    fn name(&self) -> &str {
        "recording_execution"
    }

    fn execute(
        &mut self,
        _time: DateTime<Utc>,
        targets: &[PortfolioTarget],
        _brokerage: &mut dyn Brokerage,
    ) -> ComponentResult<()> {
        self.log.lock().unwrap().push("execution.execute".into());
        self.executed.lock().unwrap().push(targets.to_vec());
        Ok(())
    }

    fn on_securities_changed(&mut self, _changes: &SecurityChanges) {
        self.log.lock().unwrap().push("execution.changed".into());
    }
}

/// Universe selection whose desired set and schedule the test controls
/// after handing the model to the controller.
#[derive(Clone)]
pub struct ScriptedSelection {
    pub desired: Arc<Mutex<Vec<Universe>>>,
    pub next_refresh: Arc<Mutex<DateTime<Utc>>>,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedSelection {
    /// Due on every tick until told otherwise.
    pub fn always_due(desired: Vec<Universe>) -> Self {
        Self {
            desired: Arc::new(Mutex::new(desired)),
            next_refresh: Arc::new(Mutex::new(DateTime::<Utc>::MIN_UTC)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_desired(&self, desired: Vec<Universe>) {
        *self.desired.lock().unwrap() = desired;
    }

    pub fn set_next_refresh(&self, next: DateTime<Utc>) {
        *self.next_refresh.lock().unwrap() = next;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl UniverseSelectionModel for ScriptedSelection {
    fn name(&self) -> &str {
        "scripted_selection"
    }

    fn next_refresh_time_utc(&self) -> DateTime<Utc> {
        *self.next_refresh.lock().unwrap()
    }

    fn create_universes(&mut self, _now: DateTime<Utc>) -> ComponentResult<Vec<Universe>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.desired.lock().unwrap().clone())
    }
}
