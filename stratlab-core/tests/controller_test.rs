//! Integration tests for the framework controller.
//!
//! Tests:
//! 1. Data-less ticks run the universe refresh and nothing else
//! 2. Stamping fills source model from the alpha name, preserving explicit ones
//! 3. Risk overrides win the merge; originals fill in the rest
//! 4. User-defined universes survive every refresh
//! 5. A no-op alpha disables the framework; ticks and changes become no-ops
//! 6. Manual insight emission outside bridge mode is rejected without side
//!    effects; queued manual insights survive a failed tick
//! 7. Two ticks at the same timestamp refresh at most once
//! 8. Securities changes fan out alpha → portfolio → execution → risk
//! 9. Lifecycle guards, configuration errors, and error propagation
//! 10. Debug mode logs one sorted trace line per stage

mod common;

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use common::*;
use stratlab_core::domain::{
    Insight, InsightDirection, InsightPeriod, Market, PortfolioTarget, SecurityChanges,
    SecurityType, Symbol, Universe,
};
use stratlab_core::error::MISSING_UNIVERSE_SELECTION;
use stratlab_core::framework::{
    AlgorithmKind, ControllerState, FrameworkController, FrameworkMode, InsightsGenerated,
    ModelSet, TickOutcome, TRACE_TARGET,
};
use stratlab_core::services::AccountType;
use stratlab_core::FrameworkError;

// ──────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────

struct Fixture {
    controller: FrameworkController,
    executed: Arc<Mutex<Vec<Vec<PortfolioTarget>>>>,
    seen: Arc<Mutex<Vec<Vec<Insight>>>>,
}

fn spy_up() -> Insight {
    Insight::price(Symbol::equity("SPY"), InsightPeriod::hours(1), InsightDirection::Up)
}

fn selected(name: &str, tickers: &[&str]) -> Universe {
    Universe::new(
        Symbol::universe(name, SecurityType::Equity, Market::usa()),
        tickers.iter().map(|t| Symbol::equity(*t)),
    )
}

fn framework(
    log: &CallLog,
    alpha: RecordingAlpha,
    targets: Vec<PortfolioTarget>,
    overrides: Vec<PortfolioTarget>,
    selection: Option<ScriptedSelection>,
    kind: AlgorithmKind,
) -> Fixture {
    let portfolio = RecordingPortfolio::new(log, targets);
    let execution = RecordingExecution::new(log);
    let seen = Arc::clone(&portfolio.seen);
    let executed = Arc::clone(&execution.executed);

    let mut models = ModelSet::new(kind);
    if let Some(selection) = selection {
        models.set_universe_selection(Box::new(selection));
    }
    models.set_alpha(Box::new(alpha));
    models.set_portfolio_construction(Box::new(portfolio));
    models.set_risk_management(Box::new(RecordingRisk::new(log, overrides)));
    models.set_execution(Box::new(execution));

    Fixture {
        controller: FrameworkController::new(models),
        executed,
        seen,
    }
}

fn standard(log: &CallLog, emit: Vec<Insight>) -> Fixture {
    framework(
        log,
        RecordingAlpha::new(log, emit),
        Vec::new(),
        Vec::new(),
        Some(ScriptedSelection::always_due(Vec::new())),
        AlgorithmKind::Standard,
    )
}

// ──────────────────────────────────────────────
// 1. Data-less ticks
// ──────────────────────────────────────────────

#[test]
fn empty_slice_runs_refresh_only() {
    let log = call_log();
    let selection = ScriptedSelection::always_due(vec![selected("SEL", &["SPY"])]);
    let mut fx = framework(
        &log,
        RecordingAlpha::new(&log, vec![spy_up()]),
        vec![target("SPY", 10.0)],
        Vec::new(),
        Some(selection.clone()),
        AlgorithmKind::Standard,
    );
    let mut host = Host::default();

    fx.controller.post_init(t(10), &host.services()).unwrap();
    assert_eq!(selection.calls(), 1);

    let outcome = fx
        .controller
        .on_data(&empty_slice(t(11)), &mut host.services())
        .unwrap();

    assert!(matches!(outcome, TickOutcome::RefreshOnly(Some(_))));
    assert_eq!(selection.calls(), 2);
    assert!(entries(&log).is_empty(), "no component may run: {:?}", entries(&log));
    assert!(fx.executed.lock().unwrap().is_empty());
    assert!(host.broker.orders.is_empty());
}

#[test]
fn data_tick_runs_stages_in_order() {
    let log = call_log();
    let mut fx = standard(&log, vec![spy_up()]);
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();

    let outcome = fx
        .controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap();

    assert!(matches!(outcome, TickOutcome::Processed(_)));
    assert_eq!(
        entries(&log),
        vec![
            "alpha.update",
            "portfolio.create_targets",
            "risk.manage_risk",
            "execution.execute"
        ]
    );
    assert_eq!(fx.controller.state(), ControllerState::Running);
}

// ──────────────────────────────────────────────
// 2. Stamping through the controller
// ──────────────────────────────────────────────

#[test]
fn stamping_defaults_source_model_to_alpha_name() {
    let log = call_log();
    let explicit = Insight::price(Symbol::equity("QQQ"), InsightPeriod::hours(1), InsightDirection::Down)
        .with_source_model("manual_src");
    let mut fx = standard(&log, vec![spy_up(), explicit]);
    let mut host = Host::default();
    host.values.prices.insert(Symbol::equity("SPY"), 512.5);
    fx.controller.post_init(t(10), &host.services()).unwrap();

    fx.controller
        .on_data(&slice(t(11), &["SPY", "QQQ"]), &mut host.services())
        .unwrap();

    let batch = fx.controller.last_insights().unwrap();
    assert_eq!(batch.time, t(11));
    assert_eq!(batch.insights.len(), 2);
    assert!(batch.insights.iter().all(|i| i.is_stamped()));
    assert_eq!(batch.insights[0].source_model, "recording_alpha");
    assert_eq!(batch.insights[0].reference_value, Some(512.5));
    assert_eq!(batch.insights[0].close_time_utc, Some(t(12)));
    assert_eq!(batch.insights[1].source_model, "manual_src");

    // Portfolio construction sees the stamped insights.
    let seen = fx.seen.lock().unwrap();
    assert!(seen[0].iter().all(|i| i.is_stamped()));
}

#[test]
fn unresolvable_symbol_is_fatal() {
    let log = call_log();
    let mut fx = standard(&log, vec![spy_up()]);
    let mut host = Host::default();
    host.values.unknown.insert(Symbol::equity("SPY"));
    fx.controller.post_init(t(10), &host.services()).unwrap();

    let err = fx
        .controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap_err();

    assert!(matches!(err, FrameworkError::UnresolvedSymbol { ref symbol, .. } if symbol.ticker == "SPY"));
    assert!(!entries(&log).contains(&"portfolio.create_targets".to_string()));
    assert!(fx.controller.last_insights().is_none());
}

// ──────────────────────────────────────────────
// 3. Merge precedence
// ──────────────────────────────────────────────

#[test]
fn risk_overrides_take_precedence_in_merge() {
    let log = call_log();
    let mut fx = framework(
        &log,
        RecordingAlpha::new(&log, Vec::new()),
        vec![target("A", 10.0), target("B", 20.0), target("C", 30.0)],
        vec![target("A", 1.0), target("B", 2.0)],
        Some(ScriptedSelection::always_due(Vec::new())),
        AlgorithmKind::Standard,
    );
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();

    let outcome = fx
        .controller
        .on_data(&slice(t(11), &["A"]), &mut host.services())
        .unwrap();

    let executed = fx.executed.lock().unwrap();
    assert_eq!(
        executed[0],
        vec![target("A", 1.0), target("B", 2.0), target("C", 30.0)]
    );
    let holdings = fx.controller.holdings_targets();
    assert_eq!(holdings.len(), 3);
    assert_eq!(holdings.get(&Symbol::equity("A")).unwrap().quantity, 1.0);
    assert_eq!(holdings.get(&Symbol::equity("C")).unwrap().quantity, 30.0);

    let TickOutcome::Processed(summary) = outcome else {
        panic!("expected a processed tick");
    };
    assert_eq!(summary.targets.targets.len(), 3);
    assert_eq!(summary.targets.overrides.len(), 2);
}

// ──────────────────────────────────────────────
// 4. Universe refresh through the controller
// ──────────────────────────────────────────────

#[test]
fn user_defined_universe_is_never_removed() {
    let log = call_log();
    let selection = ScriptedSelection::always_due(vec![selected("SEL", &["SPY"])]);
    let mut fx = standard(&log, Vec::new());
    fx.controller
        .models_mut()
        .unwrap()
        .set_universe_selection(Box::new(selection.clone()));
    fx.controller.add_security(Symbol::equity("AAPL"));
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();

    selection.set_desired(Vec::new());
    for h in 11..16 {
        fx.controller
            .on_data(&empty_slice(t(h)), &mut host.services())
            .unwrap();
    }

    let user_defined = Symbol::user_defined_universe(SecurityType::Equity, Market::usa());
    let universes = fx.controller.universes();
    assert!(universes.contains(&user_defined));
    assert!(!universes.get(&user_defined).unwrap().dispose_requested());
    assert_eq!(universes.len(), 1, "the selected universe is gone, the user one stays");
    assert!(universes.active_members().contains(&Symbol::equity("AAPL")));
}

#[test]
fn dropped_universe_is_disposed_then_removed() {
    let log = call_log();
    let selection = ScriptedSelection::always_due(vec![selected("SEL", &["SPY"])]);
    let mut fx = standard(&log, Vec::new());
    fx.controller
        .models_mut()
        .unwrap()
        .set_universe_selection(Box::new(selection.clone()));
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();
    let sel = selected("SEL", &[]).symbol;
    assert!(fx.controller.universes().contains(&sel));

    selection.set_desired(Vec::new());
    fx.controller
        .on_data(&empty_slice(t(11)), &mut host.services())
        .unwrap();
    assert!(fx.controller.universes().get(&sel).unwrap().dispose_requested());
    assert!(fx.controller.universes().active_members().is_empty());

    fx.controller
        .on_data(&empty_slice(t(12)), &mut host.services())
        .unwrap();
    assert!(!fx.controller.universes().contains(&sel));
}

// ──────────────────────────────────────────────
// 5. Legacy mode
// ──────────────────────────────────────────────

#[test]
fn no_op_alpha_disables_framework() {
    let log = call_log();
    let mut models = ModelSet::new(AlgorithmKind::Standard);
    models.set_portfolio_construction(Box::new(RecordingPortfolio::new(&log, vec![target("SPY", 1.0)])));
    models.set_risk_management(Box::new(RecordingRisk::new(&log, Vec::new())));
    models.set_execution(Box::new(RecordingExecution::new(&log)));
    let mut controller = FrameworkController::new(models);
    let mut host = Host::default();

    let mode = controller.post_init(t(10), &host.services()).unwrap();
    assert_eq!(mode, FrameworkMode::Legacy);
    assert!(!controller.framework_enabled());

    let outcome = controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap();
    assert_eq!(outcome, TickOutcome::Disabled);

    controller
        .on_securities_changed(&SecurityChanges::new([Symbol::equity("SPY")], []))
        .unwrap();
    assert!(entries(&log).is_empty());
    assert!(host.broker.orders.is_empty());
}

// ──────────────────────────────────────────────
// 6. Manual insight emission
// ──────────────────────────────────────────────

#[test]
fn emit_insights_outside_bridge_is_rejected_without_mutation() {
    let log = call_log();
    let mut fx = standard(&log, vec![spy_up()]);
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();
    fx.controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap();
    let before: InsightsGenerated = fx.controller.last_insights().unwrap().clone();
    let total = fx.controller.total_insights();

    let err = fx
        .controller
        .emit_insights(t(12), vec![spy_up()], &host.services())
        .unwrap_err();

    assert!(matches!(err, FrameworkError::InvalidOperation(_)));
    assert_eq!(fx.controller.last_insights(), Some(&before));
    assert_eq!(fx.controller.total_insights(), total);

    // Nothing was queued for the next tick either.
    fx.controller
        .on_data(&slice(t(13), &["SPY"]), &mut host.services())
        .unwrap();
    assert_eq!(fx.seen.lock().unwrap()[1].len(), 1);
}

#[test]
fn bridge_emits_insights_and_feeds_next_tick() {
    let log = call_log();
    let mut models = ModelSet::new(AlgorithmKind::Bridge);
    let portfolio = RecordingPortfolio::new(&log, Vec::new());
    let seen = Arc::clone(&portfolio.seen);
    models.set_portfolio_construction(Box::new(portfolio));
    let mut controller = FrameworkController::new(models);
    let mut host = Host::default();

    assert_eq!(controller.post_init(t(10), &host.services()).unwrap(), FrameworkMode::Bridge);

    let stamped = controller
        .emit_insights(t(10), vec![spy_up()], &host.services())
        .unwrap();
    assert_eq!(stamped.len(), 1);
    assert!(stamped[0].is_stamped());
    assert_eq!(stamped[0].source_model, "null_alpha");
    assert_eq!(controller.total_insights(), 1);

    controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap();
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].len(), 1);
    assert_eq!(seen[0][0].id, stamped[0].id);
}

#[test]
fn failed_tick_keeps_queued_manual_insights() {
    let log = call_log();
    let mut models = ModelSet::new(AlgorithmKind::Bridge);
    let portfolio = RecordingPortfolio::new(&log, vec![target("SPY", 5.0)]);
    let seen = Arc::clone(&portfolio.seen);
    models.set_portfolio_construction(Box::new(portfolio));
    models.set_risk_management(Box::new(RecordingRisk::failing(&log)));
    let mut controller = FrameworkController::new(models);
    let mut host = Host::default();
    controller.post_init(t(10), &host.services()).unwrap();

    let stamped = controller
        .emit_insights(t(10), vec![spy_up()], &host.services())
        .unwrap();

    for hour in [11, 12] {
        let err = controller
            .on_data(&slice(t(hour), &["SPY"]), &mut host.services())
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Component(_)), "{err:?}");
    }

    // The second tick still hands the queued insight to portfolio construction.
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[1].len(), 1);
    assert_eq!(seen[1][0].id, stamped[0].id);
    assert!(host.broker.orders.is_empty());
}

// ──────────────────────────────────────────────
// 7. Refresh idempotence
// ──────────────────────────────────────────────

#[test]
fn same_timestamp_refreshes_once() {
    let log = call_log();
    let selection = ScriptedSelection::always_due(Vec::new());
    let mut fx = framework(
        &log,
        RecordingAlpha::new(&log, Vec::new()),
        Vec::new(),
        Vec::new(),
        Some(selection.clone()),
        AlgorithmKind::Standard,
    );
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();

    let first = fx
        .controller
        .on_data(&empty_slice(t(11)), &mut host.services())
        .unwrap();
    let second = fx
        .controller
        .on_data(&empty_slice(t(11)), &mut host.services())
        .unwrap();

    assert!(matches!(first, TickOutcome::RefreshOnly(Some(_))));
    assert_eq!(second, TickOutcome::RefreshOnly(None));
    assert_eq!(selection.calls(), 2);
    assert_eq!(fx.controller.scheduler().refresh_count(), 2);
}

#[test]
fn refresh_waits_for_next_refresh_time() {
    let log = call_log();
    let selection = ScriptedSelection::always_due(Vec::new());
    let mut fx = standard(&log, Vec::new());
    fx.controller
        .models_mut()
        .unwrap()
        .set_universe_selection(Box::new(selection.clone()));
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();
    selection.set_next_refresh(t(13));

    for h in 11..13 {
        fx.controller
            .on_data(&empty_slice(t(h)), &mut host.services())
            .unwrap();
    }
    assert_eq!(selection.calls(), 1);

    fx.controller
        .on_data(&empty_slice(t(13)), &mut host.services())
        .unwrap();
    assert_eq!(selection.calls(), 2);
}

// ──────────────────────────────────────────────
// 8. Fan-out order
// ──────────────────────────────────────────────

#[test]
fn securities_changes_fan_out_in_fixed_order() {
    let log = call_log();
    let mut fx = standard(&log, Vec::new());
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();

    fx.controller
        .on_securities_changed(&SecurityChanges::new([Symbol::equity("SPY")], []))
        .unwrap();

    assert_eq!(
        entries(&log),
        vec![
            "alpha.changed",
            "portfolio.changed",
            "execution.changed",
            "risk.changed"
        ]
    );
}

// ──────────────────────────────────────────────
// 9. Lifecycle and errors
// ──────────────────────────────────────────────

#[test]
fn framework_mode_without_selection_fails_post_init() {
    let log = call_log();
    let mut fx = framework(
        &log,
        RecordingAlpha::new(&log, Vec::new()),
        Vec::new(),
        Vec::new(),
        None,
        AlgorithmKind::Standard,
    );
    let host_err = {
        let mut host = Host::default();
        fx.controller.post_init(t(10), &host.services()).unwrap_err()
    };
    match host_err {
        FrameworkError::Configuration(message) => assert_eq!(message, MISSING_UNIVERSE_SELECTION),
        other => panic!("expected configuration error, got {other:?}"),
    }
    assert_eq!(fx.controller.state(), ControllerState::Unvalidated);
}

#[test]
fn calls_before_post_init_are_rejected() {
    let log = call_log();
    let mut fx = standard(&log, vec![spy_up()]);
    let mut host = Host::default();

    let err = fx
        .controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap_err();
    assert!(matches!(err, FrameworkError::InvalidOperation(_)));
    assert!(fx
        .controller
        .on_securities_changed(&SecurityChanges::none())
        .is_err());
    assert!(entries(&log).is_empty());
}

#[test]
fn post_init_runs_once_and_locks_the_model_set() {
    let log = call_log();
    let mut fx = standard(&log, Vec::new());
    let mut host = Host::default();

    assert_eq!(fx.controller.state(), ControllerState::Unvalidated);
    assert_eq!(
        fx.controller.post_init(t(10), &host.services()).unwrap(),
        FrameworkMode::Framework
    );
    assert_eq!(fx.controller.state(), ControllerState::Validated);

    assert!(matches!(
        fx.controller.post_init(t(10), &host.services()),
        Err(FrameworkError::InvalidOperation(_))
    ));
    assert!(fx.controller.models_mut().is_err());
}

#[test]
fn cash_account_is_a_warning_not_an_error() {
    let log = call_log();
    let mut fx = standard(&log, Vec::new());
    let mut host = Host::default();
    host.broker.account_type = AccountType::Cash;
    assert!(fx.controller.post_init(t(10), &host.services()).is_ok());
}

#[test]
fn component_failure_propagates_unchanged() {
    let log = call_log();
    let mut alpha = RecordingAlpha::new(&log, vec![spy_up()]);
    alpha.fail = true;
    let mut fx = framework(
        &log,
        alpha,
        Vec::new(),
        Vec::new(),
        Some(ScriptedSelection::always_due(Vec::new())),
        AlgorithmKind::Standard,
    );
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();

    let err = fx
        .controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap_err();
    match err {
        FrameworkError::Component(e) => assert_eq!(e.component, "recording_alpha"),
        other => panic!("expected component error, got {other:?}"),
    }
    assert_eq!(entries(&log), vec!["alpha.update"]);
}

#[test]
fn observers_see_each_batch_in_registration_order() {
    let log = call_log();
    let mut fx = standard(&log, vec![spy_up()]);
    let order = Arc::new(Mutex::new(Vec::new()));
    for name in ["analytics", "logger"] {
        let order = Arc::clone(&order);
        fx.controller
            .on_insights_generated(Box::new(move |event: &InsightsGenerated| {
                order.lock().unwrap().push((name, event.insights.len()));
            }));
    }
    let mut host = Host::default();
    fx.controller.post_init(t(10), &host.services()).unwrap();
    fx.controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap();

    assert_eq!(*order.lock().unwrap(), vec![("analytics", 1), ("logger", 1)]);
}

#[test]
fn debug_trace_does_not_change_results() {
    let log = call_log();
    let fx = framework(
        &log,
        RecordingAlpha::new(&log, vec![spy_up()]),
        vec![target("SPY", 5.0)],
        Vec::new(),
        Some(ScriptedSelection::always_due(Vec::new())),
        AlgorithmKind::Standard,
    );
    let mut controller = fx.controller.with_debug(true);
    let mut host = Host::default();
    controller.post_init(t(10), &host.services()).unwrap();
    controller
        .on_data(&slice(t(11), &["SPY"]), &mut host.services())
        .unwrap();
    assert_eq!(fx.executed.lock().unwrap()[0], vec![target("SPY", 5.0)]);
}

// ──────────────────────────────────────────────
// 10. Debug trace lines
// ──────────────────────────────────────────────

/// Collects the messages of events logged to the trace target.
#[derive(Clone, Default)]
struct TraceCapture(Arc<Mutex<Vec<String>>>);

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for TraceCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != TRACE_TARGET {
            return;
        }
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0.lock().unwrap().push(visitor.0);
    }
}

fn traced_tick(debug: bool) -> Vec<String> {
    let log = call_log();
    let qqq_down = Insight::price(Symbol::equity("QQQ"), InsightPeriod::hours(1), InsightDirection::Down);
    let fx = framework(
        &log,
        RecordingAlpha::new(&log, vec![spy_up(), qqq_down]),
        vec![target("SPY", 5.0), target("AAPL", 3.0)],
        vec![target("SPY", 1.0)],
        Some(ScriptedSelection::always_due(Vec::new())),
        AlgorithmKind::Standard,
    );
    let mut controller = fx.controller.with_debug(debug);
    let capture = TraceCapture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());

    tracing::subscriber::with_default(subscriber, || {
        let mut host = Host::default();
        controller.post_init(t(10), &host.services()).unwrap();
        controller
            .on_data(&slice(t(11), &["SPY", "QQQ", "AAPL"]), &mut host.services())
            .unwrap();
    });

    let lines = capture.0.lock().unwrap().clone();
    lines
}

#[test]
fn debug_tick_traces_every_stage_sorted() {
    let lines = traced_tick(true);
    assert_eq!(lines.len(), 4, "{lines:#?}");

    let alpha = lines[0]
        .strip_prefix("2024-03-04 11:00:00: ALPHA: ")
        .unwrap_or_else(|| panic!("unexpected alpha line {}", lines[0]));
    let items: Vec<&str> = alpha.split(" | ").collect();
    assert_eq!(items.len(), 2);
    assert!(items[0].starts_with("QQQ") && items[1].starts_with("SPY"), "{alpha}");

    assert_eq!(lines[1], "2024-03-04 11:00:00: PORTFOLIO: AAPL: 3 | SPY: 5");
    assert_eq!(lines[2], "2024-03-04 11:00:00: RISK: SPY: 1");
    assert_eq!(lines[3], "2024-03-04 11:00:00: EXECUTION: AAPL: 3 | SPY: 1");
}

#[test]
fn trace_is_silent_without_debug() {
    assert!(traced_tick(false).is_empty());
}
