//! The framework controller: drives the model set through each tick.
//!
//! Lifecycle: `Unvalidated → Validated → Running`.
//! - `post_init` validates the model set, creates the initial universes and
//!   enters `Validated`. It can only run once.
//! - `on_data` enters `Running` and, per tick, refreshes universes then runs
//!   alpha → stamping → portfolio construction → risk → execution.
//! - `on_securities_changed` fans changes out to alpha, portfolio
//!   construction, execution and risk management, in that order.
//!
//! Component failures propagate unchanged; the controller never retries.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::domain::{
    Insight, PortfolioTargetCollection, SecurityChanges, Slice, Symbol, UniverseRegistry,
};
use crate::error::FrameworkError;
use crate::services::{AccountType, AlgorithmContext, HostServices};

use super::insights::InsightPipeline;
use super::model_set::{FrameworkMode, ModelSet};
use super::notify::{InsightNotifier, InsightObserver, InsightsGenerated};
use super::targets::{run_targets, TargetRun};
use super::trace::{DebugTrace, Stage};
use super::universe_refresh::{RefreshOutcome, UniverseRefreshScheduler};

/// Logged at startup when the brokerage models a cash account.
pub const CASH_ACCOUNT_WARNING: &str = "framework portfolio construction and execution models assume margin accounting \
     and may be unsuitable for Cash Modeled brokerages";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Unvalidated,
    Validated,
    Running,
}

/// Everything a processed tick produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickSummary {
    pub refresh: Option<RefreshOutcome>,
    /// Stamped insights from the alpha model and from manual emission.
    pub insights: Vec<Insight>,
    pub targets: TargetRun,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Framework disabled: nothing ran.
    Disabled,
    /// The slice carried no data; only the universe refresh ran.
    RefreshOnly(Option<RefreshOutcome>),
    Processed(TickSummary),
}

pub struct FrameworkController {
    models: ModelSet,
    state: ControllerState,
    universes: UniverseRegistry,
    scheduler: UniverseRefreshScheduler,
    stamper: InsightPipeline,
    /// Desired holding per symbol. Only the controller writes it, during a tick.
    holdings_targets: PortfolioTargetCollection,
    /// Manually emitted insights awaiting the next data tick.
    manual_insights: Vec<Insight>,
    notifier: InsightNotifier,
    trace: DebugTrace,
}

impl FrameworkController {
    pub fn new(models: ModelSet) -> Self {
        Self {
            models,
            state: ControllerState::Unvalidated,
            universes: UniverseRegistry::new(),
            scheduler: UniverseRefreshScheduler::new(),
            stamper: InsightPipeline::new(),
            holdings_targets: PortfolioTargetCollection::new(),
            manual_insights: Vec::new(),
            notifier: InsightNotifier::new(),
            trace: DebugTrace::default(),
        }
    }

    /// Enable `<timestamp>: <STAGE>: ...` trace lines.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.trace = DebugTrace::new(enabled);
        self
    }

    // ─── Accessors ───────────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// `None` before `post_init`.
    pub fn mode(&self) -> Option<FrameworkMode> {
        self.models.mode()
    }

    pub fn framework_enabled(&self) -> bool {
        self.models.framework_enabled()
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// Mutable access to the model set, only during setup.
    pub fn models_mut(&mut self) -> Result<&mut ModelSet, FrameworkError> {
        if self.state != ControllerState::Unvalidated {
            return Err(FrameworkError::InvalidOperation(
                "the model set cannot be changed after post_init".into(),
            ));
        }
        Ok(&mut self.models)
    }

    pub fn universes(&self) -> &UniverseRegistry {
        &self.universes
    }

    pub fn scheduler(&self) -> &UniverseRefreshScheduler {
        &self.scheduler
    }

    pub fn holdings_targets(&self) -> &PortfolioTargetCollection {
        &self.holdings_targets
    }

    pub fn last_insights(&self) -> Option<&InsightsGenerated> {
        self.notifier.last()
    }

    pub fn total_insights(&self) -> u64 {
        self.notifier.total()
    }

    // ─── Setup ───────────────────────────────────────────────────────

    /// Register an insights-generated observer.
    pub fn on_insights_generated(&mut self, observer: InsightObserver) {
        self.notifier.subscribe(observer);
    }

    /// Add an instrument to the user-defined universe of its type/market.
    pub fn add_security(&mut self, symbol: Symbol) {
        self.universes.add_security(symbol);
    }

    pub fn remove_security(&mut self, symbol: &Symbol) -> bool {
        self.universes.remove_security(symbol)
    }

    // ─── Lifecycle ───────────────────────────────────────────────────

    /// Validate the model set and create the initial universes.
    pub fn post_init(
        &mut self,
        now: DateTime<Utc>,
        services: &HostServices<'_>,
    ) -> Result<FrameworkMode, FrameworkError> {
        if self.state != ControllerState::Unvalidated {
            return Err(FrameworkError::InvalidOperation("post_init already ran".into()));
        }

        let mode = self.models.validate()?;

        if let Some(selection) = self.models.universe_selection.as_mut() {
            self.scheduler
                .refresh(now, selection.as_mut(), &mut self.universes)?;
        }

        if self.trace.enabled() {
            let trace = self.trace;
            self.notifier.subscribe(Box::new(move |event: &InsightsGenerated| {
                trace.emit(event.time, Stage::Alpha, &event.insights);
            }));
        }

        if services.brokerage.account_type() == AccountType::Cash {
            warn!("{CASH_ACCOUNT_WARNING}");
        }

        debug!(%mode, models = ?self.models, "framework initialized");
        self.state = ControllerState::Validated;
        Ok(mode)
    }

    /// Run one tick at `slice.time`.
    pub fn on_data(
        &mut self,
        slice: &Slice,
        services: &mut HostServices<'_>,
    ) -> Result<TickOutcome, FrameworkError> {
        self.require_started("on_data")?;
        if !self.framework_enabled() {
            return Ok(TickOutcome::Disabled);
        }
        self.state = ControllerState::Running;
        let now = slice.time;

        let refresh = match self.models.universe_selection.as_mut() {
            Some(selection) => {
                self.scheduler
                    .maybe_refresh(now, selection.as_mut(), &mut self.universes)?
            }
            None => None,
        };

        if !slice.has_data() {
            return Ok(TickOutcome::RefreshOnly(refresh));
        }

        let (insights, targets) = {
            let ctx = AlgorithmContext {
                time: now,
                values: services.values,
                calendar: services.calendar,
                portfolio: &*services.brokerage,
            };

            let raw = self.models.alpha.update(&ctx, slice)?;
            let generated = self.stamper.stamp_all(
                raw,
                now,
                services.values,
                self.models.alpha.name(),
                services.calendar,
            )?;
            if !generated.is_empty() {
                self.notifier.raise(InsightsGenerated {
                    time: now,
                    insights: generated.clone(),
                });
            }

            let mut insights = self.manual_insights.clone();
            insights.extend(generated);

            // Queued manual insights stay queued until targets are built.
            let targets = run_targets(
                &ctx,
                &insights,
                self.models.portfolio_construction.as_mut(),
                self.models.risk_management.as_mut(),
                &mut self.holdings_targets,
            )?;
            self.manual_insights.clear();
            (insights, targets)
        };

        self.trace.emit(now, Stage::Portfolio, &targets.targets);
        self.trace.emit(now, Stage::Risk, &targets.overrides);
        self.trace.emit(now, Stage::Execution, &targets.merged);

        self.models
            .execution
            .execute(now, &targets.merged, &mut *services.brokerage)?;

        Ok(TickOutcome::Processed(TickSummary {
            refresh,
            insights,
            targets,
        }))
    }

    /// Forward instrument-set changes to every non-selection component.
    pub fn on_securities_changed(&mut self, changes: &SecurityChanges) -> Result<(), FrameworkError> {
        self.require_started("on_securities_changed")?;
        if !self.framework_enabled() {
            return Ok(());
        }
        debug!(%changes, "securities changed");
        self.models.alpha.on_securities_changed(changes);
        self.models.portfolio_construction.on_securities_changed(changes);
        self.models.execution.on_securities_changed(changes);
        self.models.risk_management.on_securities_changed(changes);
        Ok(())
    }

    /// Emit insights by hand. Only bridge algorithms may do this.
    ///
    /// The insights are stamped and announced immediately and reach portfolio
    /// construction on the next data tick.
    pub fn emit_insights(
        &mut self,
        now: DateTime<Utc>,
        insights: Vec<Insight>,
        services: &HostServices<'_>,
    ) -> Result<Vec<Insight>, FrameworkError> {
        self.require_started("emit_insights")?;
        if self.mode() != Some(FrameworkMode::Bridge) {
            return Err(FrameworkError::InvalidOperation(
                "insights can only be emitted manually by bridge algorithms; \
                 return them from the alpha model instead"
                    .into(),
            ));
        }

        let stamped = self.stamper.stamp_all(
            insights,
            now,
            services.values,
            self.models.alpha.name(),
            services.calendar,
        )?;
        if !stamped.is_empty() {
            self.notifier.raise(InsightsGenerated {
                time: now,
                insights: stamped.clone(),
            });
            self.manual_insights.extend(stamped.iter().cloned());
        }
        Ok(stamped)
    }

    fn require_started(&self, operation: &str) -> Result<(), FrameworkError> {
        if self.state == ControllerState::Unvalidated {
            return Err(FrameworkError::InvalidOperation(format!(
                "{operation} called before post_init"
            )));
        }
        Ok(())
    }
}
