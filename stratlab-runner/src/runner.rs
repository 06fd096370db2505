//! Simulation runner: the host loop around a framework controller.
//!
//! Per tick:
//! 1. Update the value cache and the broker's marks from the full slice
//! 2. Restrict the slice to the securities the universes currently hold
//! 3. `on_data`
//! 4. Diff active universe members and deliver `on_securities_changed`
//! 5. Record the portfolio value
//!
//! When no universe selection is configured, the run's symbols are added to
//! the user-defined universes before `post_init`, the way a hand-trading
//! algorithm subscribes to data.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, info};

use stratlab_core::components::factory::{build_model_set, FactoryError};
use stratlab_core::domain::{SecurityChanges, Symbol};
use stratlab_core::framework::{FrameworkController, TickOutcome};
use stratlab_core::services::{Brokerage, HostServices};
use stratlab_core::FrameworkError;

use crate::broker::PaperBroker;
use crate::cache::SecurityCache;
use crate::calendar::CalendarRegistry;
use crate::config::{ConfigError, RunConfig};
use crate::feed::SyntheticFeed;
use crate::result::{ChangeRecord, EquityPoint, RunResult, TickCounts, SCHEMA_VERSION};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("component construction error: {0}")]
    Factory(#[from] FactoryError),
    #[error("framework error: {0}")]
    Framework(#[from] FrameworkError),
}

/// Host-side state for one run.
struct Host {
    cache: SecurityCache,
    calendar: CalendarRegistry,
    broker: PaperBroker,
}

impl Host {
    fn services(&mut self) -> HostServices<'_> {
        HostServices {
            values: &self.cache,
            calendar: &self.calendar,
            brokerage: &mut self.broker,
        }
    }
}

/// Deliver the delta between `previous` and the controller's current members.
fn sync_securities(
    controller: &mut FrameworkController,
    previous: &mut BTreeSet<Symbol>,
    time: DateTime<Utc>,
    log: &mut Vec<ChangeRecord>,
) -> Result<(), FrameworkError> {
    let current = controller.universes().active_members();
    let changes = SecurityChanges::between(previous, &current);
    if !changes.is_empty() {
        controller.on_securities_changed(&changes)?;
        log.push(ChangeRecord::new(time, &changes));
        *previous = current;
    }
    Ok(())
}

/// Run a full simulation from a validated config.
pub fn run_simulation(config: &RunConfig) -> Result<RunResult, RunError> {
    config.validate()?;
    let framework = config.framework_config();
    let symbols = config.symbols();

    let models = build_model_set(&framework, &symbols)?;
    let mut controller = FrameworkController::new(models).with_debug(framework.debug);
    if framework.universe_selection.is_none() {
        for symbol in &symbols {
            controller.add_security(symbol.clone());
        }
    }

    let mut host = Host {
        cache: SecurityCache::default(),
        calendar: CalendarRegistry::new(),
        broker: PaperBroker::new(config.run.initial_cash, config.run.account_type),
    };

    let start = config.run.start;
    let mode = controller.post_init(start, &host.services())?;
    info!(%mode, symbols = symbols.len(), ticks = config.run.ticks, "simulation started");

    let mut subscribed = BTreeSet::new();
    let mut security_changes = Vec::new();
    sync_securities(&mut controller, &mut subscribed, start, &mut security_changes)?;

    let feed = SyntheticFeed::new(
        &symbols,
        config.run.seed,
        start,
        config.step(),
        config.run.ticks,
        host.calendar.clone(),
    );

    let mut ticks = TickCounts::default();
    let mut equity_curve = Vec::with_capacity(config.run.ticks);

    for mut slice in feed {
        let time = slice.time;
        host.cache.update(&slice);
        host.broker.mark(&slice);
        slice.bars.retain(|symbol, _| subscribed.contains(symbol));

        match controller.on_data(&slice, &mut host.services())? {
            TickOutcome::Processed(summary) => {
                ticks.processed += 1;
                debug!(
                    %time,
                    insights = summary.insights.len(),
                    targets = summary.targets.merged.len(),
                    "tick processed"
                );
            }
            TickOutcome::RefreshOnly(_) => ticks.refresh_only += 1,
            TickOutcome::Disabled => ticks.disabled += 1,
        }

        sync_securities(&mut controller, &mut subscribed, time, &mut security_changes)?;

        let cash = host.broker.cash();
        let holdings_value = host.broker.holdings_value();
        equity_curve.push(EquityPoint {
            time,
            cash,
            holdings_value,
            total: cash + holdings_value,
        });
    }

    let final_value = host.broker.total_portfolio_value();
    info!(
        processed = ticks.processed,
        insights = controller.total_insights(),
        fills = host.broker.fills().len(),
        final_value,
        "simulation finished"
    );

    Ok(RunResult {
        schema_version: SCHEMA_VERSION,
        config_hash: config.config_hash().0,
        mode,
        start,
        end: config.end(),
        ticks,
        universe_refreshes: controller.scheduler().refresh_count(),
        insights_generated: controller.total_insights(),
        orders_submitted: host.broker.orders_submitted(),
        initial_cash: config.run.initial_cash,
        final_value,
        fills: host.broker.fills().to_vec(),
        rejections: host.broker.rejections().to_vec(),
        positions: host.broker.positions(),
        security_changes,
        equity_curve,
    })
}
