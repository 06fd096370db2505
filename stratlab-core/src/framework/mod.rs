//! The orchestration layer: model set validation, universe refresh, insight
//! stamping, the target pipeline and the controller that composes them.

pub mod controller;
pub mod insights;
pub mod model_set;
pub mod notify;
pub mod targets;
pub mod trace;
pub mod universe_refresh;

pub use controller::{
    ControllerState, FrameworkController, TickOutcome, TickSummary, CASH_ACCOUNT_WARNING,
};
pub use insights::InsightPipeline;
pub use model_set::{AlgorithmKind, FrameworkMode, ModelSet};
pub use notify::{InsightNotifier, InsightObserver, InsightsGenerated};
pub use targets::{merge_targets, run_targets, TargetRun};
pub use trace::{format_trace, DebugTrace, Stage, TRACE_TARGET};
pub use universe_refresh::{RefreshOutcome, UniverseRefreshScheduler};
