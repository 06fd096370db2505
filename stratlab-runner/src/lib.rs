//! StratLab Runner: host harness around the framework controller.
//!
//! This crate builds on `stratlab-core` to provide:
//! - TOML run configuration
//! - A deterministic synthetic market-data feed
//! - The security value cache and exchange calendar registry
//! - A paper brokerage
//! - The simulation loop with securities-change detection
//! - JSON, CSV and Markdown artifacts

pub mod broker;
pub mod cache;
pub mod calendar;
pub mod config;
pub mod export;
pub mod feed;
pub mod result;
pub mod runner;

pub use broker::{Fill, PaperBroker, Position, Rejection};
pub use cache::SecurityCache;
pub use calendar::CalendarRegistry;
pub use config::{ConfigError, RunConfig, RunSection};
pub use export::{generate_report, load_artifacts, save_artifacts};
pub use feed::SyntheticFeed;
pub use result::{ChangeRecord, EquityPoint, RunResult, TickCounts, SCHEMA_VERSION};
pub use runner::{run_simulation, RunError};
