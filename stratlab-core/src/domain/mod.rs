//! Domain types for the strategy framework

pub mod bar;
pub mod changes;
pub mod ids;
pub mod insight;
pub mod symbol;
pub mod target;
pub mod universe;

pub use bar::{Bar, Slice};
pub use changes::SecurityChanges;
pub use ids::{ConfigHash, InsightId, OrderId};
pub use insight::{Insight, InsightDirection, InsightPeriod, InsightType};
pub use symbol::{Market, SecurityType, Symbol};
pub use target::{PortfolioTarget, PortfolioTargetCollection, QUANTITY_EPSILON};
pub use universe::{Universe, UniverseConfig, UniverseRegistry};
