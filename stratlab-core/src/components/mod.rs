//! Component traits: the five-slot composition model.
//!
//! Every framework algorithm is composed of five independent components:
//! - Universe selection: decides which instruments are tradeable
//! - Alpha: turns market data into insights
//! - Portfolio construction: turns insights into desired holdings
//! - Risk management: overrides desired holdings
//! - Execution: turns merged targets into orders
//!
//! Plus the factory that builds them from configuration.

pub mod alpha;
pub mod execution;
pub mod factory;
pub mod portfolio;
pub mod risk;
pub mod universe_selection;

pub use alpha::{AlphaModel, CompositeAlpha, ConstantAlpha, NullAlpha};
pub use execution::{ExecutionModel, ImmediateExecution};
pub use factory::FactoryError;
pub use portfolio::{EqualWeightingPortfolio, NullPortfolioConstruction, PortfolioConstructionModel};
pub use risk::{CompositeRisk, MaximumPositionSize, NullRiskManagement, RiskManagementModel};
pub use universe_selection::{
    CompositeUniverseSelection, ManualUniverseSelection, RotatingUniverseSelection,
    UniverseSelectionModel,
};
