//! Error types raised by the framework and by pluggable components.

use thiserror::Error;

use crate::domain::Symbol;

/// Message of the configuration error raised when framework mode has no
/// universe selection model.
pub const MISSING_UNIVERSE_SELECTION: &str =
    "framework algorithms must specify a universe selection model";

/// Failure raised inside a pluggable component (alpha, portfolio construction,
/// risk management, execution, universe selection, brokerage).
///
/// The framework never catches or retries these; they propagate to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{component}: {message}")]
pub struct ComponentError {
    pub component: String,
    pub message: String,
}

impl ComponentError {
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            message: message.into(),
        }
    }
}

pub type ComponentResult<T> = Result<T, ComponentError>;

#[derive(Debug, Error)]
pub enum FrameworkError {
    /// Fatal: the configured model set cannot start.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Rejected synchronously; no state was mutated.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A collaborator could not resolve a symbol the framework must stamp.
    #[error("cannot resolve {what} for symbol {symbol}")]
    UnresolvedSymbol { symbol: Symbol, what: &'static str },

    #[error(transparent)]
    Component(#[from] ComponentError),
}
