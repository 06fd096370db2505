//! StratLab Core: the per-tick orchestration pipeline of a strategy framework.
//!
//! This crate contains:
//! - Domain types (symbols, slices, insights, portfolio targets, universes)
//! - The five pluggable component traits and built-in implementations
//! - Model set validation and the framework mode decision
//! - Scheduled universe refresh with two-phase removal
//! - Insight stamping and the target pipeline with risk override precedence
//! - The framework controller composing all of the above
//! - Exchange hours, collaborator interfaces, configuration fingerprinting

pub mod calendar;
pub mod components;
pub mod domain;
pub mod error;
pub mod fingerprint;
pub mod framework;
pub mod services;

pub use error::{ComponentError, ComponentResult, FrameworkError};
