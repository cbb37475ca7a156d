//! Error types for the rule engine.

pub mod domain;

pub use domain::{GameError, NotFoundKind, ValidationKind};
