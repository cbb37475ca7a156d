//! Central error type for the game rule engine.
//!
//! Submission-time rule violations are rejected with a `GameError` and never
//! mutate state. Conditions that only become visible during the resolution
//! pass (a target that died earlier in the same pass, a quota that ran out
//! mid-pass) are not errors at all; they degrade to recorded
//! `ActionOutcome` variants so the pass always completes.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Rule-violation kinds surfaced at submission time.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Malformed action: a target where none belongs, or a missing one.
    InvalidAction,
    /// The operation is not legal in the current phase.
    InvalidPhase,
    /// The target does not exist or may not be targeted.
    InvalidTarget,
    /// The card cannot be used against that target's current state.
    CardNotUsable,
    /// The per-night attack budget is already spoken for.
    AttackQuotaFull,
    /// The acting player is dead.
    PlayerAlreadyDead,
    /// A Witch-Killer holder may play no other card.
    WitchKillerOnly,
    /// Playing the Witch-Killer requires holding it.
    NotWitchKillerHolder,
    /// A vote already exists for this voter. Never actually returned: a
    /// later vote overwrites the earlier one.
    AlreadyVoted,
    Other(String),
}

/// Missing-resource kinds (extend as needed).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Card,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// Input validation or business rule violation.
    Validation(ValidationKind, String),
    /// Missing resource in domain terms.
    NotFound(NotFoundKind, String),
}

impl Display for GameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            GameError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            GameError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
        }
    }
}

impl Error for GameError {}

impl GameError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    /// Validation failure outside the named kinds; `code` is a short stable
    /// tag for callers that match on kinds.
    pub fn validation_other(code: &str, detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::Other(code.to_string()), detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    /// The validation kind, if this is a validation error.
    pub fn validation_kind(&self) -> Option<&ValidationKind> {
        match self {
            GameError::Validation(kind, _) => Some(kind),
            GameError::NotFound(..) => None,
        }
    }
}
