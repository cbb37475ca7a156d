#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Witch Trial rule engine.
//!
//! A deterministic simulation core for the Witch Trial social deduction
//! card game: the phase state machine, the card-priority resolution pass,
//! the attack-quota and ownership-transfer logic, and the win-condition
//! evaluator. Transport, persistence, and rendering live elsewhere; they
//! talk to this crate through [`GameFlowService`] and consume the ordered
//! [`GameEvent`] log and the read-only projections.

pub mod domain;
pub mod errors;
pub mod services;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use domain::actions::{ActionKind, ActionOutcome};
pub use domain::cards::{Card, CardId, CardKind};
pub use domain::events::GameEvent;
pub use domain::phase::PhaseResult;
pub use domain::player::{DeathCause, PlayerId, PlayerStatus};
pub use domain::player_view::PlayerViewState;
pub use domain::rules::{GameConfig, PhaseDurations};
pub use domain::snapshot::{PublicGameState, PublicPlayerStatus};
pub use domain::state::{GameId, GamePhase};
pub use domain::votes::VoteResult;
pub use domain::win::{EndReason, GameEndResult};
pub use errors::domain::{GameError, NotFoundKind, ValidationKind};
pub use services::game_flow::GameFlowService;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
