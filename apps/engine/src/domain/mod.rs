//! Domain layer: pure game rule logic.

pub mod actions;
pub mod cards;
pub mod deck;
pub mod events;
pub mod phase;
pub mod player;
pub mod player_view;
pub mod resolution;
pub mod rules;
pub mod seeds;
pub mod snapshot;
pub mod state;
pub mod votes;
pub mod win;

#[cfg(test)]
mod test_state_helpers;
#[cfg(test)]
mod tests_resolution;
#[cfg(test)]
mod tests_scenarios;

// Re-exports for ergonomics
pub use actions::{ActionKind, ActionOutcome, ActionRecord, PlayerAction};
pub use cards::{Card, CardId, CardKind};
pub use deck::{distribute_dropped_cards, Deck};
pub use events::GameEvent;
pub use phase::{advance, PhaseResult};
pub use player::{DeathCause, Player, PlayerId, PlayerStatus};
pub use player_view::{player_view, PlayerViewState};
pub use rules::{GameConfig, PhaseDurations};
pub use snapshot::{public_state, PublicGameState, PublicPlayerStatus};
pub use state::{AttackQuota, DeathRecord, GameId, GamePhase, GameState};
pub use votes::{calculate_vote_result, Vote, VoteResult};
pub use win::{EndReason, GameEndResult};
