//! The ordered event log surfaced at each resolved phase boundary.

use serde::{Deserialize, Serialize};

use crate::domain::actions::ActionOutcome;
use crate::domain::cards::CardKind;
use crate::domain::player::PlayerId;
use crate::domain::state::GamePhase;
use crate::domain::votes::VoteResult;
use crate::domain::win::GameEndResult;

/// One entry in the per-phase event log consumed by the transport layer.
///
/// Some entries are for a single player's eyes; `recipient()` says whose.
/// The engine itself never pushes events anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
        round: u32,
    },
    /// Public death notice. The cause is deliberately withheld.
    PlayerDied { player_id: PlayerId, round: u32 },
    CardUsed {
        player_id: PlayerId,
        card: CardKind,
        target: Option<PlayerId>,
        outcome: ActionOutcome,
    },
    CardDrawn { player_id: PlayerId, count: usize },
    VoteCast { voter: PlayerId, target: PlayerId },
    VoteResolved(VoteResult),
    WitchTransformed { player_id: PlayerId },
    WreckTransformed { player_id: PlayerId },
    GameEnded(GameEndResult),
}

impl GameEvent {
    /// The single player this event is addressed to, or `None` when it is
    /// public. Night-action outcomes and transformations are private: the
    /// public record of a night is the morning death notice.
    pub fn recipient(&self) -> Option<PlayerId> {
        match self {
            GameEvent::CardUsed { player_id, .. }
            | GameEvent::WitchTransformed { player_id }
            | GameEvent::WreckTransformed { player_id } => Some(*player_id),
            GameEvent::PhaseChanged { .. }
            | GameEvent::PlayerDied { .. }
            | GameEvent::CardDrawn { .. }
            | GameEvent::VoteCast { .. }
            | GameEvent::VoteResolved(_)
            | GameEvent::GameEnded(_) => None,
        }
    }
}
