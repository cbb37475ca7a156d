//! Win-condition evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerId;
use crate::domain::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// At most one player remains alive.
    LastSurvivor,
    /// Every living player is a witch.
    AllWitches,
    /// The round limit was exceeded.
    RoundLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEndResult {
    pub reason: EndReason,
    /// The sole survivor, when there is exactly one.
    pub winner: Option<PlayerId>,
    /// Survivors in seat order.
    pub survivors: Vec<PlayerId>,
}

/// Evaluate the terminal conditions. Returns `None` while the game goes on.
///
/// Checked at each Morning and at the end of every resolution pass.
pub fn evaluate(state: &GameState) -> Option<GameEndResult> {
    let survivors = state.alive_player_ids();
    let sole_winner = (survivors.len() == 1).then(|| survivors[0]);

    if survivors.len() <= 1 {
        return Some(GameEndResult {
            reason: EndReason::LastSurvivor,
            winner: sole_winner,
            survivors,
        });
    }
    if survivors.iter().all(|id| state.players[id].is_witch()) {
        return Some(GameEndResult {
            reason: EndReason::AllWitches,
            winner: None,
            survivors,
        });
    }
    if state.round > state.config.max_rounds {
        return Some(GameEndResult {
            reason: EndReason::RoundLimit,
            winner: None,
            survivors,
        });
    }
    None
}
