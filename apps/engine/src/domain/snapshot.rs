//! Public projection of a game: what any spectator may see.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::player::{PlayerId, PlayerStatus};
use crate::domain::state::{GameId, GamePhase, GameState};

/// Redacted status: witches look alive, wrecks look dead, causes are never
/// exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicPlayerStatus {
    Alive,
    Died,
}

impl From<PlayerStatus> for PublicPlayerStatus {
    fn from(status: PlayerStatus) -> Self {
        if status.is_alive() {
            PublicPlayerStatus::Alive
        } else {
            PublicPlayerStatus::Died
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicPlayer {
    pub player_id: PlayerId,
    pub seat_number: u8,
    pub status: PublicPlayerStatus,
    pub hand_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicGameState {
    pub game_id: GameId,
    pub room_id: String,
    pub phase: GamePhase,
    pub round: u32,
    /// Players in seat order.
    pub players: Vec<PublicPlayer>,
    /// This round's imprisonment is public knowledge once Voting closes.
    pub imprisoned: Option<PlayerId>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub phase_start: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub phase_end: Option<OffsetDateTime>,
}

/// Build the spectator projection. Read-only; never pushed by the core.
pub fn public_state(state: &GameState) -> PublicGameState {
    let players = state
        .player_order
        .iter()
        .map(|id| {
            let p = &state.players[id];
            PublicPlayer {
                player_id: p.id,
                seat_number: p.seat_number,
                status: p.status.into(),
                hand_count: p.hand.len(),
            }
        })
        .collect();

    PublicGameState {
        game_id: state.id,
        room_id: state.room_id.clone(),
        phase: state.phase,
        round: state.round,
        players,
        imprisoned: state.imprisoned,
        phase_start: state.phase_start,
        phase_end: state.phase_end,
    }
}
