//! Per-player projection: a player's own full hand plus the public view.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, CardKind};
use crate::domain::player::PlayerId;
use crate::domain::snapshot::{public_state, PublicGameState};
use crate::domain::state::{GamePhase, GameState};
use crate::errors::domain::GameError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerViewState {
    pub public: PublicGameState,
    pub player_id: PlayerId,
    pub hand: Vec<Card>,
    pub is_witch: bool,
    pub has_barrier: bool,
    pub holds_witch_killer: bool,
    pub imprisoned: bool,
    /// Whether a night action from this player would currently be accepted.
    pub can_act: bool,
    /// Card kinds this player may legally play tonight. The Witch-Killer
    /// holder sees only the forced play.
    pub usable_cards: Vec<CardKind>,
}

/// Build one player's view of the game.
pub fn player_view(state: &GameState, player_id: PlayerId) -> Result<PlayerViewState, GameError> {
    let player = state.player(player_id)?;

    let imprisoned = state.is_imprisoned(player_id);
    let can_act = state.phase == GamePhase::Night && player.is_alive() && !imprisoned;

    let usable_cards = if !can_act {
        Vec::new()
    } else if player.holds_witch_killer() {
        vec![CardKind::WitchKiller]
    } else {
        let mut kinds: Vec<CardKind> = player.hand.iter().map(|c| c.kind).collect();
        kinds.sort();
        kinds.dedup();
        kinds
    };

    Ok(PlayerViewState {
        public: public_state(state),
        player_id,
        hand: player.hand.clone(),
        is_witch: player.is_witch(),
        has_barrier: player.has_barrier,
        holds_witch_killer: player.holds_witch_killer(),
        imprisoned,
        can_act,
        usable_cards,
    })
}
