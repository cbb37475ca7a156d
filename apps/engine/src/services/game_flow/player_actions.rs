use tracing::{debug, info};

use super::GameFlowService;
use crate::domain::actions::{self, ActionKind};
use crate::domain::player::PlayerId;
use crate::domain::state::GameId;
use crate::domain::votes;
use crate::errors::domain::GameError;

impl GameFlowService {
    /// Submit a night action for a player, last-write-wins per player.
    ///
    /// Rule violations visible at submission time are rejected here and
    /// never mutate state. An imprisoned player's submission is accepted
    /// without error; resolution voids it silently.
    pub fn submit_action(
        &self,
        game_id: GameId,
        player_id: PlayerId,
        action: ActionKind,
    ) -> Result<(), GameError> {
        debug!(game_id, player_id, action = ?action, "submitting action");
        self.with_game(game_id, |state| {
            actions::record_action(state, player_id, action)
        })?;
        info!(game_id, player_id, "action recorded");
        Ok(())
    }

    /// Submit a vote, last-write-wins per voter. A later vote replaces the
    /// voter's earlier one; this is not an error.
    pub fn submit_vote(
        &self,
        game_id: GameId,
        voter: PlayerId,
        target: PlayerId,
    ) -> Result<(), GameError> {
        debug!(game_id, voter, target, "submitting vote");
        self.with_game(game_id, |state| votes::record_vote(state, voter, target))?;
        info!(game_id, voter, target, "vote recorded");
        Ok(())
    }
}
