use tracing::info;

use super::GameFlowService;
use crate::domain::phase::{self, PhaseResult};
use crate::domain::state::GameId;
use crate::errors::domain::GameError;

impl GameFlowService {
    /// Advance the game one phase boundary.
    ///
    /// Leaving Night runs the full resolution pass before returning; the
    /// pass is uninterruptible and holds the game lock throughout. Phase
    /// timers are advisory: an expired timer is a reason for the caller to
    /// invoke this, nothing more.
    pub fn advance_phase(&self, game_id: GameId) -> Result<PhaseResult, GameError> {
        let result = self.with_game(game_id, phase::advance)?;
        info!(
            game_id,
            phase = ?result.phase,
            round = result.round,
            events = result.events.len(),
            "phase advanced"
        );
        if let Some(end) = &result.ended {
            info!(game_id, reason = ?end.reason, winner = ?end.winner, "game ended");
        }
        Ok(result)
    }
}
