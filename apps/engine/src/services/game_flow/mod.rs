//! Game flow orchestration service - bridges the pure rule engine with
//! concurrent callers.
//!
//! One logical resolver per game session: every operation takes that game's
//! exclusive lock, so submissions apply atomically and no reader ever
//! observes a partially-resolved round. Scaling out is by sharding whole
//! game sessions; there is no cross-session state.

mod orchestration;
mod player_actions;

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::info;

use crate::domain::player::PlayerId;
use crate::domain::player_view::{self, PlayerViewState};
use crate::domain::rules::GameConfig;
use crate::domain::snapshot::{self, PublicGameState};
use crate::domain::state::{GameId, GameState};
use crate::errors::domain::{GameError, NotFoundKind};

pub struct GameFlowService {
    games: DashMap<GameId, Mutex<GameState>>,
    next_game_id: AtomicI64,
}

impl Default for GameFlowService {
    fn default() -> Self {
        Self::new()
    }
}

impl GameFlowService {
    pub fn new() -> Self {
        Self {
            games: DashMap::new(),
            next_game_id: AtomicI64::new(1),
        }
    }

    /// Create a game session: seat the given players, build the deck, and
    /// deal initial hands. Returns the new game's id.
    pub fn create_game(
        &self,
        room_id: impl Into<String>,
        config: GameConfig,
        player_ids: &[PlayerId],
        rng_seed: u64,
    ) -> Result<GameId, GameError> {
        let game_id = self.next_game_id.fetch_add(1, Ordering::Relaxed);
        let state = GameState::new(game_id, room_id, config, player_ids, rng_seed)?;
        self.games.insert(game_id, Mutex::new(state));
        info!(game_id, players = player_ids.len(), "game created");
        Ok(game_id)
    }

    /// The spectator projection of a game.
    pub fn public_state(&self, game_id: GameId) -> Result<PublicGameState, GameError> {
        self.with_game(game_id, |state| Ok(snapshot::public_state(state)))
    }

    /// One player's projection of a game.
    pub fn player_view(
        &self,
        game_id: GameId,
        player_id: PlayerId,
    ) -> Result<PlayerViewState, GameError> {
        self.with_game(game_id, |state| player_view::player_view(state, player_id))
    }

    /// Run `f` under the game's exclusive lock.
    fn with_game<T>(
        &self,
        game_id: GameId,
        f: impl FnOnce(&mut GameState) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let entry = self
            .games
            .get(&game_id)
            .ok_or_else(|| GameError::not_found(NotFoundKind::Game, format!("game {game_id}")))?;
        let mut state = entry.lock();
        f(&mut state)
    }
}
