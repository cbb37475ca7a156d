//! The aggregate root: one game session's entire mutable state.

use std::collections::BTreeMap;

use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::domain::actions::{ActionRecord, PlayerAction};
use crate::domain::cards::Card;
use crate::domain::deck::Deck;
use crate::domain::player::{DeathCause, Player, PlayerId};
use crate::domain::rules::{GameConfig, MIN_PLAYERS};
use crate::domain::seeds::derive_deck_seed;
use crate::domain::votes::{Vote, VoteResult};
use crate::errors::domain::{GameError, NotFoundKind};

pub type GameId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Lobby,
    Morning,
    Day,
    Voting,
    Night,
    Resolution,
    Ended,
}

/// Per-night cap on lethal card usage. The Witch-Killer slot and the
/// kill-magic budget are coupled: using the Witch-Killer shrinks the
/// kill-magic budget for the same night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackQuota {
    pub witch_killer_used: bool,
    pub kill_magic_used: u8,
}

impl AttackQuota {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Authoritative, non-public record of one death. External viewers only
/// ever see a redacted "died" projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeathRecord {
    pub round: u32,
    pub player_id: PlayerId,
    pub cause: DeathCause,
    pub killer_id: Option<PlayerId>,
    pub dropped_cards: Vec<Card>,
    pub card_receivers: BTreeMap<PlayerId, Vec<Card>>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub id: GameId,
    pub room_id: String,
    pub phase: GamePhase,
    /// 1-based once the game starts; 0 in the lobby.
    pub round: u32,
    pub players: BTreeMap<PlayerId, Player>,
    /// Seat order. Dead players stay listed.
    pub player_order: Vec<PlayerId>,
    pub deck: Deck,
    /// This round's submitted actions, one per player, last-write-wins.
    pub current_actions: BTreeMap<PlayerId, PlayerAction>,
    /// This round's vote buffer, one vote per voter, last-write-wins.
    pub current_votes: Vec<Vote>,
    pub action_history: Vec<ActionRecord>,
    pub vote_history: Vec<VoteResult>,
    pub death_log: Vec<DeathRecord>,
    pub config: GameConfig,
    pub phase_start: Option<OffsetDateTime>,
    pub phase_end: Option<OffsetDateTime>,
    pub attack_quota: AttackQuota,
    /// Player disabled by this round's vote, if any.
    pub imprisoned: Option<PlayerId>,
    pub rng_seed: u64,
    action_seq: u64,
}

impl GameState {
    /// Create a game session: build and shuffle the deck, seat the players
    /// in the order given, and deal each an initial hand.
    pub fn new(
        id: GameId,
        room_id: impl Into<String>,
        config: GameConfig,
        player_ids: &[PlayerId],
        rng_seed: u64,
    ) -> Result<Self, GameError> {
        if player_ids.len() < MIN_PLAYERS || player_ids.len() > config.max_players {
            return Err(GameError::validation_other(
                "PLAYER_COUNT",
                format!(
                    "player count must be {}..={}, got {}",
                    MIN_PLAYERS,
                    config.max_players,
                    player_ids.len()
                ),
            ));
        }

        let mut rng = StdRng::seed_from_u64(derive_deck_seed(rng_seed));
        let mut deck = Deck::new(&config.card_pool, &mut rng);

        let mut players = BTreeMap::new();
        let mut player_order = Vec::with_capacity(player_ids.len());
        for (seat, &player_id) in player_ids.iter().enumerate() {
            let hand = deck.draw(config.max_hand_size, &mut rng);
            let player = Player::new(player_id, seat as u8, hand);
            if players.insert(player_id, player).is_some() {
                return Err(GameError::validation_other(
                    "DUPLICATE_PLAYER",
                    format!("duplicate player id {player_id}"),
                ));
            }
            player_order.push(player_id);
        }

        let mut state = Self {
            id,
            room_id: room_id.into(),
            phase: GamePhase::Lobby,
            round: 0,
            players,
            player_order,
            deck,
            current_actions: BTreeMap::new(),
            current_votes: Vec::new(),
            action_history: Vec::new(),
            vote_history: Vec::new(),
            death_log: Vec::new(),
            config,
            phase_start: None,
            phase_end: None,
            attack_quota: AttackQuota::default(),
            imprisoned: None,
            rng_seed,
            action_seq: 0,
        };
        state.set_phase(GamePhase::Lobby);
        Ok(state)
    }

    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players
            .get(&id)
            .ok_or_else(|| GameError::not_found(NotFoundKind::Player, format!("player {id}")))
    }

    /// Living players in seat order.
    pub fn alive_player_ids(&self) -> Vec<PlayerId> {
        self.player_order
            .iter()
            .copied()
            .filter(|id| self.players[id].is_alive())
            .collect()
    }

    pub fn living_count(&self) -> usize {
        self.players.values().filter(|p| p.is_alive()).count()
    }

    pub fn is_imprisoned(&self, id: PlayerId) -> bool {
        self.imprisoned == Some(id)
    }

    /// Enter a phase, stamping its timer window from the configured
    /// duration. Phases without a timer get no expiry.
    pub fn set_phase(&mut self, phase: GamePhase) {
        let now = OffsetDateTime::now_utc();
        self.phase = phase;
        self.phase_start = Some(now);
        self.phase_end = self.duration_for(phase).map(|d| now + d);
    }

    fn duration_for(&self, phase: GamePhase) -> Option<Duration> {
        let durations = &self.config.phase_durations;
        match phase {
            GamePhase::Morning => durations.morning,
            GamePhase::Day => durations.day,
            GamePhase::Voting => durations.voting,
            GamePhase::Night => durations.night,
            GamePhase::Lobby | GamePhase::Resolution | GamePhase::Ended => None,
        }
    }

    /// Advance to the next round: clear the per-round buffers and reset the
    /// attack quota.
    pub fn next_round(&mut self) {
        self.round += 1;
        self.current_actions.clear();
        self.current_votes.clear();
        self.imprisoned = None;
        self.attack_quota.reset();
    }

    pub(crate) fn next_action_seq(&mut self) -> u64 {
        self.action_seq += 1;
        self.action_seq
    }
}
