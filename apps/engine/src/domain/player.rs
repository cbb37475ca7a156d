//! Per-player mutable record and status transitions.

use serde::{Deserialize, Serialize};

use crate::domain::cards::{Card, CardId, CardKind};

pub type PlayerId = u64;

/// Player life-cycle status. `Witch` is a living sub-state; `Wreck` a dead
/// sub-state reached only through witch decay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerStatus {
    Alive,
    Witch,
    Dead,
    Wreck,
}

impl PlayerStatus {
    pub fn is_alive(self) -> bool {
        matches!(self, PlayerStatus::Alive | PlayerStatus::Witch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    WitchKiller,
    KillMagic,
    Wreck,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub seat_number: u8,
    pub status: PlayerStatus,
    pub hand: Vec<Card>,
    /// Round of this player's most recent kill, if any.
    pub last_kill_round: Option<u32>,
    /// Consecutive resolution passes this witch went without a kill.
    pub consecutive_no_kill_rounds: u32,
    pub has_barrier: bool,
    /// Card that raised the active barrier.
    pub barrier_source: Option<CardId>,
    pub death_round: Option<u32>,
    pub death_cause: Option<DeathCause>,
    pub killer_id: Option<PlayerId>,
}

impl Player {
    pub fn new(id: PlayerId, seat_number: u8, hand: Vec<Card>) -> Self {
        Self {
            id,
            seat_number,
            status: PlayerStatus::Alive,
            hand,
            last_kill_round: None,
            consecutive_no_kill_rounds: 0,
            has_barrier: false,
            barrier_source: None,
            death_round: None,
            death_cause: None,
            killer_id: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status.is_alive()
    }

    pub fn is_witch(&self) -> bool {
        self.status == PlayerStatus::Witch
    }

    /// Whether this hand holds the Witch-Killer. A hand query, not a stored
    /// flag: the card itself is the single source of truth.
    pub fn holds_witch_killer(&self) -> bool {
        self.hand.iter().any(|c| c.kind == CardKind::WitchKiller)
    }

    /// Position of the first card of `kind` in the hand.
    pub fn card_position(&self, kind: CardKind) -> Option<usize> {
        self.hand.iter().position(|c| c.kind == kind)
    }

    /// Remove and return the first card of `kind` from the hand.
    pub fn take_card(&mut self, kind: CardKind) -> Option<Card> {
        self.card_position(kind).map(|pos| self.hand.remove(pos))
    }

    /// Drop the entire hand, leaving it empty.
    pub fn take_hand(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.hand)
    }

    /// One-way transition into the witch state. A no-op for one who already
    /// is a witch; must not be called on the dead.
    pub fn transform_to_witch(&mut self) -> bool {
        debug_assert!(self.is_alive(), "only the living can become witches");
        if self.status == PlayerStatus::Alive {
            self.status = PlayerStatus::Witch;
            return true;
        }
        false
    }

    /// Record a successful kill this round, resetting the decay streak.
    pub fn record_kill(&mut self, round: u32) {
        self.last_kill_round = Some(round);
        self.consecutive_no_kill_rounds = 0;
    }

    /// Mark this player killed by an attack. Status becomes `Dead`; hand
    /// contents are handled separately by the resolver.
    pub fn mark_killed(&mut self, round: u32, cause: DeathCause, killer: Option<PlayerId>) {
        debug_assert!(self.is_alive(), "cannot kill the dead");
        self.status = PlayerStatus::Dead;
        self.death_round = Some(round);
        self.death_cause = Some(cause);
        self.killer_id = killer;
        self.has_barrier = false;
        self.barrier_source = None;
    }

    /// One-way decay of a witch into a wreck.
    ///
    /// Strips a held Witch-Killer card, returning it for transfer to a
    /// living player, before marking the player dead.
    pub fn transform_to_wreck(&mut self, round: u32) -> Option<Card> {
        debug_assert!(self.is_witch(), "only witches decay into wrecks");
        let witch_killer = self.take_card(CardKind::WitchKiller);
        self.status = PlayerStatus::Wreck;
        self.death_round = Some(round);
        self.death_cause = Some(DeathCause::Wreck);
        self.killer_id = None;
        self.has_barrier = false;
        self.barrier_source = None;
        witch_killer
    }

    /// Clear any active barrier (each Night start).
    pub fn clear_barrier(&mut self) {
        self.has_barrier = false;
        self.barrier_source = None;
    }

    /// Consume the active barrier after it blocked an attack.
    pub fn consume_barrier(&mut self) {
        self.has_barrier = false;
        self.barrier_source = None;
    }
}
