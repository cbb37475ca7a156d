//! Game constants and per-game configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::domain::cards::CardKind;

pub const DEFAULT_MAX_PLAYERS: usize = 12;
pub const MIN_PLAYERS: usize = 2;
pub const DEFAULT_MAX_ROUNDS: u32 = 15;
pub const DEFAULT_MAX_HAND_SIZE: usize = 4;

/// Nights a witch may go without a kill before decaying into a wreck.
pub const DEFAULT_WITCH_DECAY_NIGHTS: u32 = 3;

/// Kill-magic budget per night, and the reduced budget once the
/// Witch-Killer has been used the same night.
pub const KILL_MAGIC_PER_NIGHT: u8 = 3;
pub const KILL_MAGIC_WITH_WITCH_KILLER: u8 = 2;

/// Per-phase timer durations. `None` means the phase has no expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub morning: Option<Duration>,
    pub day: Option<Duration>,
    pub voting: Option<Duration>,
    pub night: Option<Duration>,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            morning: Some(Duration::seconds(20)),
            day: Some(Duration::seconds(180)),
            voting: Some(Duration::seconds(60)),
            night: Some(Duration::seconds(90)),
        }
    }
}

/// Immutable per-game configuration, supplied by the caller at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub max_players: usize,
    pub max_rounds: u32,
    pub max_hand_size: usize,
    pub witch_decay_nights: u32,
    pub kill_magic_per_night: u8,
    pub kill_magic_with_witch_killer: u8,
    pub phase_durations: PhaseDurations,
    /// Copies of each card kind in the deck.
    pub card_pool: BTreeMap<CardKind, usize>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_players: DEFAULT_MAX_PLAYERS,
            max_rounds: DEFAULT_MAX_ROUNDS,
            max_hand_size: DEFAULT_MAX_HAND_SIZE,
            witch_decay_nights: DEFAULT_WITCH_DECAY_NIGHTS,
            kill_magic_per_night: KILL_MAGIC_PER_NIGHT,
            kill_magic_with_witch_killer: KILL_MAGIC_WITH_WITCH_KILLER,
            phase_durations: PhaseDurations::default(),
            card_pool: default_card_pool(),
        }
    }
}

impl GameConfig {
    /// Total number of cards the pool describes.
    pub fn deck_size(&self) -> usize {
        self.card_pool.values().sum()
    }
}

/// The standard 35-card pool: a single Witch-Killer plus consumables.
pub fn default_card_pool() -> BTreeMap<CardKind, usize> {
    let mut pool = BTreeMap::new();
    pool.insert(CardKind::WitchKiller, 1);
    pool.insert(CardKind::Kill, 12);
    pool.insert(CardKind::Barrier, 8);
    pool.insert(CardKind::Detect, 8);
    pool.insert(CardKind::Check, 6);
    pool
}
