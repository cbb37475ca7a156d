//! The card catalog: the five card kinds and their fixed definitions.

use serde::{Deserialize, Serialize};

/// Identity of one physical card copy. Unique within a game.
pub type CardId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardKind {
    WitchKiller,
    Detect,
    Kill,
    Barrier,
    Check,
}

impl CardKind {
    pub const ALL: [CardKind; 5] = [
        CardKind::WitchKiller,
        CardKind::Detect,
        CardKind::Kill,
        CardKind::Barrier,
        CardKind::Check,
    ];

    /// Resolution priority. Higher resolves first; ties keep submission order.
    pub fn priority(self) -> u8 {
        match self {
            CardKind::WitchKiller => 100,
            CardKind::Detect => 90,
            CardKind::Kill => 80,
            CardKind::Barrier => 50,
            CardKind::Check => 10,
        }
    }

    /// Lethal card kinds draw on the shared per-night attack quota.
    pub fn is_attack(self) -> bool {
        matches!(self, CardKind::WitchKiller | CardKind::Kill)
    }

    /// Consumable cards move to the discard pile when their action resolves.
    /// The Witch-Killer persists with its holder and transfers on death.
    pub fn consumable(self) -> bool {
        !matches!(self, CardKind::WitchKiller)
    }

    pub fn name(self) -> &'static str {
        match self {
            CardKind::WitchKiller => "Witch-Killer",
            CardKind::Detect => "Detect Magic",
            CardKind::Kill => "Kill Magic",
            CardKind::Barrier => "Barrier",
            CardKind::Check => "Inquest",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CardKind::WitchKiller => {
                "The unique forced-play blade. Its holder may use no other card."
            }
            CardKind::Detect => "Reveal a player's hand size and one random card from it.",
            CardKind::Kill => "Strike a player down. Limited by the nightly attack quota.",
            CardKind::Barrier => "Raise a shield that blocks exactly one attack tonight.",
            CardKind::Check => "Learn whether a dead player fell to the Witch-Killer.",
        }
    }
}

/// One physical card copy.
///
/// Deliberately not `Copy`: a card lives in exactly one of {a hand, the draw
/// pile, the discard pile} and moves between them. `Clone` exists only so
/// immutable history records can keep a copy of what was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub kind: CardKind,
}

impl Card {
    pub fn new(id: CardId, kind: CardKind) -> Self {
        Self { id, kind }
    }
}
