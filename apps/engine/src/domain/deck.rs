//! Deck construction, drawing, and dropped-card redistribution.

use std::collections::BTreeMap;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::cards::{Card, CardId, CardKind};
use crate::domain::player::PlayerId;

/// The shared card pools: a face-down draw pile and a discard pile.
///
/// Cards move in and out by value; a card is never in both piles at once,
/// and a drawn card leaves the deck entirely.
#[derive(Debug, Clone)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
}

impl Deck {
    /// Build a deck from a card pool and shuffle it (Fisher-Yates, uniform).
    ///
    /// Card ids are assigned sequentially before the shuffle, so a given
    /// pool always produces the same multiset of cards.
    pub fn new(pool: &BTreeMap<CardKind, usize>, rng: &mut StdRng) -> Self {
        let mut draw_pile = Vec::with_capacity(pool.values().sum());
        let mut next_id: CardId = 1;
        for (&kind, &count) in pool {
            for _ in 0..count {
                draw_pile.push(Card::new(next_id, kind));
                next_id += 1;
            }
        }
        draw_pile.shuffle(rng);
        Self {
            draw_pile,
            discard_pile: Vec::new(),
        }
    }

    /// A deck with no cards at all.
    pub fn empty() -> Self {
        Self {
            draw_pile: Vec::new(),
            discard_pile: Vec::new(),
        }
    }

    /// Rebuild a deck from explicit piles (tests, rehydration).
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        Self {
            draw_pile,
            discard_pile,
        }
    }

    /// Draw up to `n` cards from the draw-pile tail.
    ///
    /// If the draw pile runs short, the discard pile is reshuffled into it
    /// first; if the combined pool is still short, returns as many cards as
    /// exist. Never blocks, never errors.
    pub fn draw(&mut self, n: usize, rng: &mut StdRng) -> Vec<Card> {
        let mut drawn = Vec::with_capacity(n);
        while drawn.len() < n {
            match self.draw_pile.pop() {
                Some(card) => drawn.push(card),
                None => {
                    if self.discard_pile.is_empty() {
                        break;
                    }
                    self.reshuffle_discard(rng);
                }
            }
        }
        drawn
    }

    /// Move a spent card onto the discard pile.
    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    fn reshuffle_discard(&mut self, rng: &mut StdRng) {
        self.draw_pile.append(&mut self.discard_pile);
        self.draw_pile.shuffle(rng);
    }

    pub fn draw_pile_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_pile_len(&self) -> usize {
        self.discard_pile.len()
    }

    /// Cards remaining across both piles.
    pub fn remaining(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }
}

/// Redistribute a dead player's dropped cards.
///
/// The dropped cards are shuffled, then dealt round-robin over
/// `[claimer] + other_alive` in that fixed cyclic order (card `i` goes to
/// recipient `i % len`), so counts differ by at most one card between
/// recipients no matter how many cards dropped.
pub fn distribute_dropped_cards(
    mut cards: Vec<Card>,
    claimer: PlayerId,
    other_alive: &[PlayerId],
    rng: &mut StdRng,
) -> BTreeMap<PlayerId, Vec<Card>> {
    let mut recipients = Vec::with_capacity(1 + other_alive.len());
    recipients.push(claimer);
    recipients.extend_from_slice(other_alive);

    cards.shuffle(rng);

    let mut received: BTreeMap<PlayerId, Vec<Card>> = BTreeMap::new();
    for (i, card) in cards.into_iter().enumerate() {
        let recipient = recipients[i % recipients.len()];
        received.entry(recipient).or_default().push(card);
    }
    received
}
