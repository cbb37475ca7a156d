//! RNG seed derivation for deterministic game behavior.
//!
//! Every random decision in the engine (deck shuffles, dropped-card
//! distribution, detect sampling, Witch-Killer transfer) draws from an RNG
//! seeded through these helpers, so identical action sequences replay to
//! identical outcomes.

/// Seed for building and shuffling the initial deck.
pub fn derive_deck_seed(game_seed: u64) -> u64 {
    game_seed.wrapping_mul(0x9E37_79B9).wrapping_add(1)
}

/// Seed for one round's resolution pass.
///
/// Unique per (game, round) so replaying a round consumes the same random
/// sequence regardless of what happened in other rounds.
pub fn derive_resolution_seed(game_seed: u64, round: u32) -> u64 {
    game_seed
        .wrapping_add((round as u64).wrapping_mul(1_000_000))
        .wrapping_add(2)
}
