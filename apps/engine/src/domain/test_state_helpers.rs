//! Test-only game state builder for domain unit tests.

use crate::domain::cards::{Card, CardId, CardKind};
use crate::domain::player::PlayerId;
use crate::domain::rules::GameConfig;
use crate::domain::state::{GamePhase, GameState};

/// Knobs for [`make_game_state`]; start from `..Default::default()`.
pub struct StateArgs {
    pub phase: GamePhase,
    pub round: u32,
    pub imprisoned: Option<PlayerId>,
    pub config: GameConfig,
    pub seed: u64,
}

impl Default for StateArgs {
    fn default() -> Self {
        Self {
            phase: GamePhase::Night,
            round: 1,
            imprisoned: None,
            config: GameConfig::default(),
            seed: 42,
        }
    }
}

/// Build a `GameState` with explicit hands and an empty deck.
///
/// Player `i` (0-based slot) gets id `i + 1`, seat `i`, and a hand built
/// from `hands[i]` with card ids unique across all players. Tests that
/// need a stocked deck assign `state.deck` afterwards.
pub fn make_game_state(hands: &[&[CardKind]], args: StateArgs) -> GameState {
    let player_ids: Vec<PlayerId> = (1..=hands.len() as PlayerId).collect();
    let mut config = args.config;
    config.card_pool.clear();

    let mut state = GameState::new(1, "test-room", config, &player_ids, args.seed)
        .expect("test state construction");

    for (i, kinds) in hands.iter().enumerate() {
        let pid = (i + 1) as PlayerId;
        let hand: Vec<Card> = kinds
            .iter()
            .enumerate()
            .map(|(j, &kind)| Card::new((i * 100 + j + 1) as CardId, kind))
            .collect();
        state.players.get_mut(&pid).expect("seeded player").hand = hand;
    }

    state.round = args.round;
    state.set_phase(args.phase);
    state.imprisoned = args.imprisoned;
    state
}
