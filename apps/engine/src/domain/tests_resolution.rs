//! Resolution-pass suites: barriers, detect snapshots, card ownership
//! transfer, staleness outcomes, and hand replenishment.

use crate::domain::actions::{record_action, ActionKind, ActionOutcome};
use crate::domain::cards::{Card, CardKind};
use crate::domain::deck::Deck;
use crate::domain::events::GameEvent;
use crate::domain::player::{DeathCause, PlayerStatus};
use crate::domain::resolution::resolve_night;
use crate::domain::state::{GamePhase, GameState};
use crate::domain::test_state_helpers::{make_game_state, StateArgs};

fn use_card(card: CardKind, target: u64) -> ActionKind {
    ActionKind::UseCard {
        card,
        target: Some(target),
    }
}

fn outcome_of(state: &GameState, player_id: u64) -> ActionOutcome {
    state
        .action_history
        .iter()
        .find(|r| r.player_id == player_id)
        .map(|r| r.outcome)
        .expect("recorded outcome")
}

#[test]
fn barrier_blocks_one_attack_and_is_consumed() {
    // Hands are padded so nobody draws during replenish; the spent cards
    // must still be sitting in the discard pile afterwards.
    let mut state = make_game_state(
        &[
            &[
                CardKind::Kill,
                CardKind::Check,
                CardKind::Check,
                CardKind::Check,
                CardKind::Check,
            ],
            &[
                CardKind::Barrier,
                CardKind::Check,
                CardKind::Check,
                CardKind::Check,
                CardKind::Check,
            ],
            &[
                CardKind::Check,
                CardKind::Check,
                CardKind::Check,
                CardKind::Check,
            ],
        ],
        StateArgs::default(),
    );

    record_action(&mut state, 2, ActionKind::UseCard { card: CardKind::Barrier, target: None })
        .unwrap();
    record_action(&mut state, 1, use_card(CardKind::Kill, 2)).unwrap();

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(outcome_of(&state, 1), ActionOutcome::Blocked { target: 2 });
    assert_eq!(outcome_of(&state, 2), ActionOutcome::Shielded);
    assert!(state.players[&2].is_alive());
    assert!(!state.players[&2].has_barrier, "the block spent the barrier");
    assert!(state.death_log.is_empty());

    // Both the spent Kill and the spent Barrier reached the discard pile.
    assert_eq!(state.deck.discard_pile_len(), 2);
}

#[test]
fn barrier_only_absorbs_the_first_attack() {
    let mut state = make_game_state(
        &[&[CardKind::Kill], &[CardKind::Kill], &[CardKind::Barrier]],
        StateArgs::default(),
    );

    record_action(&mut state, 3, ActionKind::UseCard { card: CardKind::Barrier, target: None })
        .unwrap();
    record_action(&mut state, 1, use_card(CardKind::Kill, 3)).unwrap();
    record_action(&mut state, 2, use_card(CardKind::Kill, 3)).unwrap();

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(outcome_of(&state, 1), ActionOutcome::Blocked { target: 3 });
    assert_eq!(outcome_of(&state, 2), ActionOutcome::Killed { target: 3 });
    assert_eq!(state.players[&3].status, PlayerStatus::Dead);
    assert_eq!(state.players[&3].death_cause, Some(DeathCause::KillMagic));
}

#[test]
fn detect_reads_the_pre_round_hand() {
    // The Witch-Killer removes the target before Detect's slot; Detect must
    // still see the hand as it stood when the night began.
    let mut state = make_game_state(
        &[
            &[CardKind::WitchKiller],
            &[CardKind::Detect],
            &[CardKind::Check, CardKind::Check],
        ],
        StateArgs::default(),
    );

    record_action(&mut state, 2, use_card(CardKind::Detect, 3)).unwrap();
    record_action(&mut state, 1, use_card(CardKind::WitchKiller, 3)).unwrap();

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(outcome_of(&state, 1), ActionOutcome::Killed { target: 3 });
    assert_eq!(
        outcome_of(&state, 2),
        ActionOutcome::Revealed {
            target: 3,
            hand_size: 2,
            card: Some(CardKind::Check),
        }
    );
}

#[test]
fn witch_killer_is_not_consumed_by_use() {
    let mut state = make_game_state(
        &[&[CardKind::WitchKiller], &[CardKind::Check], &[]],
        StateArgs::default(),
    );

    record_action(&mut state, 1, use_card(CardKind::WitchKiller, 2)).unwrap();
    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(outcome_of(&state, 1), ActionOutcome::Killed { target: 2 });
    assert!(state.players[&1].holds_witch_killer());
    assert!(state.players[&1].is_witch());
    assert_eq!(state.players[&1].last_kill_round, Some(1));
}

#[test]
fn kill_magic_victim_drops_witch_killer_to_a_living_player() {
    let mut state = make_game_state(
        &[
            &[CardKind::Kill],
            &[CardKind::WitchKiller, CardKind::Check],
            &[],
            &[],
        ],
        StateArgs::default(),
    );

    record_action(&mut state, 2, use_card(CardKind::WitchKiller, 4)).unwrap();
    // Overwrite: the holder reconsiders and passes instead.
    record_action(&mut state, 2, ActionKind::Pass).unwrap();
    record_action(&mut state, 1, use_card(CardKind::Kill, 2)).unwrap();

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(outcome_of(&state, 1), ActionOutcome::Killed { target: 2 });
    assert_eq!(state.players[&2].death_cause, Some(DeathCause::KillMagic));
    assert!(!state.players[&2].holds_witch_killer());

    let holders: Vec<u64> = state
        .players
        .values()
        .filter(|p| p.holds_witch_killer())
        .map(|p| p.id)
        .collect();
    assert_eq!(holders.len(), 1, "exactly one living player inherits it");
    assert!(state.players[&holders[0]].is_alive());

    let record = &state.death_log[0];
    assert_eq!(record.dropped_cards.len(), 2);
    let transferred: usize = record
        .card_receivers
        .values()
        .map(|cards| cards.len())
        .sum();
    assert_eq!(transferred, 2);
}

#[test]
fn action_of_a_player_killed_earlier_in_the_pass_is_ignored() {
    let mut state = make_game_state(
        &[&[CardKind::WitchKiller], &[CardKind::Kill], &[]],
        StateArgs::default(),
    );

    record_action(&mut state, 2, use_card(CardKind::Kill, 3)).unwrap();
    record_action(&mut state, 1, use_card(CardKind::WitchKiller, 2)).unwrap();

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(outcome_of(&state, 1), ActionOutcome::Killed { target: 2 });
    assert_eq!(outcome_of(&state, 2), ActionOutcome::Ignored);
    assert!(state.players[&3].is_alive());

    // Ignored actions surface no event; the ledger still records them.
    assert!(!events.iter().any(|e| matches!(
        e,
        GameEvent::CardUsed {
            player_id: 2,
            ..
        }
    )));
}

#[test]
fn replenish_draws_back_up_to_the_hand_limit() {
    let mut state = make_game_state(&[&[CardKind::Check], &[], &[]], StateArgs::default());
    state.deck = Deck::from_piles(
        (500..512).map(|id| Card::new(id, CardKind::Kill)).collect(),
        Vec::new(),
    );

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    let max = state.config.max_hand_size;
    for id in [1u64, 2, 3] {
        assert_eq!(state.players[&id].hand.len(), max);
    }
    let drawn: usize = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::CardDrawn { count, .. } => Some(*count),
            _ => None,
        })
        .sum();
    assert_eq!(drawn, 3 + 4 + 4);
    assert_eq!(state.deck.remaining(), 1);
}

#[test]
fn replenish_reshuffles_the_discard_pile_when_short() {
    let mut state = make_game_state(&[&[], &[], &[]], StateArgs::default());
    state.deck = Deck::from_piles(
        vec![Card::new(500, CardKind::Kill)],
        (600..605).map(|id| Card::new(id, CardKind::Check)).collect(),
    );

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    let in_hands: usize = state.players.values().map(|p| p.hand.len()).sum();
    assert_eq!(in_hands, 6, "all six cards drawn across the reshuffle");
    assert_eq!(state.deck.remaining(), 0);
}

#[test]
fn check_reveals_whether_the_witch_killer_struck() {
    let mut state = make_game_state(
        &[&[CardKind::Check, CardKind::Check], &[], &[], &[]],
        StateArgs {
            round: 2,
            ..Default::default()
        },
    );
    state
        .players
        .get_mut(&3)
        .unwrap()
        .mark_killed(1, DeathCause::WitchKiller, Some(4));
    state
        .players
        .get_mut(&4)
        .unwrap()
        .mark_killed(1, DeathCause::KillMagic, Some(3));

    record_action(&mut state, 1, use_card(CardKind::Check, 3)).unwrap();

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(
        outcome_of(&state, 1),
        ActionOutcome::Checked {
            target: 3,
            was_witch_killer: true,
        }
    );

    // Second inquest, next round, against the kill-magic victim.
    state.next_round();
    state.set_phase(GamePhase::Night);
    record_action(&mut state, 1, use_card(CardKind::Check, 4)).unwrap();
    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    let last = state.action_history.last().unwrap();
    assert_eq!(
        last.outcome,
        ActionOutcome::Checked {
            target: 4,
            was_witch_killer: false,
        }
    );
}

#[test]
fn detect_on_an_empty_hand_reveals_nothing() {
    let mut state = make_game_state(&[&[CardKind::Detect], &[], &[]], StateArgs::default());
    record_action(&mut state, 1, use_card(CardKind::Detect, 2)).unwrap();

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(
        outcome_of(&state, 1),
        ActionOutcome::Revealed {
            target: 2,
            hand_size: 0,
            card: None,
        }
    );
}

#[test]
fn pass_resolves_without_consuming_anything() {
    let mut state = make_game_state(&[&[CardKind::Kill], &[], &[]], StateArgs::default());
    record_action(&mut state, 1, ActionKind::Pass).unwrap();

    let mut events = Vec::new();
    resolve_night(&mut state, &mut events);

    assert_eq!(outcome_of(&state, 1), ActionOutcome::Passed);
    assert_eq!(state.players[&1].hand.len(), 1);
    assert_eq!(state.deck.discard_pile_len(), 0);
}
