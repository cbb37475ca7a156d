//! End-to-end rule scenarios driven through the phase machine.

use crate::domain::actions::{record_action, ActionKind, ActionOutcome};
use crate::domain::cards::CardKind;
use crate::domain::events::GameEvent;
use crate::domain::phase::advance;
use crate::domain::player::{DeathCause, PlayerStatus};
use crate::domain::state::{GamePhase, GameState};
use crate::domain::test_state_helpers::{make_game_state, StateArgs};
use crate::domain::votes::record_vote;

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

/// Scenario A: the starting Witch-Killer holder becomes a witch at setup,
/// kills on the first night, and the victim's hand spreads over the six
/// survivors.
#[test]
fn first_night_witch_killer_kill() {
    let filler = [CardKind::Check, CardKind::Check, CardKind::Check];
    let mut state = make_game_state(
        &[
            &[
                CardKind::WitchKiller,
                CardKind::Check,
                CardKind::Check,
                CardKind::Check,
            ],
            &[
                CardKind::Detect,
                CardKind::Barrier,
                CardKind::Check,
                CardKind::Check,
            ],
            &filler,
            &filler,
            &filler,
            &filler,
            &filler,
        ],
        StateArgs {
            phase: GamePhase::Lobby,
            round: 0,
            ..Default::default()
        },
    );

    let setup = advance(&mut state).unwrap();
    assert_eq!(setup.phase, GamePhase::Morning);
    assert_eq!(setup.round, 1);
    assert!(setup
        .events
        .contains(&GameEvent::WitchTransformed { player_id: 1 }));
    assert!(state.players[&1].is_witch());

    assert_eq!(advance(&mut state).unwrap().phase, GamePhase::Day);
    assert_eq!(advance(&mut state).unwrap().phase, GamePhase::Voting);
    assert_eq!(advance(&mut state).unwrap().phase, GamePhase::Night);

    record_action(&mut state, 1, use_card(CardKind::WitchKiller, 2)).unwrap();
    let result = advance(&mut state).unwrap();

    assert_eq!(result.phase, GamePhase::Morning);
    assert_eq!(result.round, 2);
    assert!(result.events.contains(&GameEvent::PlayerDied {
        player_id: 2,
        round: 1
    }));

    assert_eq!(state.players[&2].status, PlayerStatus::Dead);
    assert_eq!(state.players[&2].death_cause, Some(DeathCause::WitchKiller));
    assert!(state.players[&1].is_witch(), "the killer remains a witch");

    let record = &state.death_log[0];
    assert_eq!(record.cause, DeathCause::WitchKiller);
    assert_eq!(record.killer_id, Some(1));
    assert_eq!(record.dropped_cards.len(), 4);
    let counts: Vec<usize> = record.card_receivers.values().map(Vec::len).collect();
    assert_eq!(counts.iter().sum::<usize>(), 4);
    assert!(counts.iter().all(|&c| c == 1));
    assert!(record.card_receivers.keys().all(|id| *id != 2));
}

/// Scenario B: a witch that goes the configured number of nights without a
/// kill decays into a wreck, and the Witch-Killer moves to a living player.
#[test]
fn witch_decay_transfers_the_witch_killer() {
    let mut state = make_game_state(
        &[&[CardKind::WitchKiller], &[], &[]],
        StateArgs::default(),
    );
    {
        let witch = state.players.get_mut(&1).unwrap();
        witch.transform_to_witch();
        witch.consecutive_no_kill_rounds = state.config.witch_decay_nights - 1;
    }

    let result = advance(&mut state).unwrap();
    assert_eq!(result.phase, GamePhase::Morning);
    assert!(result
        .events
        .contains(&GameEvent::WreckTransformed { player_id: 1 }));
    assert!(result.events.contains(&GameEvent::PlayerDied {
        player_id: 1,
        round: 1
    }));

    assert_eq!(state.players[&1].status, PlayerStatus::Wreck);
    assert_eq!(state.players[&1].death_cause, Some(DeathCause::Wreck));

    let holder: Vec<u64> = state
        .players
        .values()
        .filter(|p| p.holds_witch_killer())
        .map(|p| p.id)
        .collect();
    assert_eq!(holder.len(), 1);
    assert!(matches!(holder[0], 2 | 3));

    let record = &state.death_log[0];
    assert_eq!(record.cause, DeathCause::Wreck);
    assert_eq!(record.killer_id, None);
    assert!(record
        .dropped_cards
        .iter()
        .any(|c| c.kind == CardKind::WitchKiller));
}

/// Scenario C: the Witch-Killer resolves first and kills; a same-night Kill
/// against the now-dead target misses instead of double-killing.
#[test]
fn stale_kill_against_fresh_corpse_misses() {
    let mut state = make_game_state(
        &[&[CardKind::WitchKiller], &[CardKind::Kill], &[], &[]],
        StateArgs::default(),
    );

    record_action(&mut state, 2, use_card(CardKind::Kill, 3)).unwrap();
    record_action(&mut state, 1, use_card(CardKind::WitchKiller, 3)).unwrap();

    let result = advance(&mut state).unwrap();

    assert_eq!(outcome_of(&state, 1), ActionOutcome::Killed { target: 3 });
    assert_eq!(outcome_of(&state, 2), ActionOutcome::Missed { target: 3 });
    assert_eq!(state.death_log.len(), 1, "no double-kill");
    assert!(!state.players[&2].is_witch(), "a miss earns no witchhood");
    assert_eq!(result.phase, GamePhase::Morning);
}

/// Scenario D: the imprisoned player's night action is dropped silently;
/// the votes that imprisoned them stay on the record.
#[test]
fn imprisoned_player_action_is_dropped_silently() {
    let mut state = make_game_state(
        &[&[], &[CardKind::Kill], &[], &[]],
        StateArgs {
            phase: GamePhase::Voting,
            ..Default::default()
        },
    );

    record_vote(&mut state, 1, 2).unwrap();
    record_vote(&mut state, 3, 2).unwrap();
    record_vote(&mut state, 4, 2).unwrap();

    let voting = advance(&mut state).unwrap();
    assert_eq!(voting.phase, GamePhase::Night);
    assert_eq!(state.imprisoned, Some(2));

    // The submission is accepted: no error reaches the imprisoned player.
    record_action(&mut state, 2, use_card(CardKind::Kill, 1)).unwrap();

    advance(&mut state).unwrap();
    assert_eq!(outcome_of(&state, 2), ActionOutcome::Ignored);
    assert!(state.players[&1].is_alive());
    assert!(
        state.players[&2].hand.iter().any(|c| c.kind == CardKind::Kill),
        "the voided action consumed nothing"
    );

    let tally = &state.vote_history[0];
    assert_eq!(tally.imprisoned, Some(2));
    assert_eq!(tally.votes.get(&2), Some(&vec![1, 3, 4]));
}
