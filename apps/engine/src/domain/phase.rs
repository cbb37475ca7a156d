//! The phase state machine.
//!
//! Canonical order: `Lobby → Morning → Day → Voting → Night → Resolution →
//! Morning (next round) | Ended`. Each `advance` call performs exactly one
//! boundary; advancing out of Night runs the whole resolution pass before
//! settling on the next observable phase.

use serde::Serialize;

use crate::domain::events::GameEvent;
use crate::domain::resolution::resolve_night;
use crate::domain::state::{GamePhase, GameState};
use crate::domain::votes::calculate_vote_result;
use crate::domain::win::{self, GameEndResult};
use crate::errors::domain::{GameError, ValidationKind};

/// What one phase boundary produced, in event order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseResult {
    pub phase: GamePhase,
    pub round: u32,
    pub events: Vec<GameEvent>,
    pub ended: Option<GameEndResult>,
}

/// Advance the game one phase boundary.
pub fn advance(state: &mut GameState) -> Result<PhaseResult, GameError> {
    let mut events = Vec::new();
    let ended = match state.phase {
        GamePhase::Lobby => {
            setup(state, &mut events);
            enter_morning(state, &mut events)
        }
        GamePhase::Morning => {
            change_phase(state, &mut events, GamePhase::Day);
            None
        }
        GamePhase::Day => {
            change_phase(state, &mut events, GamePhase::Voting);
            None
        }
        GamePhase::Voting => {
            close_voting(state, &mut events);
            enter_night(state, &mut events);
            None
        }
        GamePhase::Night => {
            change_phase(state, &mut events, GamePhase::Resolution);
            resolve_night(state, &mut events);
            match win::evaluate(state) {
                Some(result) => Some(end_game(state, &mut events, result)),
                None => {
                    state.next_round();
                    enter_morning(state, &mut events)
                }
            }
        }
        GamePhase::Resolution => {
            return Err(GameError::validation(
                ValidationKind::InvalidPhase,
                "resolution is an uninterruptible pass",
            ));
        }
        GamePhase::Ended => {
            return Err(GameError::validation(
                ValidationKind::InvalidPhase,
                "game already ended",
            ));
        }
    };

    Ok(PhaseResult {
        phase: state.phase,
        round: state.round,
        events,
        ended,
    })
}

fn change_phase(state: &mut GameState, events: &mut Vec<GameEvent>, to: GamePhase) {
    let from = state.phase;
    state.set_phase(to);
    events.push(GameEvent::PhaseChanged {
        from,
        to,
        round: state.round,
    });
}

/// Leave the lobby: the game starts at round 1 and anyone dealt the
/// Witch-Killer starts as a witch.
fn setup(state: &mut GameState, events: &mut Vec<GameEvent>) {
    state.round = 1;
    for pid in state.player_order.clone() {
        let Some(player) = state.players.get_mut(&pid) else {
            continue;
        };
        if player.holds_witch_killer() && player.transform_to_witch() {
            events.push(GameEvent::WitchTransformed { player_id: pid });
        }
    }
}

/// Enter Morning: publish death notices for the previous round (cause
/// withheld), then evaluate the win condition.
fn enter_morning(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<GameEndResult> {
    change_phase(state, events, GamePhase::Morning);

    let previous_round = state.round.saturating_sub(1);
    for record in &state.death_log {
        if record.round == previous_round {
            events.push(GameEvent::PlayerDied {
                player_id: record.player_id,
                round: record.round,
            });
        }
    }

    win::evaluate(state).map(|result| end_game(state, events, result))
}

/// Close the Voting phase: tally once, publish the outcome, and remember
/// who is imprisoned before Night begins.
fn close_voting(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for vote in &state.current_votes {
        events.push(GameEvent::VoteCast {
            voter: vote.voter,
            target: vote.target,
        });
    }
    let result = calculate_vote_result(state.round, &state.current_votes);
    state.imprisoned = result.imprisoned;
    events.push(GameEvent::VoteResolved(result.clone()));
    state.vote_history.push(result);
}

/// Enter Night: barriers and the attack quota reset for everyone.
fn enter_night(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for player in state.players.values_mut() {
        player.clear_barrier();
    }
    state.attack_quota.reset();
    change_phase(state, events, GamePhase::Night);
}

fn end_game(
    state: &mut GameState,
    events: &mut Vec<GameEvent>,
    result: GameEndResult,
) -> GameEndResult {
    change_phase(state, events, GamePhase::Ended);
    events.push(GameEvent::GameEnded(result.clone()));
    result
}
