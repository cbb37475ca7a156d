//! Night actions: submission validation and resolution outcomes.

use serde::{Deserialize, Serialize};

use crate::domain::cards::CardKind;
use crate::domain::player::PlayerId;
use crate::domain::state::{GamePhase, GameState};
use crate::errors::domain::{GameError, NotFoundKind, ValidationKind};

/// What a player wants to do with their night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    UseCard {
        card: CardKind,
        target: Option<PlayerId>,
    },
    Pass,
}

/// A recorded night action. `seq` preserves submission order so the
/// priority sort can break ties deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAction {
    pub kind: ActionKind,
    pub seq: u64,
}

/// How a recorded action resolved. Resolution-time staleness lands here as
/// a structured variant, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Attack landed; the target died.
    Killed { target: PlayerId },
    /// Attack hit an active barrier, which absorbed it.
    Blocked { target: PlayerId },
    /// Attack reached a target that was already dead.
    Missed { target: PlayerId },
    /// The attack quota was exhausted when this action's turn came.
    Denied,
    /// Actor was dead or imprisoned when the pass reached this action.
    Ignored,
    /// Barrier raised.
    Shielded,
    /// Detect result, visible to the actor only.
    Revealed {
        target: PlayerId,
        hand_size: usize,
        card: Option<CardKind>,
    },
    /// Inquest result, visible to the actor only.
    Checked {
        target: PlayerId,
        was_witch_killer: bool,
    },
    Passed,
}

/// Append-only per-round ledger entry pairing an action with its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    pub round: u32,
    pub player_id: PlayerId,
    pub kind: ActionKind,
    pub outcome: ActionOutcome,
}

/// Which kinds must name a target.
fn needs_target(kind: CardKind) -> bool {
    matches!(
        kind,
        CardKind::WitchKiller | CardKind::Kill | CardKind::Detect | CardKind::Check
    )
}

/// Record a night action, last-write-wins per player.
///
/// All rule violations visible at submission time are rejected here with a
/// typed error and no state change. An imprisoned player's submission is
/// accepted: imprisonment silently voids the action at resolution instead.
pub fn record_action(
    state: &mut GameState,
    player_id: PlayerId,
    kind: ActionKind,
) -> Result<(), GameError> {
    if state.phase != GamePhase::Night {
        return Err(GameError::validation(
            ValidationKind::InvalidPhase,
            "actions are only accepted during the night phase",
        ));
    }

    let actor = state
        .players
        .get(&player_id)
        .ok_or_else(|| GameError::not_found(NotFoundKind::Player, format!("actor {player_id}")))?;
    if !actor.is_alive() {
        return Err(GameError::validation(
            ValidationKind::PlayerAlreadyDead,
            "dead players cannot act",
        ));
    }

    if let ActionKind::UseCard { card, target } = kind {
        validate_card_use(state, player_id, card, target)?;
    }

    let seq = state.next_action_seq();
    state
        .current_actions
        .insert(player_id, PlayerAction { kind, seq });
    Ok(())
}

fn validate_card_use(
    state: &GameState,
    player_id: PlayerId,
    card: CardKind,
    target: Option<PlayerId>,
) -> Result<(), GameError> {
    let actor = &state.players[&player_id];

    if card == CardKind::WitchKiller && !actor.holds_witch_killer() {
        return Err(GameError::validation(
            ValidationKind::NotWitchKillerHolder,
            "playing the Witch-Killer requires holding it",
        ));
    }
    if card != CardKind::WitchKiller && actor.holds_witch_killer() {
        return Err(GameError::validation(
            ValidationKind::WitchKillerOnly,
            "the Witch-Killer holder may play no other card",
        ));
    }
    if actor.card_position(card).is_none() {
        return Err(GameError::not_found(
            NotFoundKind::Card,
            format!("no {} in hand", card.name()),
        ));
    }

    match (needs_target(card), target) {
        (true, None) => {
            return Err(GameError::validation(
                ValidationKind::InvalidAction,
                format!("{} requires a target", card.name()),
            ));
        }
        (false, Some(_)) => {
            return Err(GameError::validation(
                ValidationKind::InvalidAction,
                format!("{} takes no target", card.name()),
            ));
        }
        _ => {}
    }

    if let Some(target_id) = target {
        if target_id == player_id {
            return Err(GameError::validation(
                ValidationKind::InvalidTarget,
                "cannot target yourself",
            ));
        }
        let target_player = state.players.get(&target_id).ok_or_else(|| {
            GameError::not_found(NotFoundKind::Player, format!("target {target_id}"))
        })?;

        match card {
            CardKind::WitchKiller | CardKind::Kill | CardKind::Detect => {
                if !target_player.is_alive() {
                    return Err(GameError::validation(
                        ValidationKind::InvalidTarget,
                        "target is already dead",
                    ));
                }
            }
            CardKind::Check => {
                if target_player.is_alive() {
                    return Err(GameError::validation(
                        ValidationKind::CardNotUsable,
                        "an inquest examines only the dead",
                    ));
                }
            }
            CardKind::Barrier => {}
        }
    }

    if card == CardKind::Kill {
        check_pending_quota(state, player_id)?;
    }
    Ok(())
}

/// Submission-time quota guard over the *pending* action buffer.
///
/// The resolution pass re-checks against actually-consumed quota, which can
/// still deny an accepted action after priority reordering.
fn check_pending_quota(state: &GameState, player_id: PlayerId) -> Result<(), GameError> {
    let mut pending_witch_killer = false;
    let mut pending_kills: u8 = 0;
    for (&pid, action) in &state.current_actions {
        if pid == player_id {
            // A resubmission replaces this player's earlier action.
            continue;
        }
        match action.kind {
            ActionKind::UseCard {
                card: CardKind::WitchKiller,
                ..
            } => pending_witch_killer = true,
            ActionKind::UseCard {
                card: CardKind::Kill,
                ..
            } => pending_kills += 1,
            _ => {}
        }
    }

    let allowed = if pending_witch_killer {
        state.config.kill_magic_with_witch_killer
    } else {
        state.config.kill_magic_per_night
    };
    if pending_kills >= allowed {
        return Err(GameError::validation(
            ValidationKind::AttackQuotaFull,
            format!("kill magic budget for this night ({allowed}) is already spoken for"),
        ));
    }
    Ok(())
}
