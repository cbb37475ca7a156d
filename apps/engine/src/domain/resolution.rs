//! The deterministic night resolution pass.
//!
//! One uninterruptible pass per round: actions resolve in descending card
//! priority (submission order breaks ties), staleness degrades to recorded
//! outcomes, and the pass always completes for every submitted action.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::actions::{ActionKind, ActionOutcome, ActionRecord};
use crate::domain::cards::{Card, CardKind};
use crate::domain::deck::distribute_dropped_cards;
use crate::domain::events::GameEvent;
use crate::domain::player::{DeathCause, PlayerId};
use crate::domain::seeds::derive_resolution_seed;
use crate::domain::state::{DeathRecord, GameState};

fn action_priority(kind: ActionKind) -> u8 {
    match kind {
        ActionKind::UseCard { card, .. } => card.priority(),
        ActionKind::Pass => 0,
    }
}

/// Resolve the current round's submitted actions, then apply witch decay
/// and replenish hands. Does not advance the phase or evaluate the win
/// condition; the phase machine owns both.
pub fn resolve_night(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let round = state.round;
    let mut rng = StdRng::seed_from_u64(derive_resolution_seed(state.rng_seed, round));

    // Detect always reads hands as they stood before any action resolved.
    let hand_snapshot: BTreeMap<PlayerId, Vec<CardKind>> = state
        .players
        .iter()
        .map(|(&id, p)| (id, p.hand.iter().map(|c| c.kind).collect()))
        .collect();

    activate_barriers(state);

    let mut ordered: Vec<(PlayerId, ActionKind, u64)> = state
        .current_actions
        .iter()
        .map(|(&pid, action)| (pid, action.kind, action.seq))
        .collect();
    ordered.sort_by_key(|&(_, kind, seq)| (Reverse(action_priority(kind)), seq));

    for (actor_id, kind, _) in ordered {
        let outcome = resolve_action(state, actor_id, kind, &hand_snapshot, &mut rng, events);
        state.action_history.push(ActionRecord {
            round,
            player_id: actor_id,
            kind,
            outcome,
        });
        if let ActionKind::UseCard { card, target } = kind {
            if outcome != ActionOutcome::Ignored {
                events.push(GameEvent::CardUsed {
                    player_id: actor_id,
                    card,
                    target,
                    outcome,
                });
            }
        }
    }

    apply_witch_decay(state, &mut rng, events);
    replenish_hands(state, &mut rng, events);
}

/// Raise barriers before any attack resolves.
///
/// A barrier action's effect must precede the night's attacks for the card
/// to block anything; its outcome is still recorded at its own priority
/// slot in the sorted pass.
fn activate_barriers(state: &mut GameState) {
    let raisers: Vec<PlayerId> = state
        .current_actions
        .iter()
        .filter(|(_, action)| {
            matches!(
                action.kind,
                ActionKind::UseCard {
                    card: CardKind::Barrier,
                    ..
                }
            )
        })
        .map(|(&pid, _)| pid)
        .filter(|&pid| {
            let p = &state.players[&pid];
            p.is_alive() && !state.is_imprisoned(pid)
        })
        .collect();

    for pid in raisers {
        if let Some(player) = state.players.get_mut(&pid) {
            let source = player
                .hand
                .iter()
                .find(|c| c.kind == CardKind::Barrier)
                .map(|c| c.id);
            player.has_barrier = true;
            player.barrier_source = source;
        }
    }
}

fn resolve_action(
    state: &mut GameState,
    actor_id: PlayerId,
    kind: ActionKind,
    hand_snapshot: &BTreeMap<PlayerId, Vec<CardKind>>,
    rng: &mut StdRng,
    events: &mut Vec<GameEvent>,
) -> ActionOutcome {
    let actor_alive = state
        .players
        .get(&actor_id)
        .map(|p| p.is_alive())
        .unwrap_or(false);
    if !actor_alive || state.is_imprisoned(actor_id) {
        return ActionOutcome::Ignored;
    }

    let ActionKind::UseCard { card, target } = kind else {
        return ActionOutcome::Passed;
    };

    match card {
        CardKind::WitchKiller | CardKind::Kill => {
            let Some(target_id) = target else {
                debug_assert!(false, "attack recorded without a target");
                return ActionOutcome::Ignored;
            };
            resolve_attack(state, actor_id, card, target_id, rng, events)
        }
        CardKind::Detect => {
            let Some(target_id) = target else {
                debug_assert!(false, "detect recorded without a target");
                return ActionOutcome::Ignored;
            };
            consume_card(state, actor_id, CardKind::Detect);
            let snapshot = hand_snapshot.get(&target_id);
            let hand_size = snapshot.map(Vec::len).unwrap_or(0);
            let revealed = snapshot.and_then(|hand| hand.choose(rng)).copied();
            ActionOutcome::Revealed {
                target: target_id,
                hand_size,
                card: revealed,
            }
        }
        CardKind::Barrier => {
            consume_card(state, actor_id, CardKind::Barrier);
            ActionOutcome::Shielded
        }
        CardKind::Check => {
            let Some(target_id) = target else {
                debug_assert!(false, "check recorded without a target");
                return ActionOutcome::Ignored;
            };
            consume_card(state, actor_id, CardKind::Check);
            let was_witch_killer = state
                .players
                .get(&target_id)
                .map(|p| p.death_cause == Some(DeathCause::WitchKiller))
                .unwrap_or(false);
            ActionOutcome::Checked {
                target: target_id,
                was_witch_killer,
            }
        }
    }
}

fn resolve_attack(
    state: &mut GameState,
    actor_id: PlayerId,
    card: CardKind,
    target_id: PlayerId,
    rng: &mut StdRng,
    events: &mut Vec<GameEvent>,
) -> ActionOutcome {
    let round = state.round;

    // Quota first: exhaustion denies the action with no other mutation.
    match card {
        CardKind::WitchKiller => {
            if state.attack_quota.witch_killer_used {
                return ActionOutcome::Denied;
            }
            state.attack_quota.witch_killer_used = true;
        }
        CardKind::Kill => {
            let allowed = if state.attack_quota.witch_killer_used {
                state.config.kill_magic_with_witch_killer
            } else {
                state.config.kill_magic_per_night
            };
            if state.attack_quota.kill_magic_used >= allowed {
                return ActionOutcome::Denied;
            }
            state.attack_quota.kill_magic_used += 1;
        }
        _ => unreachable!("resolve_attack only handles attack kinds"),
    }

    let target_alive = state
        .players
        .get(&target_id)
        .map(|p| p.is_alive())
        .unwrap_or(false);
    if !target_alive {
        // Valid when submitted; the target died earlier in this pass.
        consume_card(state, actor_id, card);
        return ActionOutcome::Missed { target: target_id };
    }

    let target_shielded = state.players[&target_id].has_barrier;
    if target_shielded {
        if let Some(target) = state.players.get_mut(&target_id) {
            target.consume_barrier();
        }
        consume_card(state, actor_id, card);
        return ActionOutcome::Blocked { target: target_id };
    }

    let cause = match card {
        CardKind::WitchKiller => DeathCause::WitchKiller,
        _ => DeathCause::KillMagic,
    };
    if let Some(target) = state.players.get_mut(&target_id) {
        target.mark_killed(round, cause, Some(actor_id));
    }

    if let Some(actor) = state.players.get_mut(&actor_id) {
        if actor.transform_to_witch() {
            events.push(GameEvent::WitchTransformed {
                player_id: actor_id,
            });
        }
        actor.record_kill(round);
    }
    consume_card(state, actor_id, card);

    redistribute_drops(state, actor_id, target_id, cause, rng);
    ActionOutcome::Killed { target: target_id }
}

/// Move the victim's dropped hand to the survivors and append the
/// authoritative death record.
fn redistribute_drops(
    state: &mut GameState,
    killer_id: PlayerId,
    victim_id: PlayerId,
    cause: DeathCause,
    rng: &mut StdRng,
) {
    let round = state.round;
    let mut dropped = match state.players.get_mut(&victim_id) {
        Some(victim) => victim.take_hand(),
        None => Vec::new(),
    };
    let dropped_record: Vec<Card> = dropped.clone();
    let mut receivers: BTreeMap<PlayerId, Vec<Card>> = BTreeMap::new();

    // A Witch-Killer dropped by a kill-magic victim transfers to one living
    // player uniformly at random rather than entering the round-robin.
    if cause == DeathCause::KillMagic {
        if let Some(pos) = dropped.iter().position(|c| c.kind == CardKind::WitchKiller) {
            let witch_killer = dropped.remove(pos);
            let alive = state.alive_player_ids();
            match alive.choose(rng).copied() {
                Some(receiver_id) => {
                    receivers
                        .entry(receiver_id)
                        .or_default()
                        .push(witch_killer.clone());
                    if let Some(receiver) = state.players.get_mut(&receiver_id) {
                        receiver.hand.push(witch_killer);
                    }
                }
                None => state.deck.discard(witch_killer),
            }
        }
    }

    let others: Vec<PlayerId> = state
        .alive_player_ids()
        .into_iter()
        .filter(|&id| id != killer_id)
        .collect();
    let distributed = distribute_dropped_cards(dropped, killer_id, &others, rng);
    for (receiver_id, cards) in distributed {
        receivers
            .entry(receiver_id)
            .or_default()
            .extend(cards.iter().cloned());
        if let Some(receiver) = state.players.get_mut(&receiver_id) {
            receiver.hand.extend(cards);
        }
    }

    state.death_log.push(DeathRecord {
        round,
        player_id: victim_id,
        cause,
        killer_id: Some(killer_id),
        dropped_cards: dropped_record,
        card_receivers: receivers,
    });
}

/// Move the actor's spent card to the discard pile, if it is consumable.
fn consume_card(state: &mut GameState, actor_id: PlayerId, card: CardKind) {
    if !card.consumable() {
        return;
    }
    let taken = state
        .players
        .get_mut(&actor_id)
        .and_then(|p| p.take_card(card));
    match taken {
        Some(spent) => state.deck.discard(spent),
        None => debug_assert!(false, "consumed card missing from actor's hand"),
    }
}

/// Witches that failed to kill this round tick toward decay; those at the
/// threshold become wrecks, shedding their hand to the discard pile and
/// passing a held Witch-Killer to a random living player.
fn apply_witch_decay(state: &mut GameState, rng: &mut StdRng, events: &mut Vec<GameEvent>) {
    let round = state.round;
    let threshold = state.config.witch_decay_nights;

    for pid in state.player_order.clone() {
        let Some(player) = state.players.get_mut(&pid) else {
            continue;
        };
        if !player.is_witch() || player.last_kill_round == Some(round) {
            continue;
        }
        player.consecutive_no_kill_rounds += 1;
        if player.consecutive_no_kill_rounds < threshold {
            continue;
        }

        let witch_killer = player.transform_to_wreck(round);
        let rest = player.take_hand();

        let mut dropped_record: Vec<Card> = Vec::new();
        let mut receivers: BTreeMap<PlayerId, Vec<Card>> = BTreeMap::new();

        if let Some(card) = witch_killer {
            dropped_record.push(card.clone());
            let alive = state.alive_player_ids();
            match alive.choose(rng).copied() {
                Some(receiver_id) => {
                    receivers
                        .entry(receiver_id)
                        .or_default()
                        .push(card.clone());
                    if let Some(receiver) = state.players.get_mut(&receiver_id) {
                        receiver.hand.push(card);
                    }
                }
                None => state.deck.discard(card),
            }
        }
        dropped_record.extend(rest.iter().cloned());
        for card in rest {
            state.deck.discard(card);
        }

        state.death_log.push(DeathRecord {
            round,
            player_id: pid,
            cause: DeathCause::Wreck,
            killer_id: None,
            dropped_cards: dropped_record,
            card_receivers: receivers,
        });
        events.push(GameEvent::WreckTransformed { player_id: pid });
    }
}

/// Every living player draws back up to the hand limit.
fn replenish_hands(state: &mut GameState, rng: &mut StdRng, events: &mut Vec<GameEvent>) {
    let max_hand_size = state.config.max_hand_size;
    for pid in state.alive_player_ids() {
        let need = {
            let Some(player) = state.players.get(&pid) else {
                continue;
            };
            max_hand_size.saturating_sub(player.hand.len())
        };
        if need == 0 {
            continue;
        }
        let drawn = state.deck.draw(need, rng);
        let count = drawn.len();
        if count == 0 {
            continue;
        }
        if let Some(player) = state.players.get_mut(&pid) {
            player.hand.extend(drawn);
        }
        events.push(GameEvent::CardDrawn {
            player_id: pid,
            count,
        });
    }
}
