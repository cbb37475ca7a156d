//! Vote recording and deterministic tallying.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::player::PlayerId;
use crate::domain::state::{GamePhase, GameState};
use crate::errors::domain::{GameError, NotFoundKind, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: PlayerId,
    pub target: PlayerId,
}

/// Per-round tally snapshot. Computed once when the Voting phase closes and
/// appended to `vote_history`; immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResult {
    pub round: u32,
    /// Voters per target, in vote-buffer order.
    pub votes: BTreeMap<PlayerId, Vec<PlayerId>>,
    pub vote_counts: BTreeMap<PlayerId, u32>,
    pub imprisoned: Option<PlayerId>,
    pub is_tie: bool,
}

/// Tally the vote buffer. Pure: identical buffers yield identical results.
///
/// The strict-maximum target is imprisoned. Two or more targets tied at a
/// positive maximum imprison no one, as does an empty buffer.
pub fn calculate_vote_result(round: u32, votes: &[Vote]) -> VoteResult {
    let mut by_target: BTreeMap<PlayerId, Vec<PlayerId>> = BTreeMap::new();
    for vote in votes {
        by_target.entry(vote.target).or_default().push(vote.voter);
    }

    let vote_counts: BTreeMap<PlayerId, u32> = by_target
        .iter()
        .map(|(&target, voters)| (target, voters.len() as u32))
        .collect();

    let max = vote_counts.values().copied().max().unwrap_or(0);
    let leaders: Vec<PlayerId> = vote_counts
        .iter()
        .filter(|(_, &count)| count == max)
        .map(|(&target, _)| target)
        .collect();

    let (imprisoned, is_tie) = if max == 0 {
        (None, true)
    } else if leaders.len() == 1 {
        (Some(leaders[0]), false)
    } else {
        (None, true)
    };

    VoteResult {
        round,
        votes: by_target,
        vote_counts,
        imprisoned,
        is_tie,
    }
}

/// Record a vote into the current round's buffer, last-write-wins.
///
/// A voter's later vote replaces their earlier one; this is not an error.
pub fn record_vote(
    state: &mut GameState,
    voter: PlayerId,
    target: PlayerId,
) -> Result<(), GameError> {
    if state.phase != GamePhase::Voting {
        return Err(GameError::validation(
            ValidationKind::InvalidPhase,
            "votes are only accepted during the voting phase",
        ));
    }

    let voter_player = state
        .players
        .get(&voter)
        .ok_or_else(|| GameError::not_found(NotFoundKind::Player, format!("voter {voter}")))?;
    if !voter_player.is_alive() {
        return Err(GameError::validation(
            ValidationKind::PlayerAlreadyDead,
            "dead players cannot vote",
        ));
    }

    let target_player = state
        .players
        .get(&target)
        .ok_or_else(|| GameError::not_found(NotFoundKind::Player, format!("target {target}")))?;
    if !target_player.is_alive() {
        return Err(GameError::validation(
            ValidationKind::InvalidTarget,
            "cannot vote for a dead player",
        ));
    }

    state.current_votes.retain(|v| v.voter != voter);
    state.current_votes.push(Vote { voter, target });
    Ok(())
}
