//! Ballots and the majority-vote correctness resolver.

use std::collections::BTreeMap;

use nameit_protocol::{Ballot, Category, GamePhase, Patch, PlayerName, Room};

use crate::RuleError;

/// Accepts one voter's ballot for the round under review.
///
/// Ballots are keyed by voter, so a voter's latest submission fully
/// replaces their previous one. Nothing here stops a voter judging
/// their own answers — whether to offer that in the first place is the
/// caller's policy; a self-vote is simply counted like any other.
///
/// # Errors
/// - [`RuleError::WrongPhase`] unless the room is in `Review`
/// - [`RuleError::NotInRoom`] if the voter is not a member
pub fn submit(room: &Room, voter: &PlayerName, ballot: &Ballot) -> Result<Vec<Patch>, RuleError> {
    if room.phase != GamePhase::Review {
        return Err(RuleError::WrongPhase {
            expected: GamePhase::Review,
            actual: room.phase,
        });
    }
    if !room.contains_player(voter) {
        return Err(RuleError::NotInRoom(voter.clone(), room.code.clone()));
    }

    Ok(vec![Patch::Votes(voter.clone(), ballot.clone())])
}

/// Resolves one (player, category) answer to a correctness verdict.
///
/// An answer is correct when a strict majority of the votes cast on it
/// say so — a tie is incorrect. An answer nobody voted on is correct:
/// the permissive default keeps unreviewed answers from being silently
/// thrown away. This is deliberate policy, not an oversight.
pub fn resolve(
    votes: &BTreeMap<PlayerName, Ballot>,
    target: &PlayerName,
    category: Category,
) -> bool {
    let mut total = 0u32;
    let mut correct = 0u32;

    for ballot in votes.values() {
        if let Some(judgment) = ballot.judgment(target, category) {
            total += 1;
            if judgment {
                correct += 1;
            }
        }
    }

    total == 0 || correct * 2 > total
}

/// Returns `true` once every current player has a ballot on file.
pub fn all_voted(room: &Room) -> bool {
    room.players.iter().all(|p| room.votes.contains_key(p))
}

// =========================================================================
// Tests
// =========================================================================
