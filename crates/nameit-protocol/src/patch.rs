//! Atomic patch operations on a room document.
//!
//! Every state change in the system is expressed as a list of these
//! patches, applied atomically by the store. Each variant maps onto a
//! primitive a synchronized document store supports natively: a field
//! assignment, a set insert/remove, a numeric increment, or a write to
//! one per-player sub-key. Nothing here requires reading a whole map
//! back first, which is what keeps concurrent players from clobbering
//! each other's writes.

use crate::{AnswerSheet, Ballot, GamePhase, Letter, PlayerName};

/// One atomic field operation on a [`Room`](crate::Room).
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    /// Set the lifecycle phase.
    Phase(GamePhase),

    /// Set or clear the live round letter.
    Letter(Option<Letter>),

    /// Insert a letter into the used set (set-union, idempotent).
    MarkLetterUsed(Letter),

    /// Append a player if absent (set-union, idempotent).
    AddPlayer(PlayerName),

    /// Remove a player if present (set-removal, idempotent).
    RemovePlayer(PlayerName),

    /// Reassign host privileges.
    Host(PlayerName),

    /// Ensure a zero score entry exists for a player.
    InitScore(PlayerName),

    /// Delete a player's score entry.
    DropScore(PlayerName),

    /// Numeric increment of one player's cumulative score.
    AddScore(PlayerName, u32),

    /// Replace one player's answer sheet (per-player sub-key write).
    Answers(PlayerName, AnswerSheet),

    /// Replace one voter's ballot (per-voter sub-key write).
    Votes(PlayerName, Ballot),

    /// Drop all answer sheets for the round.
    ClearAnswers,

    /// Drop all ballots for the round.
    ClearVotes,

    /// Increment the round counter.
    BumpRound,

    /// Set or clear the round start stamp (unix millis).
    RoundStartedAt(Option<u64>),

    /// Record the round whose scores were folded in.
    ScoredRound(u32),
}
