//! Room lifecycle: creation, membership, and phase transitions.
//!
//! Every operation here validates a room snapshot and emits the patch
//! list that performs it. The phase gate is checked against the
//! snapshot; the store re-checks it at commit time (the phase guard),
//! so a transition that loses a race simply fails instead of applying
//! twice.

use std::collections::{BTreeMap, BTreeSet};

use nameit_protocol::{GamePhase, Patch, PlayerName, Room, RoomCode};
use rand::Rng;

use crate::{CODE_LEN, GameConfig, MAX_NAME_LEN, RuleError, letters, scoring};

/// Room-code alphabet: uppercase letters and digits.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// The result of the Results transition: the patches to commit and the
/// per-player round scores they fold in (for display and logging).
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub patches: Vec<Patch>,
    pub round_scores: BTreeMap<PlayerName, u32>,
}

// ---------------------------------------------------------------------------
// Validation and code generation
// ---------------------------------------------------------------------------

/// Checks a display name: non-blank, at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), RuleError> {
    if name.trim().is_empty() || name.chars().count() > MAX_NAME_LEN {
        return Err(RuleError::InvalidName);
    }
    Ok(())
}

/// Checks a room code: exactly [`CODE_LEN`] uppercase letters or digits.
pub fn validate_code(code: &str) -> Result<(), RuleError> {
    let valid = code.chars().count() == CODE_LEN
        && code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit());
    if !valid {
        return Err(RuleError::InvalidCode);
    }
    Ok(())
}

/// Generates a random room code.
///
/// Uniqueness is the store's concern (`create` fails on collision);
/// with 36^6 possible codes the caller just retries.
pub fn generate_code() -> RoomCode {
    let mut rng = rand::rng();
    let code: String = (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    RoomCode(code)
}

// ---------------------------------------------------------------------------
// Creation and membership
// ---------------------------------------------------------------------------

/// Builds the initial room document for a new game.
///
/// The creator becomes host and the only player, with a zero score.
pub fn create(code: RoomCode, host_name: &str) -> Result<Room, RuleError> {
    validate_name(host_name)?;
    validate_code(code.as_str())?;

    let host = PlayerName::from(host_name);
    Ok(Room {
        code,
        host: host.clone(),
        players: vec![host.clone()],
        phase: GamePhase::Waiting,
        current_round: 0,
        current_letter: None,
        used_letters: BTreeSet::new(),
        answers: BTreeMap::new(),
        votes: BTreeMap::new(),
        scores: BTreeMap::from([(host, 0)]),
        round_started_at: None,
        scored_round: 0,
    })
}

/// Admits a player to a waiting room.
///
/// # Errors
/// - [`RuleError::WrongPhase`] unless the room is in `Waiting`
/// - [`RuleError::DuplicateName`] on an exact, case-sensitive name match
/// - [`RuleError::RoomFull`] at the configured player cap
pub fn join(room: &Room, name: &str, config: &GameConfig) -> Result<Vec<Patch>, RuleError> {
    validate_name(name)?;
    expect_phase(room, GamePhase::Waiting)?;

    let player = PlayerName::from(name);
    if room.contains_player(&player) {
        return Err(RuleError::DuplicateName(player));
    }
    if room.player_count() >= config.max_players {
        return Err(RuleError::RoomFull(room.code.clone()));
    }

    Ok(vec![
        Patch::AddPlayer(player.clone()),
        Patch::InitScore(player),
    ])
}

/// Removes a player, reassigning the host role if needed.
///
/// Valid in any phase and idempotent: leaving a room you are not in is
/// a no-op (empty patch list). When the departing player was host and
/// others remain, the next player in join order inherits the role. The
/// last player leaving abandons the room where it stands.
pub fn leave(room: &Room, name: &PlayerName) -> Vec<Patch> {
    if !room.contains_player(name) {
        return Vec::new();
    }

    let mut patches = vec![
        Patch::RemovePlayer(name.clone()),
        Patch::DropScore(name.clone()),
    ];

    if room.is_host(name) {
        if let Some(next) = room.players.iter().find(|p| *p != name) {
            patches.push(Patch::Host(next.clone()));
        }
    }

    patches
}

// ---------------------------------------------------------------------------
// Phase transitions
// ---------------------------------------------------------------------------

/// Starts a round: draws a letter and opens answer collection.
///
/// `now_ms` is the caller's clock (unix millis); the rules layer never
/// reads the wall clock itself. The first round bumps the counter from
/// 0 to 1; later rounds were already bumped by [`next_round`].
///
/// # Errors
/// - [`RuleError::InsufficientPlayers`] below the minimum, in any phase
/// - [`RuleError::WrongPhase`] unless the room is in `Waiting`
/// - [`RuleError::NotHost`] unless `acting` holds the host role
/// - [`RuleError::LettersExhausted`] when the pool has run dry
pub fn start_round(
    room: &Room,
    acting: &PlayerName,
    config: &GameConfig,
    now_ms: u64,
) -> Result<Vec<Patch>, RuleError> {
    if room.player_count() < config.min_players {
        return Err(RuleError::InsufficientPlayers {
            need: config.min_players,
            have: room.player_count(),
        });
    }
    expect_phase(room, GamePhase::Waiting)?;
    if !room.is_host(acting) {
        return Err(RuleError::NotHost(acting.clone()));
    }

    let letter = letters::draw(config, &room.used_letters)?;

    let mut patches = vec![
        Patch::Phase(GamePhase::Playing),
        Patch::Letter(Some(letter)),
        Patch::MarkLetterUsed(letter),
        Patch::ClearAnswers,
        Patch::ClearVotes,
        Patch::RoundStartedAt(Some(now_ms)),
    ];
    if room.current_round == 0 {
        patches.push(Patch::BumpRound);
    }
    Ok(patches)
}

/// Freezes answers and opens voting.
///
/// The trigger — every player submitted, or the round timer expired —
/// is the caller's business; the core only exposes the transition. The
/// letter is cleared here: it is live only while `Playing`.
pub fn advance_to_review(room: &Room) -> Result<Vec<Patch>, RuleError> {
    expect_phase(room, GamePhase::Playing)?;
    Ok(vec![
        Patch::Phase(GamePhase::Review),
        Patch::Letter(None),
    ])
}

/// Resolves the round: folds round scores into the totals.
///
/// The emitted patches carry the `ScoredRound` marker, and the store's
/// phase guard on `Review` makes the transition single-shot — a second
/// attempt for the same round finds the room in `Results` and fails.
pub fn advance_to_results(room: &Room, config: &GameConfig) -> Result<RoundOutcome, RuleError> {
    expect_phase(room, GamePhase::Review)?;

    let round_scores = scoring::score_round(room, config);
    let mut patches: Vec<Patch> = round_scores
        .iter()
        .map(|(player, points)| Patch::AddScore(player.clone(), *points))
        .collect();
    patches.push(Patch::ScoredRound(room.current_round));
    patches.push(Patch::Phase(GamePhase::Results));

    Ok(RoundOutcome {
        patches,
        round_scores,
    })
}

/// Leaves the results screen: either back to the lobby for the next
/// round, or to `Finished` when the configured round cap is reached.
pub fn next_round(
    room: &Room,
    acting: &PlayerName,
    config: &GameConfig,
) -> Result<Vec<Patch>, RuleError> {
    expect_phase(room, GamePhase::Results)?;
    if !room.is_host(acting) {
        return Err(RuleError::NotHost(acting.clone()));
    }

    if let Some(max) = config.max_rounds {
        if room.current_round >= max {
            return Ok(vec![
                Patch::Phase(GamePhase::Finished),
                Patch::RoundStartedAt(None),
            ]);
        }
    }

    Ok(vec![
        Patch::ClearAnswers,
        Patch::ClearVotes,
        Patch::BumpRound,
        Patch::Phase(GamePhase::Waiting),
        Patch::RoundStartedAt(None),
    ])
}

fn expect_phase(room: &Room, expected: GamePhase) -> Result<(), RuleError> {
    if room.phase != expected {
        return Err(RuleError::WrongPhase {
            expected,
            actual: room.phase,
        });
    }
    Ok(())
}

// =========================================================================
// Tests
// =========================================================================
