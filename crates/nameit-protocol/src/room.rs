//! The room aggregate: one document per room in the store.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{Category, GamePhase, Letter, Patch, PlayerName, RoomCode};

// ---------------------------------------------------------------------------
// AnswerSheet
// ---------------------------------------------------------------------------

/// One player's answers for the current round, keyed by category.
///
/// Values are stored already normalized. A missing key and an empty
/// string mean the same thing: no answer for that category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet(pub BTreeMap<Category, String>);

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the answer for one category, replacing any previous value.
    pub fn set(&mut self, category: Category, answer: impl Into<String>) {
        self.0.insert(category, answer.into());
    }

    pub fn get(&self, category: Category) -> Option<&str> {
        self.0.get(&category).map(String::as_str)
    }

    /// Returns `true` if the sheet has a non-empty answer for `category`.
    pub fn answered(&self, category: Category) -> bool {
        self.get(category).is_some_and(|a| !a.is_empty())
    }

    /// Returns `true` if no category has a non-empty answer.
    pub fn is_blank(&self) -> bool {
        Category::ALL.iter().all(|c| !self.answered(*c))
    }
}

// ---------------------------------------------------------------------------
// Ballot
// ---------------------------------------------------------------------------

/// One voter's judgments: target player → category → "is this correct".
///
/// A ballot only covers the answers the voter actually judged; pairs the
/// voter skipped simply aren't present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ballot(pub BTreeMap<PlayerName, BTreeMap<Category, bool>>);

impl Ballot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a judgment on one (target, category) answer.
    pub fn judge(&mut self, target: PlayerName, category: Category, correct: bool) {
        self.0.entry(target).or_default().insert(category, correct);
    }

    /// Returns the judgment on one (target, category) answer, if cast.
    pub fn judgment(&self, target: &PlayerName, category: Category) -> Option<bool> {
        self.0.get(target).and_then(|m| m.get(&category)).copied()
    }
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// The aggregate root: everything the store holds about one room.
///
/// Rooms are only ever mutated by applying [`Patch`] lists — the rules
/// layer validates a snapshot and emits patches, the store applies them
/// atomically. The serialized field names match the legacy store
/// documents (`gameState`, `usedLetters`, …), so a room round-trips
/// byte-compatibly through any JSON-document backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Immutable 6-character room code; also the document key.
    pub code: RoomCode,

    /// The player currently holding host privileges.
    pub host: PlayerName,

    /// Players in join order. Distinct, case-sensitive.
    pub players: Vec<PlayerName>,

    /// Current lifecycle phase.
    #[serde(rename = "gameState")]
    pub phase: GamePhase,

    /// 0 before the first round; `start_round` sets 1, `next_round`
    /// increments from there.
    pub current_round: u32,

    /// The live letter. `Some` iff `phase == Playing`.
    pub current_letter: Option<Letter>,

    /// Letters already drawn this game. Never shrinks.
    pub used_letters: BTreeSet<Letter>,

    /// Per-player answer sheets for the current round.
    pub answers: BTreeMap<PlayerName, AnswerSheet>,

    /// Per-voter ballots for the current round.
    pub votes: BTreeMap<PlayerName, Ballot>,

    /// Cumulative scores across all completed rounds.
    pub scores: BTreeMap<PlayerName, u32>,

    /// Unix-millis stamp of the last round start. The round timer itself
    /// is caller policy; the core just records when the round began.
    #[serde(rename = "roundStartTime")]
    pub round_started_at: Option<u64>,

    /// The last round whose scores were folded into `scores`. Guards the
    /// Results transition against double application.
    pub scored_round: u32,
}

impl Room {
    /// Returns `true` if `name` is currently in the room.
    pub fn contains_player(&self, name: &PlayerName) -> bool {
        self.players.iter().any(|p| p == name)
    }

    /// Returns `true` if `name` holds host privileges.
    pub fn is_host(&self, name: &PlayerName) -> bool {
        self.host == *name
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Applies one patch in place.
    ///
    /// Patches are deliberately total: applying one can never fail, so a
    /// store backend can commit a validated patch list without a second
    /// round of error handling. Set-adds and removals are idempotent.
    pub fn apply(&mut self, patch: Patch) {
        match patch {
            Patch::Phase(phase) => self.phase = phase,
            Patch::Letter(letter) => self.current_letter = letter,
            Patch::MarkLetterUsed(letter) => {
                self.used_letters.insert(letter);
            }
            Patch::AddPlayer(name) => {
                if !self.contains_player(&name) {
                    self.players.push(name);
                }
            }
            Patch::RemovePlayer(name) => {
                self.players.retain(|p| *p != name);
            }
            Patch::Host(name) => self.host = name,
            Patch::InitScore(name) => {
                self.scores.entry(name).or_insert(0);
            }
            Patch::DropScore(name) => {
                self.scores.remove(&name);
            }
            Patch::AddScore(name, points) => {
                *self.scores.entry(name).or_insert(0) += points;
            }
            Patch::Answers(player, sheet) => {
                self.answers.insert(player, sheet);
            }
            Patch::Votes(voter, ballot) => {
                self.votes.insert(voter, ballot);
            }
            Patch::ClearAnswers => self.answers.clear(),
            Patch::ClearVotes => self.votes.clear(),
            Patch::BumpRound => self.current_round += 1,
            Patch::RoundStartedAt(stamp) => self.round_started_at = stamp,
            Patch::ScoredRound(round) => self.scored_round = round,
        }
    }

    /// Applies a whole patch list in order.
    pub fn apply_all(&mut self, patches: impl IntoIterator<Item = Patch>) {
        for patch in patches {
            self.apply(patch);
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> Room {
        Room {
            code: RoomCode::from("ABC123"),
            host: PlayerName::from("Ana"),
            players: vec![PlayerName::from("Ana")],
            phase: GamePhase::Waiting,
            current_round: 0,
            current_letter: None,
            used_letters: BTreeSet::new(),
            answers: BTreeMap::new(),
            votes: BTreeMap::new(),
            scores: BTreeMap::from([(PlayerName::from("Ana"), 0)]),
            round_started_at: None,
            scored_round: 0,
        }
    }

    #[test]
    fn test_room_document_uses_legacy_field_names() {
        // The JSON shape is the store schema — these names are load-bearing.
        let json: serde_json::Value = serde_json::to_value(room()).unwrap();

        assert_eq!(json["code"], "ABC123");
        assert_eq!(json["gameState"], "waiting");
        assert_eq!(json["currentRound"], 0);
        assert!(json["currentLetter"].is_null());
        assert_eq!(json["usedLetters"], serde_json::json!([]));
        assert!(json["roundStartTime"].is_null());
        assert_eq!(json["scoredRound"], 0);
        assert_eq!(json["scores"]["Ana"], 0);
    }

    #[test]
    fn test_room_round_trips_through_json() {
        let mut r = room();
        r.phase = GamePhase::Playing;
        r.current_letter = Some(Letter('M'));
        r.used_letters.insert(Letter('M'));
        let mut sheet = AnswerSheet::new();
        sheet.set(Category::Person, "Mary");
        r.answers.insert(PlayerName::from("Ana"), sheet);

        let bytes = serde_json::to_vec(&r).unwrap();
        let decoded: Room = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(r, decoded);
    }

    #[test]
    fn test_apply_add_player_is_idempotent() {
        let mut r = room();
        r.apply(Patch::AddPlayer(PlayerName::from("Ben")));
        r.apply(Patch::AddPlayer(PlayerName::from("Ben")));
        assert_eq!(r.player_count(), 2);
    }

    #[test]
    fn test_apply_remove_player_keeps_join_order() {
        let mut r = room();
        r.apply(Patch::AddPlayer(PlayerName::from("Ben")));
        r.apply(Patch::AddPlayer(PlayerName::from("Cho")));
        r.apply(Patch::RemovePlayer(PlayerName::from("Ben")));
        assert_eq!(
            r.players,
            vec![PlayerName::from("Ana"), PlayerName::from("Cho")]
        );
    }

    #[test]
    fn test_apply_add_score_accumulates() {
        let mut r = room();
        r.apply(Patch::AddScore(PlayerName::from("Ana"), 5));
        r.apply(Patch::AddScore(PlayerName::from("Ana"), 10));
        assert_eq!(r.scores[&PlayerName::from("Ana")], 15);
    }

    #[test]
    fn test_apply_answers_replaces_previous_sheet() {
        let mut r = room();
        let mut first = AnswerSheet::new();
        first.set(Category::Person, "Mary");
        let mut second = AnswerSheet::new();
        second.set(Category::Animal, "Mole");

        r.apply(Patch::Answers(PlayerName::from("Ana"), first));
        r.apply(Patch::Answers(PlayerName::from("Ana"), second.clone()));

        assert_eq!(r.answers[&PlayerName::from("Ana")], second);
    }

    #[test]
    fn test_answer_sheet_blank_detection() {
        let mut sheet = AnswerSheet::new();
        assert!(sheet.is_blank());
        sheet.set(Category::Person, "");
        assert!(sheet.is_blank());
        sheet.set(Category::Animal, "Badger");
        assert!(!sheet.is_blank());
        assert!(sheet.answered(Category::Animal));
        assert!(!sheet.answered(Category::Person));
    }

    #[test]
    fn test_ballot_judgments_round_trip() {
        let mut ballot = Ballot::new();
        ballot.judge(PlayerName::from("Ben"), Category::Person, true);
        ballot.judge(PlayerName::from("Ben"), Category::Animal, false);

        assert_eq!(
            ballot.judgment(&PlayerName::from("Ben"), Category::Person),
            Some(true)
        );
        assert_eq!(
            ballot.judgment(&PlayerName::from("Ben"), Category::Animal),
            Some(false)
        );
        assert_eq!(
            ballot.judgment(&PlayerName::from("Ben"), Category::Place),
            None
        );
    }
}
