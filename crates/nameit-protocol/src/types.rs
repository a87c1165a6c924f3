//! Identity types and the lifecycle phase enum.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A player's display name, as supplied by the caller.
///
/// Names are case-sensitive and compared exactly — `"Ana"` and `"ana"`
/// are two different players. Length validation lives in the rules
/// layer; this type just carries the string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerName(pub String);

impl PlayerName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A room's shareable identifier: 6 uppercase alphanumeric characters.
///
/// The code doubles as the document key in the room store. Validation
/// and generation live in the rules layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomCode {
    fn from(code: &str) -> Self {
        Self(code.to_owned())
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A round letter, always an uppercase ASCII letter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Letter(pub char);

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The answer categories of a round. Fixed for the whole game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Person,
    Thing,
    Animal,
    Place,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 4] = [
        Category::Person,
        Category::Thing,
        Category::Animal,
        Category::Place,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person => write!(f, "person"),
            Self::Thing => write!(f, "thing"),
            Self::Animal => write!(f, "animal"),
            Self::Place => write!(f, "place"),
        }
    }
}

// ---------------------------------------------------------------------------
// GamePhase
// ---------------------------------------------------------------------------

/// The lifecycle phase of a room.
///
/// ```text
/// Waiting → Playing → Review → Results ─┬→ Waiting   (next round)
///                                       └→ Finished  (round cap hit)
/// ```
///
/// - **Waiting**: lobby. Players can join; the host can start a round.
/// - **Playing**: a letter is live, answers are being collected.
/// - **Review**: answers are frozen, players vote on correctness.
/// - **Results**: round scores have been folded into the totals.
/// - **Finished**: the configured round cap was reached. Terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Waiting,
    Playing,
    Review,
    Results,
    Finished,
}

impl GamePhase {
    /// Returns `true` if the room is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Returns `true` if a round is live in this phase (answers open).
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Returns `true` if `target` is a legal next phase from `self`.
    ///
    /// Unlike a strictly ordered machine, the cycle closes: `Results`
    /// can return to `Waiting` for the next round or end at `Finished`.
    pub fn can_advance_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Waiting, Self::Playing)
                | (Self::Playing, Self::Review)
                | (Self::Review, Self::Results)
                | (Self::Results, Self::Waiting)
                | (Self::Results, Self::Finished)
        )
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Playing => write!(f, "playing"),
            Self::Review => write!(f, "review"),
            Self::Results => write!(f, "results"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_name_serializes_as_plain_string() {
        let json = serde_json::to_string(&PlayerName::from("Ana")).unwrap();
        assert_eq!(json, "\"Ana\"");
    }

    #[test]
    fn test_room_code_serializes_as_plain_string() {
        let json = serde_json::to_string(&RoomCode::from("ABC123")).unwrap();
        assert_eq!(json, "\"ABC123\"");
    }

    #[test]
    fn test_letter_serializes_as_char() {
        let json = serde_json::to_string(&Letter('M')).unwrap();
        assert_eq!(json, "\"M\"");
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Person).unwrap();
        assert_eq!(json, "\"person\"");
        let json = serde_json::to_string(&Category::Place).unwrap();
        assert_eq!(json, "\"place\"");
    }

    #[test]
    fn test_game_phase_serializes_lowercase() {
        // The store documents use the lowercase phase strings; a rename
        // here would silently orphan every persisted room.
        let json = serde_json::to_string(&GamePhase::Waiting).unwrap();
        assert_eq!(json, "\"waiting\"");
        let json = serde_json::to_string(&GamePhase::Review).unwrap();
        assert_eq!(json, "\"review\"");
    }

    #[test]
    fn test_game_phase_forward_transitions_are_legal() {
        assert!(GamePhase::Waiting.can_advance_to(GamePhase::Playing));
        assert!(GamePhase::Playing.can_advance_to(GamePhase::Review));
        assert!(GamePhase::Review.can_advance_to(GamePhase::Results));
        assert!(GamePhase::Results.can_advance_to(GamePhase::Waiting));
        assert!(GamePhase::Results.can_advance_to(GamePhase::Finished));
    }

    #[test]
    fn test_game_phase_skipping_states_is_illegal() {
        assert!(!GamePhase::Waiting.can_advance_to(GamePhase::Review));
        assert!(!GamePhase::Playing.can_advance_to(GamePhase::Results));
        assert!(!GamePhase::Review.can_advance_to(GamePhase::Waiting));
        assert!(!GamePhase::Finished.can_advance_to(GamePhase::Waiting));
    }

    #[test]
    fn test_game_phase_is_joinable_only_in_waiting() {
        assert!(GamePhase::Waiting.is_joinable());
        assert!(!GamePhase::Playing.is_joinable());
        assert!(!GamePhase::Review.is_joinable());
        assert!(!GamePhase::Results.is_joinable());
        assert!(!GamePhase::Finished.is_joinable());
    }

    #[test]
    fn test_category_all_covers_every_variant() {
        assert_eq!(Category::ALL.len(), 4);
    }
}
