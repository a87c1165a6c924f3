//! Answer collection and normalization.

use nameit_protocol::{AnswerSheet, GamePhase, Patch, PlayerName, Room};

use crate::RuleError;

/// Normalizes one raw answer: trim, then lowercase with the first
/// character re-capitalized. Blank input normalizes to the empty
/// string, which every later stage treats as "no answer".
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalizes every value of a sheet.
pub fn normalize_sheet(sheet: &AnswerSheet) -> AnswerSheet {
    AnswerSheet(
        sheet
            .0
            .iter()
            .map(|(category, answer)| (*category, normalize(answer)))
            .collect(),
    )
}

/// Accepts one player's answers for the live round.
///
/// The stored sheet is the normalized one. Submitting again in the same
/// round replaces the previous sheet entirely — last write wins, there
/// is no "already submitted" error at this layer.
///
/// # Errors
/// - [`RuleError::WrongPhase`] unless the room is `Playing`
/// - [`RuleError::NotInRoom`] if the player is not a member
pub fn submit(
    room: &Room,
    player: &PlayerName,
    sheet: &AnswerSheet,
) -> Result<Vec<Patch>, RuleError> {
    if room.phase != GamePhase::Playing {
        return Err(RuleError::WrongPhase {
            expected: GamePhase::Playing,
            actual: room.phase,
        });
    }
    if !room.contains_player(player) {
        return Err(RuleError::NotInRoom(player.clone(), room.code.clone()));
    }

    Ok(vec![Patch::Answers(player.clone(), normalize_sheet(sheet))])
}

/// Returns `true` once every current player has a sheet on file.
///
/// This is the "everyone is done" trigger for the Review transition;
/// the other trigger (timer expiry) lives with the caller.
pub fn all_submitted(room: &Room) -> bool {
    room.players.iter().all(|p| room.answers.contains_key(p))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use nameit_protocol::{Category, RoomCode};

    use super::*;
    use crate::{GameConfig, lifecycle};

    fn playing_room() -> Room {
        let mut room = lifecycle::create(RoomCode::from("ABC123"), "Ana").unwrap();
        room.apply_all(lifecycle::join(&room, "Ben", &GameConfig::default()).unwrap());
        let host = room.host.clone();
        room.apply_all(
            lifecycle::start_round(&room, &host, &GameConfig::default(), 0).unwrap(),
        );
        room
    }

    fn sheet(person: &str) -> AnswerSheet {
        let mut s = AnswerSheet::new();
        s.set(Category::Person, person);
        s
    }

    #[test]
    fn test_normalize_trims_and_recapitalizes() {
        assert_eq!(normalize("  mary  "), "Mary");
        assert_eq!(normalize("MARY"), "Mary");
        assert_eq!(normalize("mCDONALD"), "Mcdonald");
        assert_eq!(normalize("m"), "M");
    }

    #[test]
    fn test_normalize_blank_becomes_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("\t\n"), "");
    }

    #[test]
    fn test_submit_stores_normalized_sheet() {
        let mut room = playing_room();
        let ana = PlayerName::from("Ana");
        room.apply_all(submit(&room, &ana, &sheet("  mARY ")).unwrap());

        assert_eq!(room.answers[&ana].get(Category::Person), Some("Mary"));
    }

    #[test]
    fn test_submit_twice_overwrites() {
        // Second submission fully replaces the first — same stored state
        // as if only the second had ever arrived.
        let mut room = playing_room();
        let ana = PlayerName::from("Ana");

        room.apply_all(submit(&room, &ana, &sheet("Mary")).unwrap());
        let after_first = room.clone();
        room.apply_all(submit(&room, &ana, &sheet("Maya")).unwrap());
        room.apply_all(submit(&room, &ana, &sheet("Maya")).unwrap());

        assert_eq!(room.answers[&ana].get(Category::Person), Some("Maya"));
        assert_eq!(room.answers.len(), after_first.answers.len());
    }

    #[test]
    fn test_submit_rejected_outside_playing() {
        let mut room = playing_room();
        room.apply_all(lifecycle::advance_to_review(&room).unwrap());

        // A late submission lands after the phase advanced: rejected,
        // never silently applied.
        let result = submit(&room, &PlayerName::from("Ana"), &sheet("Mary"));
        assert!(matches!(result, Err(RuleError::WrongPhase { .. })));
    }

    #[test]
    fn test_submit_rejected_for_outsider() {
        let room = playing_room();
        let result = submit(&room, &PlayerName::from("Zed"), &sheet("Mary"));
        assert!(matches!(result, Err(RuleError::NotInRoom(_, _))));
    }

    #[test]
    fn test_all_submitted_tracks_current_players() {
        let mut room = playing_room();
        assert!(!all_submitted(&room));

        let ana = PlayerName::from("Ana");
        room.apply_all(submit(&room, &ana, &sheet("Mary")).unwrap());
        assert!(!all_submitted(&room));

        let ben = PlayerName::from("Ben");
        room.apply_all(submit(&room, &ben, &sheet("Max")).unwrap());
        assert!(all_submitted(&room));
    }
}
