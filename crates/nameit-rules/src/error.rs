//! Error types for the rules layer.

use nameit_protocol::{GamePhase, PlayerName, RoomCode};

/// Errors a game rule can reject an operation with.
///
/// All of these are expected, recoverable conditions meant to be shown
/// to the player verbatim. A rejected operation changes nothing.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// The display name is empty, blank, or too long.
    #[error("player name must be 1-{} characters", crate::MAX_NAME_LEN)]
    InvalidName,

    /// The room code is not exactly 6 uppercase letters or digits.
    #[error("room code must be {} uppercase letters or digits", crate::CODE_LEN)]
    InvalidCode,

    /// The operation is not valid in the room's current phase.
    #[error("room is {actual}, operation requires {expected}")]
    WrongPhase {
        expected: GamePhase,
        actual: GamePhase,
    },

    /// Only the host may perform this operation.
    #[error("player {0} is not the host")]
    NotHost(PlayerName),

    /// Not enough players to start a round.
    #[error("need at least {need} players to start, have {have}")]
    InsufficientPlayers { need: usize, have: usize },

    /// A player with this exact name is already in the room.
    #[error("a player named {0} is already in the room")]
    DuplicateName(PlayerName),

    /// The room has reached its player cap.
    #[error("room {0} is full")]
    RoomFull(RoomCode),

    /// The player is not a member of the room.
    #[error("player {0} is not in room {1}")]
    NotInRoom(PlayerName, RoomCode),

    /// Every eligible letter has already been drawn this game.
    #[error("every eligible letter has been used this game")]
    LettersExhausted,
}
