//! Error types for the store layer.

use nameit_protocol::{GamePhase, RoomCode};

/// Errors a store operation can fail with.
///
/// These are resource-level conditions. The caller retries transient
/// ones with backoff if it wants to; the store itself never retries.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No room document exists under this code.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// A room document already exists under this code.
    #[error("room {0} already exists")]
    AlreadyExists(RoomCode),

    /// The phase guard failed: the room moved on before the commit
    /// landed. The update was not applied.
    #[error("room is {actual}, update requires {expected}")]
    PhaseConflict {
        expected: GamePhase,
        actual: GamePhase,
    },

    /// The store (or this room's entry in it) is gone.
    #[error("room store is unavailable")]
    Closed,
}
