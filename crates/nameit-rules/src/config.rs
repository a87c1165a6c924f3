//! Game configuration.

use std::collections::BTreeSet;

use nameit_protocol::Letter;
use serde::{Deserialize, Serialize};

/// Maximum length of a player display name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Exact length of a room code.
pub const CODE_LEN: usize = 6;

/// Tunable game rules for a room.
///
/// The categories themselves are fixed (see
/// [`Category`](nameit_protocol::Category)); everything else about the
/// pacing and scoring of a game is set here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Minimum players required before a round can start.
    pub min_players: usize,

    /// Maximum players allowed in a room.
    pub max_players: usize,

    /// Points awarded per category judged correct.
    pub points_per_correct: u32,

    /// Advisory round length in seconds. The core records the round
    /// start stamp; enforcing the limit (and calling the Review
    /// transition on expiry) is the caller's job.
    pub round_seconds: u64,

    /// Round cap. `None` means the game runs until the letters run out
    /// or the players quit.
    pub max_rounds: Option<u32>,

    /// Letters excluded from the draw pool.
    pub excluded_letters: BTreeSet<Letter>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 2,
            max_players: 8,
            points_per_correct: 5,
            round_seconds: 45,
            max_rounds: None,
            excluded_letters: ['Q', 'X', 'Y', 'Z'].into_iter().map(Letter).collect(),
        }
    }
}
