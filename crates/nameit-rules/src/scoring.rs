//! The scoring engine: verdicts in, round points out.

use std::collections::BTreeMap;

use nameit_protocol::{Category, PlayerName, Room};

use crate::{GameConfig, voting};

/// Computes each player's points for the current round.
///
/// Every current player gets an entry — a player who submitted nothing
/// scores 0, present rather than absent, so results screens can show
/// the whole table. A category contributes points only when it holds a
/// non-empty answer that resolves correct; empty answers are never even
/// put to the resolver.
pub fn score_round(room: &Room, config: &GameConfig) -> BTreeMap<PlayerName, u32> {
    room.players
        .iter()
        .map(|player| {
            let points = match room.answers.get(player) {
                Some(sheet) => Category::ALL
                    .iter()
                    .filter(|category| sheet.answered(**category))
                    .filter(|category| voting::resolve(&room.votes, player, **category))
                    .count() as u32
                    * config.points_per_correct,
                None => 0,
            };
            (player.clone(), points)
        })
        .collect()
}

// =========================================================================
// Tests
// =========================================================================
