//! The round letter pool.
//!
//! A game draws each round's letter from A–Z minus a configured
//! exclusion set (letters that make the categories unreasonably hard),
//! minus everything already drawn this game. The pool never resets
//! within a game — when it runs dry the game is over.

use std::collections::BTreeSet;

use nameit_protocol::Letter;
use rand::seq::IndexedRandom;

use crate::{GameConfig, RuleError};

/// Every letter a round may draw, in alphabet order.
pub fn eligible(config: &GameConfig) -> Vec<Letter> {
    ('A'..='Z')
        .map(Letter)
        .filter(|l| !config.excluded_letters.contains(l))
        .collect()
}

/// The eligible letters not yet drawn this game.
pub fn remaining(config: &GameConfig, used: &BTreeSet<Letter>) -> Vec<Letter> {
    eligible(config)
        .into_iter()
        .filter(|l| !used.contains(l))
        .collect()
}

/// Draws one letter uniformly at random from the remaining pool.
///
/// # Errors
/// Returns [`RuleError::LettersExhausted`] when nothing remains — the
/// caller decides whether that ends the game.
pub fn draw(config: &GameConfig, used: &BTreeSet<Letter>) -> Result<Letter, RuleError> {
    remaining(config, used)
        .choose(&mut rand::rng())
        .copied()
        .ok_or(RuleError::LettersExhausted)
}

// =========================================================================
// Tests
// =========================================================================
