//! Room document model for Name It.
//!
//! This crate defines the shared vocabulary of the whole workspace: the
//! identity newtypes, the round lifecycle phases, the [`Room`] aggregate
//! as it lives in the room store, and the [`Patch`] operations every
//! state change is expressed in.
//!
//! # Key types
//!
//! - [`RoomCode`], [`PlayerName`], [`Letter`], [`Category`] — identities
//! - [`GamePhase`] — lifecycle state machine
//! - [`Room`] — the aggregate root, one document per room
//! - [`AnswerSheet`] / [`Ballot`] — one player's answers / judgments
//! - [`Patch`] — the atomic field operations a store must support

mod patch;
mod room;
mod types;

pub use patch::Patch;
pub use room::{AnswerSheet, Ballot, Room};
pub use types::{Category, GamePhase, Letter, PlayerName, RoomCode};
