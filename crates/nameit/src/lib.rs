//! # Name It
//!
//! Room orchestration for the Name It party word game: players share a
//! room, get a letter each round, answer four categories against the
//! clock, vote on each other's answers, and collect points over rounds.
//!
//! This crate is the façade over the workspace. [`GameService`] exposes
//! the full operation set — create/join/leave, round start, answer and
//! ballot submission, the phase transitions, and room snapshots /
//! subscriptions — over any [`RoomStore`] backend.
//!
//! ```no_run
//! use nameit::{GameService, MemoryStore};
//!
//! # async fn demo() -> Result<(), nameit::GameError> {
//! let service = GameService::new(MemoryStore::new());
//! let room = service.create_room("Ana").await?;
//! service.join_room(&room.code, "Ben").await?;
//! service.start_round(&room.code, "Ana").await?;
//! # Ok(())
//! # }
//! ```

mod error;
mod service;

pub use error::GameError;
pub use service::GameService;

pub use nameit_protocol::{
    AnswerSheet, Ballot, Category, GamePhase, Letter, Patch, PlayerName, Room, RoomCode,
};
pub use nameit_rules::{GameConfig, RuleError};
pub use nameit_store::{MemoryStore, RoomStore, RoomWatcher, StoreError};
