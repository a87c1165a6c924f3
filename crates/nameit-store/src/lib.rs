//! Room storage for Name It.
//!
//! The store is the single serialization point of the whole system:
//! every client talks to it, and every state change commits through
//! [`RoomStore::atomic_update`] as a list of
//! [`Patch`](nameit_protocol::Patch) operations. Backends only need
//! the primitives a synchronized document store already has — field
//! assignment, set union/removal, numeric increment, per-key nested
//! writes — never read-modify-write of a whole document.
//!
//! [`MemoryStore`] is the in-process implementation; a remote backend
//! implements the same trait.

#![allow(async_fn_in_trait)]

mod error;
mod memory;

use nameit_protocol::{GamePhase, Patch, Room, RoomCode};
use tokio::sync::watch;

pub use error::StoreError;
pub use memory::MemoryStore;

/// The store contract the orchestrator is written against.
pub trait RoomStore: Send + Sync {
    /// Fetches the current snapshot of a room.
    async fn get(&self, code: &RoomCode) -> Result<Room, StoreError>;

    /// Creates a room document. Fails if the code is already taken.
    async fn create(&self, room: Room) -> Result<Room, StoreError>;

    /// Applies a patch list as one atomic commit and returns the
    /// resulting snapshot.
    ///
    /// When `guard` is set, the commit only lands if the room's phase
    /// still matches — the compare-and-swap that keeps a raced phase
    /// transition from applying twice. A failed guard changes nothing.
    async fn atomic_update(
        &self,
        code: &RoomCode,
        guard: Option<GamePhase>,
        patches: Vec<Patch>,
    ) -> Result<Room, StoreError>;

    /// Subscribes to a room's committed changes.
    async fn subscribe(&self, code: &RoomCode) -> Result<RoomWatcher, StoreError>;
}

/// A live subscription to one room.
///
/// The watcher always starts with the snapshot that was current at
/// subscribe time ([`RoomWatcher::current`]) and then yields every
/// committed change. Dropping the watcher unregisters it.
#[derive(Debug)]
pub struct RoomWatcher {
    rx: watch::Receiver<Room>,
}

impl RoomWatcher {
    pub(crate) fn new(rx: watch::Receiver<Room>) -> Self {
        Self { rx }
    }

    /// The latest committed snapshot.
    pub fn current(&self) -> Room {
        self.rx.borrow().clone()
    }

    /// Waits for the next committed change and returns the new snapshot.
    ///
    /// # Errors
    /// Returns [`StoreError::Closed`] if the room's store entry is gone.
    pub async fn changed(&mut self) -> Result<Room, StoreError> {
        self.rx.changed().await.map_err(|_| StoreError::Closed)?;
        Ok(self.rx.borrow_and_update().clone())
    }
}
