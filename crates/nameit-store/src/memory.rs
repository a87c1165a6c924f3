//! In-process room store.

use std::collections::HashMap;

use nameit_protocol::{GamePhase, Patch, Room, RoomCode};
use tokio::sync::{Mutex, watch};

use crate::{RoomStore, RoomWatcher, StoreError};

/// One stored room plus its change-notification channel.
struct RoomEntry {
    room: Room,
    tx: watch::Sender<Room>,
}

/// An in-process [`RoomStore`] backed by a mutexed map.
///
/// Commits apply the whole patch list under the lock, so concurrent
/// operations from different players serialize exactly like they would
/// against a remote document store — one committed snapshot at a time,
/// each published to subscribers before the next lands.
#[derive(Default)]
pub struct MemoryStore {
    rooms: Mutex<HashMap<RoomCode, RoomEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoomStore for MemoryStore {
    async fn get(&self, code: &RoomCode) -> Result<Room, StoreError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(code)
            .map(|entry| entry.room.clone())
            .ok_or_else(|| StoreError::NotFound(code.clone()))
    }

    async fn create(&self, room: Room) -> Result<Room, StoreError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&room.code) {
            return Err(StoreError::AlreadyExists(room.code));
        }

        let code = room.code.clone();
        let (tx, _rx) = watch::channel(room.clone());
        rooms.insert(code.clone(), RoomEntry { room: room.clone(), tx });

        tracing::debug!(%code, "room document created");
        Ok(room)
    }

    async fn atomic_update(
        &self,
        code: &RoomCode,
        guard: Option<GamePhase>,
        patches: Vec<Patch>,
    ) -> Result<Room, StoreError> {
        let mut rooms = self.rooms.lock().await;
        let entry = rooms
            .get_mut(code)
            .ok_or_else(|| StoreError::NotFound(code.clone()))?;

        if let Some(expected) = guard {
            if entry.room.phase != expected {
                return Err(StoreError::PhaseConflict {
                    expected,
                    actual: entry.room.phase,
                });
            }
        }

        entry.room.apply_all(patches);
        entry.tx.send_replace(entry.room.clone());

        tracing::trace!(%code, phase = %entry.room.phase, "room document committed");
        Ok(entry.room.clone())
    }

    async fn subscribe(&self, code: &RoomCode) -> Result<RoomWatcher, StoreError> {
        let rooms = self.rooms.lock().await;
        let entry = rooms
            .get(code)
            .ok_or_else(|| StoreError::NotFound(code.clone()))?;
        Ok(RoomWatcher::new(entry.tx.subscribe()))
    }
}
