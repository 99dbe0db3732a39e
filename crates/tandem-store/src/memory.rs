//! In-memory `RoomStore` backed by a mutexed map.

use std::collections::HashMap;
use std::sync::Arc;

use tandem_protocol::{Room, RoomId};
use tokio::sync::Mutex;

use crate::{RoomStore, StoreError};

/// An in-process room store.
///
/// Cheap to clone; all clones share the same map. Suitable for the
/// single-process deployment model and for tests; records do not
/// survive a restart, which matches the transport resetting every
/// connection on restart anyway.
#[derive(Clone, Default)]
pub struct MemoryStore {
    rooms: Arc<Mutex<HashMap<RoomId, Room>>>,
}

impl MemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.rooms.lock().await.len()
    }

    /// Returns `true` if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.rooms.lock().await.is_empty()
    }
}

impl RoomStore for MemoryStore {
    async fn find(
        &self,
        room_id: &RoomId,
    ) -> Result<Option<Room>, StoreError> {
        Ok(self.rooms.lock().await.get(room_id).cloned())
    }

    async fn save(&self, room: Room) -> Result<Room, StoreError> {
        let mut rooms = self.rooms.lock().await;
        rooms.insert(room.room_id.clone(), room.clone());
        Ok(room)
    }

    async fn delete(&self, room_id: &RoomId) -> Result<(), StoreError> {
        self.rooms.lock().await.remove(room_id);
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
