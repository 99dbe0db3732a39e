//! Shared collaborators and the per-room serialization locks.

use std::collections::HashMap;
use std::sync::Arc;

use tandem_protocol::RoomId;
use tandem_store::RoomStore;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::Gateway;

/// Everything the engine and relay share: the store, the gateway, and
/// the lock registry that serializes work per room.
pub(crate) struct RoomContext<S, G> {
    pub(crate) store: S,
    pub(crate) gateway: G,
    pub(crate) locks: RoomLocks,
}

impl<S: RoomStore, G: Gateway> RoomContext<S, G> {
    pub(crate) fn new(store: S, gateway: G) -> Self {
        Self {
            store,
            gateway,
            locks: RoomLocks::default(),
        }
    }
}

/// One async mutex per room id.
///
/// The room record is read-modify-written by every operation, and the
/// store offers no transactions. Holding the room's lock across the
/// whole read-modify-write closes the races that an unguarded store
/// would allow: two near-simultaneous disconnects both taking the
/// downgrade path and orphaning the record, or two moves on the same
/// cell both passing the duplicate check.
#[derive(Default)]
pub(crate) struct RoomLocks {
    locks: Mutex<HashMap<RoomId, Arc<Mutex<()>>>>,
}

impl RoomLocks {
    /// Acquires the lock for a room, creating the entry on first use.
    ///
    /// The guard is owned so it can be held across store awaits.
    pub(crate) async fn acquire(
        &self,
        room_id: &RoomId,
    ) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            Arc::clone(
                locks
                    .entry(room_id.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        lock.lock_owned().await
    }

    /// Drops the lock entry for a deleted room.
    ///
    /// A task already waiting on the old mutex still gets its turn; a
    /// later operation on a resurrected room simply creates a fresh
    /// entry.
    pub(crate) async fn forget(&self, room_id: &RoomId) {
        self.locks.lock().await.remove(room_id);
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}
