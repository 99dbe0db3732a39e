//! The `RoomStore` trait, the seam between the room core and
//! durability.

use std::future::Future;

use tandem_protocol::{Room, RoomId};

use crate::StoreError;

/// Keyed storage for room records.
///
/// Implementations persist whole documents; there are no partial
/// updates. The engine follows a read-modify-write pattern on top of
/// this, serialized per room by the lifecycle layer.
pub trait RoomStore: Send + Sync + 'static {
    /// Looks up a room by id. `Ok(None)` means the record does not
    /// exist (deleted, expired, or never created).
    fn find(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<Option<Room>, StoreError>> + Send;

    /// Saves a full document, inserting or replacing by `room_id`.
    /// Returns the document as persisted.
    fn save(
        &self,
        room: Room,
    ) -> impl Future<Output = Result<Room, StoreError>> + Send;

    /// Deletes a record. Deleting an absent record is not an error.
    fn delete(
        &self,
        room_id: &RoomId,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
