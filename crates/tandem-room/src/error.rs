//! Error types for the room core.

use tandem_protocol::RoomId;
use tandem_store::StoreError;

/// Errors that can occur during room operations.
///
/// Every variant is also surfaced to the originating connection as an
/// `alert` (plus a `redirect` for the rejection cases) before the
/// operation returns, so callers only log these.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The supplied token is not in the room-id format.
    #[error("malformed room id {0:?}")]
    InvalidRoomId(RoomId),

    /// The room does not exist in the store.
    #[error("room {0} not found")]
    NotFound(RoomId),

    /// Both slots are online, leaving no seat for a fresh join.
    #[error("room {0} is full")]
    RoomFull(RoomId),

    /// The store failed; the record is in its pre-operation state.
    #[error(transparent)]
    Store(#[from] StoreError),
}
