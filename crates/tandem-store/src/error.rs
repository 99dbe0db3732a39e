//! Error types for the storage layer.

use tandem_protocol::RoomId;

/// Errors that can occur while reading or writing room records.
///
/// A failed write is a final outcome; no layer retries. Whether the
/// failure reaches the user (an alert) or only the log depends on
/// whether a caller is still attached to the operation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend rejected or lost the operation.
    #[error("store backend failed: {0}")]
    Backend(String),

    /// The backend is unreachable.
    #[error("store unavailable for room {0}")]
    Unavailable(RoomId),
}
