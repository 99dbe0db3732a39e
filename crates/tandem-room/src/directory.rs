//! The session directory: which room is each live connection in?
//!
//! The transport only reports "this connection is closing"; it does
//! not know about rooms. This map is what lets the disconnect handler
//! recover the room a connection was joined to. Entries are created on
//! successful create/join and resolved-and-removed when the connection
//! closes. It has no durability: after a process restart it starts
//! empty, which is fine because the transport drops every connection on
//! restart anyway.

use std::collections::HashMap;

use tandem_protocol::RoomId;
use tandem_transport::ConnectionId;

/// In-memory mapping from live connection to joined room.
///
/// A connection is in at most one room at a time (key invariant); a
/// re-join under the same connection replaces the previous entry.
#[derive(Debug, Default)]
pub struct SessionDirectory {
    entries: HashMap<ConnectionId, RoomId>,
}

impl SessionDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a connection joined a room.
    pub fn insert(
        &mut self,
        connection_id: ConnectionId,
        room_id: RoomId,
    ) {
        self.entries.insert(connection_id, room_id);
    }

    /// Removes and returns the room a closing connection was in.
    pub fn remove(
        &mut self,
        connection_id: ConnectionId,
    ) -> Option<RoomId> {
        self.entries.remove(&connection_id)
    }

    /// Looks up a connection's room without removing the entry.
    pub fn room_of(
        &self,
        connection_id: ConnectionId,
    ) -> Option<&RoomId> {
        self.entries.get(&connection_id)
    }

    /// Returns the number of tracked connections.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no connections are tracked.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
