//! The connection registry: the live, in-memory side of every room.
//!
//! Each connected client gets an outbox channel here; the room core
//! addresses clients through the [`Gateway`] impl and never touches a
//! socket. The per-connection handler task pumps its outbox into the
//! actual WebSocket.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tandem_protocol::{RoomId, ServerEvent};
use tandem_room::Gateway;
use tandem_transport::ConnectionId;
use tokio::sync::mpsc;

/// Tracks every live connection's outbox and the room broadcast groups.
///
/// Cheap to clone; all clones share the same state. Delivery is
/// fire-and-forget: events to an unknown or closing connection are
/// silently dropped.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    outboxes: HashMap<ConnectionId, mpsc::UnboundedSender<ServerEvent>>,
    groups: HashMap<RoomId, HashSet<ConnectionId>>,
}

impl Inner {
    fn leave_all_groups(&mut self, connection_id: ConnectionId) {
        self.groups.retain(|_, members| {
            members.remove(&connection_id);
            !members.is_empty()
        });
    }

    fn deliver(&self, connection_id: ConnectionId, event: ServerEvent) {
        if let Some(outbox) = self.outboxes.get(&connection_id) {
            // A closed receiver just misses the event.
            let _ = outbox.send(event);
        }
    }
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connection and returns the receiving end of its
    /// outbox. The handler task owns the receiver for the connection's
    /// lifetime.
    pub fn register(
        &self,
        connection_id: ConnectionId,
    ) -> mpsc::UnboundedReceiver<ServerEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().outboxes.insert(connection_id, tx);
        rx
    }

    /// Removes a connection entirely: its outbox and every group entry.
    pub fn remove(&self, connection_id: ConnectionId) {
        let mut inner = self.lock();
        inner.outboxes.remove(&connection_id);
        inner.leave_all_groups(connection_id);
    }

    /// Returns the number of registered connections.
    pub fn connections(&self) -> usize {
        self.lock().outboxes.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Plain maps stay consistent even if a holder panicked.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Gateway for ConnectionRegistry {
    fn subscribe(&self, connection_id: ConnectionId, room_id: &RoomId) {
        let mut inner = self.lock();
        // A connection sits in at most one group at a time.
        inner.leave_all_groups(connection_id);
        inner
            .groups
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id);
    }

    fn unsubscribe_all(&self, connection_id: ConnectionId) {
        self.lock().leave_all_groups(connection_id);
    }

    fn send(&self, connection_id: ConnectionId, event: ServerEvent) {
        self.lock().deliver(connection_id, event);
    }

    fn send_room(&self, room_id: &RoomId, event: ServerEvent) {
        let inner = self.lock();
        if let Some(members) = inner.groups.get(room_id) {
            for &member in members {
                inner.deliver(member, event.clone());
            }
        }
    }

    fn send_room_except(
        &self,
        room_id: &RoomId,
        except: ConnectionId,
        event: ServerEvent,
    ) {
        let inner = self.lock();
        if let Some(members) = inner.groups.get(room_id) {
            for &member in members {
                if member != except {
                    inner.deliver(member, event.clone());
                }
            }
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
