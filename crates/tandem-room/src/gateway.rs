//! The broadcast seam between the room core and the connection layer.

use tandem_protocol::{RoomId, ServerEvent};
use tandem_transport::ConnectionId;

/// A connection multiplexer addressed by room membership.
///
/// Implemented by the server layer's connection registry; the core only
/// ever asks it to deliver events. All delivery is fire-and-forget
/// and at-most-once: a closed receiver simply misses the event.
pub trait Gateway: Send + Sync + 'static {
    /// Adds a connection to a room's broadcast group.
    fn subscribe(&self, connection_id: ConnectionId, room_id: &RoomId);

    /// Removes a connection from every broadcast group.
    fn unsubscribe_all(&self, connection_id: ConnectionId);

    /// Sends an event to one specific connection.
    fn send(&self, connection_id: ConnectionId, event: ServerEvent);

    /// Sends an event to every connection in a room's group.
    fn send_room(&self, room_id: &RoomId, event: ServerEvent);

    /// Sends an event to every connection in a room's group except one
    /// (typically the sender of the inbound event).
    fn send_room_except(
        &self,
        room_id: &RoomId,
        except: ConnectionId,
        event: ServerEvent,
    );
}
