//! Core wire types: identity newtypes, inbound and outbound events.
//!
//! Events are adjacently tagged (`{"event": ..., "data": ...}`) with
//! kebab-case event names and camelCase payload fields, the exact
//! shape the web client already speaks.

use std::fmt;

use serde::{Deserialize, Serialize};
use tandem_transport::ConnectionId;

use crate::Room;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A room's unique identifier: a short, URL-safe, human-shareable token.
///
/// Opaque at this layer. The room core generates tokens from a fixed
/// 64-character alphabet and validates the charset on join; here it is
/// just a string that serializes transparently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RoomId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A cell-position key within a board, unique per move log.
///
/// Opaque to the server: it never interprets positions, it only
/// deduplicates on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellKey(String);

impl CellKey {
    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CellKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Alert severity
// ---------------------------------------------------------------------------

/// Severity attached to an `alert` event. Maps directly onto the
/// client's notification styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
    Error,
}

// ---------------------------------------------------------------------------
// Inbound events (client → server)
// ---------------------------------------------------------------------------

/// An event received from a client connection.
///
/// Disconnects are not a wire event; the transport reports the
/// connection closing and the server reacts to that directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Open a new room, optionally under a caller-supplied id.
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        room_id: Option<RoomId>,
    },

    /// Join an existing room. `old_connection_id` is the reconnection
    /// hint: the id this client held before it dropped.
    #[serde(rename_all = "camelCase")]
    JoinRoom {
        name: String,
        room_id: RoomId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        old_connection_id: Option<ConnectionId>,
    },

    /// A move: the sender clicked a cell.
    #[serde(rename_all = "camelCase")]
    OnUserSelection {
        room_id: RoomId,
        clicked_at: CellKey,
        clicked_by: String,
        played_by: String,
    },

    /// Wipe the board and start over.
    #[serde(rename_all = "camelCase")]
    GameRestart { room_id: RoomId },
}

// ---------------------------------------------------------------------------
// Outbound events (server → client)
// ---------------------------------------------------------------------------

/// An event sent to one or more client connections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// To the creator only: the room exists under this id.
    #[serde(rename_all = "camelCase")]
    CreatedRoom { name: String, room_id: RoomId },

    /// To the joiner only: you are in.
    #[serde(rename_all = "camelCase")]
    JoinedRoom { name: String, room_id: RoomId },

    /// To a rejected caller only: navigate away.
    Redirect { path: String },

    /// A user-visible notification, targeted or broadcast.
    Alert { message: String, severity: Severity },

    /// Full room document, to the entire room group.
    RoomUpdate(Room),

    /// Full room document after a membership change, to the group.
    GameStatusUpdate(Room),

    /// A peer's move, relayed pre-persistence to everyone but the
    /// sender.
    #[serde(rename_all = "camelCase")]
    OnUserSelected {
        clicked_at: CellKey,
        clicked_by: String,
        played_by: String,
    },

    /// A peer requested a restart, to everyone but the sender.
    RestartGame,
}

// =========================================================================
// Tests
// =========================================================================
