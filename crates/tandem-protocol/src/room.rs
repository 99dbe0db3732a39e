//! The room document: the durable record of one two-player session.
//!
//! This is the central entity of the whole system. The store persists
//! it, the lifecycle engine mutates it, and `room-update` /
//! `game-status-update` broadcasts carry it to clients verbatim, so it
//! lives in the protocol crate and serializes camelCase.

use std::fmt;

use serde::{Deserialize, Serialize};
use tandem_transport::ConnectionId;

use crate::{CellKey, RoomId};

// ---------------------------------------------------------------------------
// Slot
// ---------------------------------------------------------------------------

/// One of the two participant positions in a room.
///
/// A slot's logical occupant is sticky: the `name` survives disconnects
/// so the occupant can be displayed while offline and matched again on
/// reconnection. The `connection_id` is replaced on every (re)join and
/// may go stale while `online` is false.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<ConnectionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub online: bool,
}

impl Slot {
    /// An empty slot that has never been occupied.
    pub fn vacant() -> Self {
        Self::default()
    }

    /// A slot occupied by a live connection.
    pub fn occupied(connection_id: ConnectionId, name: &str) -> Self {
        Self {
            connection_id: Some(connection_id),
            name: Some(name.to_string()),
            online: true,
        }
    }

    /// Puts a connection into this slot, replacing any stale identity.
    pub fn occupy(&mut self, connection_id: ConnectionId, name: &str) {
        self.connection_id = Some(connection_id);
        self.name = Some(name.to_string());
        self.online = true;
    }

    /// Marks the slot offline. The name is retained for display and
    /// reconnection matching; the connection id is kept as the last
    /// known identity of the occupant.
    pub fn go_offline(&mut self, connection_id: ConnectionId) {
        self.connection_id = Some(connection_id);
        self.online = false;
    }

    /// Returns `true` if this slot currently holds the given connection.
    pub fn holds(&self, connection_id: ConnectionId) -> bool {
        self.connection_id == Some(connection_id)
    }
}

// ---------------------------------------------------------------------------
// SlotId
// ---------------------------------------------------------------------------

/// Names one of the two slots. Assignment order, not arrival order:
/// `Player1` is whoever was placed first and keeps that position across
/// reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotId {
    Player1,
    Player2,
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player1 => write!(f, "player1"),
            Self::Player2 => write!(f, "player2"),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayedCell
// ---------------------------------------------------------------------------

/// One entry in the append-only move log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCell {
    pub clicked_at: CellKey,
    pub clicked_by: String,
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// The durable record of one two-player session.
///
/// `win_cells` and `won` are reserved for the client: game rules are
/// out of scope here, so the server carries them but never computes
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: RoomId,
    pub player1: Slot,
    pub player2: Slot,
    #[serde(default)]
    pub played_cells: Vec<PlayedCell>,
    #[serde(default)]
    pub win_cells: Vec<CellKey>,
    #[serde(default)]
    pub won: bool,
}

impl Room {
    /// A fresh room: the creator in `player1`, `player2` vacant, empty
    /// move log.
    pub fn new(room_id: RoomId, player1: Slot) -> Self {
        Self {
            room_id,
            player1,
            player2: Slot::vacant(),
            played_cells: Vec::new(),
            win_cells: Vec::new(),
            won: false,
        }
    }

    /// Returns `true` when both slots are online, i.e. the room is full.
    pub fn is_full(&self) -> bool {
        self.player1.online && self.player2.online
    }

    /// The first offline slot, `player1` preferred when both are
    /// offline. `None` when the room is full.
    pub fn open_slot(&self) -> Option<SlotId> {
        if !self.player1.online {
            Some(SlotId::Player1)
        } else if !self.player2.online {
            Some(SlotId::Player2)
        } else {
            None
        }
    }

    /// Which slot's stored connection id matches, if any. Used both to
    /// identify a departing connection and to match a reconnection
    /// hint against the slot it previously held.
    pub fn slot_holding(
        &self,
        connection_id: ConnectionId,
    ) -> Option<SlotId> {
        if self.player1.holds(connection_id) {
            Some(SlotId::Player1)
        } else if self.player2.holds(connection_id) {
            Some(SlotId::Player2)
        } else {
            None
        }
    }

    /// Borrows a slot by id.
    pub fn slot(&self, id: SlotId) -> &Slot {
        match id {
            SlotId::Player1 => &self.player1,
            SlotId::Player2 => &self.player2,
        }
    }

    /// Mutably borrows a slot by id.
    pub fn slot_mut(&mut self, id: SlotId) -> &mut Slot {
        match id {
            SlotId::Player1 => &mut self.player1,
            SlotId::Player2 => &mut self.player2,
        }
    }

    /// Returns `true` if this cell already appears in the move log.
    pub fn cell_played(&self, cell: &CellKey) -> bool {
        self.played_cells
            .iter()
            .any(|played| &played.clicked_at == cell)
    }

    /// Clears the move log and the reserved win fields.
    pub fn reset_board(&mut self) {
        self.played_cells.clear();
        self.win_cells.clear();
        self.won = false;
    }
}

// =========================================================================
// Tests
// =========================================================================
