//! The room lifecycle engine: create, join, reconnect, disconnect.
//!
//! Every operation here is a read-modify-write against the store,
//! serialized per room through the shared lock registry, followed by
//! fire-and-forget notifications through the gateway. The engine also
//! owns the session directory, since it is the only component that
//! learns which room a connection ends up in.

use std::sync::Arc;

use tandem_protocol::{
    Room, RoomId, ServerEvent, Severity, Slot, SlotId,
};
use tandem_store::RoomStore;
use tandem_transport::ConnectionId;
use tokio::sync::Mutex;

use crate::context::RoomContext;
use crate::{Gateway, RoomError, SessionDirectory, room_id};

/// How a join request was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// A fresh participant took the given slot.
    Joined(SlotId),

    /// A returning participant was matched back to a slot, or to no
    /// slot when the hint matched neither stored connection id. The
    /// no-match case still persists and broadcasts; see DESIGN.md.
    Reconnected(Option<SlotId>),

    /// The room had been deleted while the caller was its sole
    /// occupant; it was recreated under the same id.
    Resurrected,
}

/// Create / join / reconnect / disconnect semantics for rooms.
pub struct LifecycleEngine<S, G> {
    ctx: Arc<RoomContext<S, G>>,
    directory: Mutex<SessionDirectory>,
}

impl<S: RoomStore, G: Gateway> LifecycleEngine<S, G> {
    pub(crate) fn new(ctx: Arc<RoomContext<S, G>>) -> Self {
        Self {
            ctx,
            directory: Mutex::new(SessionDirectory::new()),
        }
    }

    /// Opens a new room with the caller as `player1`.
    ///
    /// When no id is supplied a fresh token is generated. The caller is
    /// subscribed to the room's broadcast group only after the record
    /// is saved, so a failed create leaves no dangling subscription.
    pub async fn create_room(
        &self,
        conn: ConnectionId,
        name: &str,
        requested: Option<RoomId>,
    ) -> Result<RoomId, RoomError> {
        let room_id = requested.unwrap_or_else(room_id::generate);
        let _guard = self.ctx.locks.acquire(&room_id).await;
        self.create_locked(conn, name, room_id).await
    }

    /// Create path shared with resurrection; the caller already holds
    /// the room lock.
    async fn create_locked(
        &self,
        conn: ConnectionId,
        name: &str,
        room_id: RoomId,
    ) -> Result<RoomId, RoomError> {
        let room =
            Room::new(room_id.clone(), Slot::occupied(conn, name));

        let saved = match self.ctx.store.save(room).await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(
                    %room_id, %conn, error = %e, "create failed"
                );
                self.alert(
                    conn,
                    "Error creating room :(",
                    Severity::Error,
                );
                return Err(e.into());
            }
        };

        self.directory.lock().await.insert(conn, room_id.clone());
        self.ctx.gateway.subscribe(conn, &room_id);
        self.ctx
            .gateway
            .send_room(&room_id, ServerEvent::RoomUpdate(saved));
        self.ctx.gateway.send(
            conn,
            ServerEvent::CreatedRoom {
                name: name.to_string(),
                room_id: room_id.clone(),
            },
        );

        tracing::info!(%room_id, %conn, name, "room created");
        Ok(room_id)
    }

    /// Seats a caller in an existing room, as a fresh participant or a
    /// returning one.
    ///
    /// `reconnect_hint` is the connection id the caller previously
    /// held. Its presence switches the not-found and room-found
    /// branches into reconnection semantics.
    pub async fn join_room(
        &self,
        conn: ConnectionId,
        name: &str,
        room_id: RoomId,
        reconnect_hint: Option<ConnectionId>,
    ) -> Result<JoinOutcome, RoomError> {
        if !room_id::is_valid(&room_id) {
            self.reject(conn, "Invalid Room ID");
            return Err(RoomError::InvalidRoomId(room_id));
        }

        let _guard = self.ctx.locks.acquire(&room_id).await;

        let existing = match self.ctx.store.find(&room_id).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(
                    %room_id, %conn, error = %e, "join lookup failed"
                );
                self.alert(conn, "Server error :(", Severity::Danger);
                return Err(e.into());
            }
        };

        let Some(mut room) = existing else {
            return match reconnect_hint {
                // The record was deleted while this caller was its
                // sole occupant; resurrect it under the same id.
                Some(_) => {
                    self.create_locked(conn, name, room_id).await?;
                    Ok(JoinOutcome::Resurrected)
                }
                None => {
                    self.reject(conn, "Room not found :(");
                    Err(RoomError::NotFound(room_id))
                }
            };
        };

        let outcome = match reconnect_hint {
            None => {
                let Some(open) = room.open_slot() else {
                    self.reject(conn, "Room is full :(");
                    return Err(RoomError::RoomFull(room_id));
                };
                room.slot_mut(open).occupy(conn, name);
                JoinOutcome::Joined(open)
            }
            Some(hint) => {
                let matched = room.slot_holding(hint);
                if let Some(slot) = matched {
                    room.slot_mut(slot).occupy(conn, name);
                }
                JoinOutcome::Reconnected(matched)
            }
        };

        let saved = match self.ctx.store.save(room).await {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(
                    %room_id, %conn, error = %e, "join save failed"
                );
                self.alert(conn, "Server error :(", Severity::Danger);
                return Err(e.into());
            }
        };

        self.directory.lock().await.insert(conn, room_id.clone());
        self.ctx.gateway.subscribe(conn, &room_id);
        self.ctx
            .gateway
            .send_room(&room_id, ServerEvent::RoomUpdate(saved.clone()));
        self.ctx.gateway.send(
            conn,
            ServerEvent::JoinedRoom {
                name: name.to_string(),
                room_id: room_id.clone(),
            },
        );
        self.ctx.gateway.send_room_except(
            &room_id,
            conn,
            ServerEvent::Alert {
                message: format!("{name} joined the room :)"),
                severity: Severity::Info,
            },
        );
        self.alert(conn, "You joined the room :)", Severity::Success);
        self.ctx
            .gateway
            .send_room(&room_id, ServerEvent::GameStatusUpdate(saved));

        tracing::info!(
            %room_id, %conn, name, outcome = ?outcome, "joined room"
        );
        Ok(outcome)
    }

    /// Reacts to the transport reporting a closing connection.
    ///
    /// Decides between deleting the room (the departure leaves no
    /// online player) and downgrading the departing slot to offline
    /// pending reconnection. Store failures here have no caller to
    /// alert; they are logged and swallowed.
    pub async fn handle_disconnect(&self, conn: ConnectionId) {
        let Some(room_id) = self.directory.lock().await.remove(conn)
        else {
            tracing::debug!(%conn, "closing connection was not in a room");
            return;
        };

        let _guard = self.ctx.locks.acquire(&room_id).await;

        let mut room = match self.ctx.store.find(&room_id).await {
            Ok(Some(room)) => room,
            Ok(None) => {
                tracing::debug!(%room_id, %conn, "room already deleted");
                return;
            }
            Err(e) => {
                tracing::warn!(
                    %room_id, %conn, error = %e,
                    "disconnect lookup failed"
                );
                return;
            }
        };

        // A slot already offline at load time means the departing
        // connection's peer is gone: this departure leaves zero online
        // players, so the record goes away. No broadcast, since nobody
        // is left subscribed.
        if !room.player1.online || !room.player2.online {
            if let Err(e) = self.ctx.store.delete(&room_id).await {
                tracing::warn!(
                    %room_id, error = %e, "room delete failed"
                );
                return;
            }
            self.ctx.locks.forget(&room_id).await;
            tracing::info!(
                %room_id, %conn, "room deleted, no online players left"
            );
            return;
        }

        let Some(slot_id) = room.slot_holding(conn) else {
            tracing::debug!(
                %room_id, %conn, "closing connection holds no slot"
            );
            return;
        };
        let name =
            room.slot(slot_id).name.clone().unwrap_or_default();
        room.slot_mut(slot_id).go_offline(conn);

        match self.ctx.store.save(room).await {
            Ok(saved) => {
                self.ctx.gateway.send_room_except(
                    &room_id,
                    conn,
                    ServerEvent::Alert {
                        message: format!("{name} left the room :("),
                        severity: Severity::Warning,
                    },
                );
                self.ctx.gateway.send_room(
                    &room_id,
                    ServerEvent::GameStatusUpdate(saved.clone()),
                );
                self.ctx
                    .gateway
                    .send_room(&room_id, ServerEvent::RoomUpdate(saved));
                tracing::info!(
                    %room_id, %conn, slot = %slot_id,
                    "player went offline"
                );
            }
            Err(e) => {
                tracing::warn!(
                    %room_id, %conn, error = %e,
                    "disconnect save failed"
                );
            }
        }
    }

    fn alert(
        &self,
        conn: ConnectionId,
        message: &str,
        severity: Severity,
    ) {
        self.ctx.gateway.send(
            conn,
            ServerEvent::Alert {
                message: message.to_string(),
                severity,
            },
        );
    }

    /// Rejection path: tell the caller to navigate away, then why.
    fn reject(&self, conn: ConnectionId, message: &str) {
        self.ctx
            .gateway
            .send(conn, ServerEvent::Redirect { path: "/".into() });
        self.alert(conn, message, Severity::Danger);
    }
}
