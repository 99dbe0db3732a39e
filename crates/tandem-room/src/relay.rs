//! Move relay: board moves and restarts.
//!
//! Latency rules the ordering here. The peer-facing broadcast goes out
//! before the store round-trip, so the opponent sees the move at
//! network speed rather than database speed. Persistence then catches
//! the record up for late joiners and reconnects.

use std::sync::Arc;

use tandem_protocol::{CellKey, PlayedCell, RoomId, ServerEvent};
use tandem_store::RoomStore;
use tandem_transport::ConnectionId;

use crate::Gateway;
use crate::context::RoomContext;

/// Forwards in-game events between the players of a room.
pub struct MoveRelay<S, G> {
    ctx: Arc<RoomContext<S, G>>,
}

impl<S: RoomStore, G: Gateway> MoveRelay<S, G> {
    pub(crate) fn new(ctx: Arc<RoomContext<S, G>>) -> Self {
        Self { ctx }
    }

    /// Relays a cell selection to the sender's peer and appends it to
    /// the room's move log.
    ///
    /// The relay happens unconditionally and first. A duplicate cell
    /// (already in the log, as in a same-cell race where this sender
    /// lost) is then skipped at the persistence step, so the stored log
    /// keeps first-wins order while the doomed relay has already gone
    /// out. Store failures are logged and swallowed; the in-flight move
    /// is not retried.
    pub async fn submit_move(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
        clicked_at: CellKey,
        clicked_by: String,
        played_by: String,
    ) {
        self.ctx.gateway.send_room_except(
            &room_id,
            sender,
            ServerEvent::OnUserSelected {
                clicked_at: clicked_at.clone(),
                clicked_by: clicked_by.clone(),
                played_by,
            },
        );

        let _guard = self.ctx.locks.acquire(&room_id).await;

        let mut room = match self.ctx.store.find(&room_id).await {
            Ok(Some(room)) => room,
            Ok(None) => {
                tracing::debug!(
                    %room_id, %sender, "move for unknown room"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    %room_id, %sender, error = %e,
                    "move lookup failed"
                );
                return;
            }
        };

        if room.cell_played(&clicked_at) {
            tracing::debug!(
                %room_id, %sender, cell = %clicked_at,
                "duplicate cell, move dropped"
            );
            return;
        }

        room.played_cells.push(PlayedCell {
            clicked_at,
            clicked_by,
        });

        match self.ctx.store.save(room).await {
            Ok(saved) => {
                self.ctx
                    .gateway
                    .send_room(&room_id, ServerEvent::RoomUpdate(saved));
            }
            Err(e) => {
                tracing::warn!(
                    %room_id, %sender, error = %e, "move save failed"
                );
            }
        }
    }

    /// Relays a restart to the sender's peer and clears the room's
    /// board state, keeping both seat assignments.
    pub async fn restart_game(
        &self,
        sender: ConnectionId,
        room_id: RoomId,
    ) {
        self.ctx.gateway.send_room_except(
            &room_id,
            sender,
            ServerEvent::RestartGame,
        );

        let _guard = self.ctx.locks.acquire(&room_id).await;

        let mut room = match self.ctx.store.find(&room_id).await {
            Ok(Some(room)) => room,
            Ok(None) => {
                tracing::debug!(
                    %room_id, %sender, "restart for unknown room"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    %room_id, %sender, error = %e,
                    "restart lookup failed"
                );
                return;
            }
        };

        room.reset_board();

        if let Err(e) = self.ctx.store.save(room).await {
            tracing::warn!(
                %room_id, %sender, error = %e, "restart save failed"
            );
        } else {
            tracing::info!(%room_id, %sender, "board reset");
        }
    }
}
