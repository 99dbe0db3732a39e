//! Per-connection handler: outbox pumping and inbound dispatch.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. One loop serves both directions: events queued by the room
//! core drain to the socket, frames from the client decode into
//! [`ClientEvent`]s and dispatch into the engine or relay.

use std::sync::Arc;

use tandem_protocol::{ClientEvent, Codec, ServerEvent};
use tandem_store::RoomStore;
use tandem_transport::{
    Connection, ConnectionId, WebSocketConnection,
};
use tokio::sync::mpsc;

use crate::TandemError;
use crate::server::ServerState;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<S: RoomStore>(
    conn: WebSocketConnection,
    state: Arc<ServerState<S>>,
) -> Result<(), TandemError> {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, "handling new connection");

    let mut outbox = state.registry.register(conn_id);

    let result = serve(&conn, &state, &mut outbox).await;

    // Room bookkeeping first: the disconnect may broadcast to the peer,
    // which needs this connection's group membership resolved through
    // the still-registered state. Then drop the delivery state.
    state.core.engine.handle_disconnect(conn_id).await;
    state.registry.remove(conn_id);

    tracing::debug!(%conn_id, "connection closed");
    result
}

async fn serve<S: RoomStore>(
    conn: &WebSocketConnection,
    state: &Arc<ServerState<S>>,
    outbox: &mut mpsc::UnboundedReceiver<ServerEvent>,
) -> Result<(), TandemError> {
    let conn_id = conn.id();

    loop {
        // Both arms are cancel safe: an unpolled inbound frame stays
        // queued in the socket, an undelivered event stays in the
        // channel.
        tokio::select! {
            event = outbox.recv() => {
                // Closed outbox means the registry dropped us.
                let Some(event) = event else { break };
                let bytes = state.codec.encode(&event)?;
                conn.send(&bytes).await?;
            }
            inbound = conn.recv() => {
                match inbound {
                    Ok(Some(data)) => {
                        dispatch(conn_id, state, &data).await;
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::debug!(
                            %conn_id, error = %e, "recv error"
                        );
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Decodes one inbound frame and routes it to the room core.
///
/// An undecodable frame is logged and skipped; one bad client must not
/// take its connection down. Rejected operations were already answered
/// by the engine (redirect plus alert), so errors here are only logged.
async fn dispatch<S: RoomStore>(
    conn_id: ConnectionId,
    state: &Arc<ServerState<S>>,
    data: &[u8],
) {
    let event: ClientEvent = match state.codec.decode(data) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(
                %conn_id, error = %e, "undecodable frame, skipped"
            );
            return;
        }
    };

    match event {
        ClientEvent::CreateRoom { name, room_id } => {
            if let Err(e) = state
                .core
                .engine
                .create_room(conn_id, &name, room_id)
                .await
            {
                tracing::debug!(
                    %conn_id, error = %e, "create-room rejected"
                );
            }
        }
        ClientEvent::JoinRoom {
            name,
            room_id,
            old_connection_id,
        } => {
            if let Err(e) = state
                .core
                .engine
                .join_room(conn_id, &name, room_id, old_connection_id)
                .await
            {
                tracing::debug!(
                    %conn_id, error = %e, "join-room rejected"
                );
            }
        }
        ClientEvent::OnUserSelection {
            room_id,
            clicked_at,
            clicked_by,
            played_by,
        } => {
            state
                .core
                .relay
                .submit_move(
                    conn_id, room_id, clicked_at, clicked_by, played_by,
                )
                .await;
        }
        ClientEvent::GameRestart { room_id } => {
            state.core.relay.restart_game(conn_id, room_id).await;
        }
    }
}
