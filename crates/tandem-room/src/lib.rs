//! Room lifecycle management for Tandem.
//!
//! This crate is the core of the system: the state machine that decides
//! how a two-player room is created, how its slots are filled and
//! vacated, how a silent drop is distinguished from an intentional
//! leave, and when the durable record is deleted versus kept alive
//! pending reconnection.
//!
//! # Key types
//!
//! - [`RoomCore`] — builds the engine/relay pair over a store and gateway
//! - [`LifecycleEngine`] — create / join / reconnect / disconnect
//! - [`MoveRelay`] — relays and persists moves, handles restarts
//! - [`SessionDirectory`] — live connection → room mapping
//! - [`Gateway`] — the broadcast seam implemented by the server layer
//!
//! Every room mutation goes through a per-room async lock, so two
//! events racing on the same record (the classic double-disconnect, or
//! two moves on the same cell) are serialized instead of interleaving
//! their read and write phases.

#![allow(async_fn_in_trait)]

mod context;
mod directory;
mod engine;
mod error;
mod gateway;
mod relay;
pub mod room_id;

use std::sync::Arc;

use tandem_store::RoomStore;

pub use directory::SessionDirectory;
pub use engine::{JoinOutcome, LifecycleEngine};
pub use error::RoomError;
pub use gateway::Gateway;
pub use relay::MoveRelay;

/// The assembled room core: one lifecycle engine and one move relay
/// sharing the same store, gateway, and per-room locks.
pub struct RoomCore<S: RoomStore, G: Gateway> {
    pub engine: LifecycleEngine<S, G>,
    pub relay: MoveRelay<S, G>,
}

impl<S: RoomStore, G: Gateway> RoomCore<S, G> {
    /// Wires the engine and relay over shared collaborators.
    pub fn new(store: S, gateway: G) -> Self {
        let ctx = Arc::new(context::RoomContext::new(store, gateway));
        Self {
            engine: LifecycleEngine::new(Arc::clone(&ctx)),
            relay: MoveRelay::new(ctx),
        }
    }
}
