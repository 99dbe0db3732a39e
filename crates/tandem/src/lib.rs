//! # Tandem
//!
//! A real-time coordination server for two-player game rooms.
//!
//! Tandem keeps track of who is in which room, relays moves between the
//! two players of a room at network speed, and survives the flaky
//! reality of browser connections: a dropped player keeps their seat
//! until the peer leaves too, and can reclaim it by presenting their
//! old connection id.
//!
//! The server is intentionally game-agnostic. It never interprets board
//! positions or decides wins; it deduplicates moves, persists the room
//! record, and forwards everything else verbatim.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tandem::prelude::*;
//!
//! # async fn run() -> Result<(), TandemError> {
//! let server = TandemServerBuilder::new()
//!     .bind("0.0.0.0:3000")
//!     .build(MemoryStore::new())
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod handler;
mod health;
mod registry;
mod server;

pub use config::ServerConfig;
pub use error::TandemError;
pub use health::HealthServer;
pub use registry::ConnectionRegistry;
pub use server::{TandemServer, TandemServerBuilder};

/// One-stop imports for running or embedding the server.
pub mod prelude {
    pub use crate::{
        ServerConfig, TandemError, TandemServer, TandemServerBuilder,
    };
    pub use tandem_protocol::{
        CellKey, ClientEvent, Room, RoomId, ServerEvent, Severity,
        Slot, SlotId,
    };
    pub use tandem_room::{Gateway, JoinOutcome, RoomError};
    pub use tandem_store::{MemoryStore, RoomStore, StoreError};
    pub use tandem_transport::ConnectionId;
}
