//! Wire protocol for Tandem.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Events** ([`ClientEvent`], [`ServerEvent`], [`Severity`]) — the
//!   structured messages that travel on the wire.
//! - **Room document** ([`Room`], [`Slot`], [`PlayedCell`]) — the full
//!   room record. It is both the durable shape the store persists and a
//!   wire shape, because `room-update` broadcasts carry the whole
//!   document.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how messages are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while encoding
//!   or decoding.
//!
//! The protocol layer sits between transport (raw frames) and the room
//! core. It doesn't know about connections or persistence — it only
//! knows the shapes.

mod codec;
mod error;
mod room;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use room::{PlayedCell, Room, Slot, SlotId};
pub use types::{CellKey, ClientEvent, RoomId, Severity, ServerEvent};

// Connection identity is owned by the transport; re-exported here so
// higher layers only need the protocol crate for identity types.
pub use tandem_transport::ConnectionId;
