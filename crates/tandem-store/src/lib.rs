//! Durable room record storage for Tandem.
//!
//! The room core reads and writes whole [`Room`](tandem_protocol::Room)
//! documents through the [`RoomStore`] trait: find by id, full-document
//! upsert, delete. The trait is deliberately that small: it is the
//! exact surface the lifecycle engine needs, and nothing more.
//!
//! [`MemoryStore`] is the in-process implementation. A document
//! database adapter would implement the same trait.

#![allow(async_fn_in_trait)]

mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::RoomStore;
