//! Unified error type for the Tandem server.

use tandem_protocol::ProtocolError;
use tandem_room::RoomError;
use tandem_store::StoreError;
use tandem_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `tandem` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TandemError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid message).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A store-level error (backend down, record unreachable).
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A room-level error (invalid id, not found, full).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// An I/O error outside the transport, e.g. the health listener.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_protocol::RoomId;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let tandem_err: TandemError = err.into();
        assert!(matches!(tandem_err, TandemError::Transport(_)));
        assert!(tandem_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let tandem_err: TandemError = err.into();
        assert!(matches!(tandem_err, TandemError::Protocol(_)));
    }

    #[test]
    fn test_from_store_error() {
        let err = StoreError::Backend("down".into());
        let tandem_err: TandemError = err.into();
        assert!(matches!(tandem_err, TandemError::Store(_)));
    }

    #[test]
    fn test_from_room_error() {
        let err = RoomError::NotFound(RoomId::from("abc123"));
        let tandem_err: TandemError = err.into();
        assert!(matches!(tandem_err, TandemError::Room(_)));
        assert!(tandem_err.to_string().contains("abc123"));
    }
}
