//! Integration tests for the WebSocket transport.
//!
//! These spin up a real listener and a tokio-tungstenite client to
//! verify that frames actually flow over the network, that text is the
//! outbound frame type (browser clients parse JSON text), and that a
//! clean client close surfaces as `Ok(None)`.

#[cfg(feature = "websocket")]
mod websocket {
    use tandem_transport::{Connection, Transport, WebSocketTransport};

    type ClientWs = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    async fn connect_client(addr: &str) -> ClientWs {
        let url = format!("ws://{addr}");
        let (ws, _) = tokio_tungstenite::connect_async(&url)
            .await
            .expect("client should connect");
        ws
    }

    /// Binds on a random port, returns the transport and its address.
    async fn bind_random() -> (WebSocketTransport, String) {
        let transport = WebSocketTransport::bind("127.0.0.1:0")
            .await
            .expect("should bind");
        let addr = transport
            .local_addr()
            .expect("should have local addr")
            .to_string();
        (transport, addr)
    }

    #[tokio::test]
    async fn test_websocket_accept_and_send_receive() {
        let (mut transport, addr) = bind_random().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn =
            server_handle.await.expect("task should complete");

        assert!(server_conn.id().into_inner() > 0);

        // Server sends, client receives — as a text frame.
        server_conn
            .send(br#"{"event":"restart-game"}"#)
            .await
            .expect("send should succeed");

        use futures_util::StreamExt;
        use tokio_tungstenite::tungstenite::Message;
        let msg = client_ws.next().await.unwrap().unwrap();
        match msg {
            Message::Text(text) => {
                assert_eq!(text.as_str(), r#"{"event":"restart-game"}"#);
            }
            other => panic!("expected text frame, got {other:?}"),
        }

        // Client sends, server receives.
        use futures_util::SinkExt;
        client_ws
            .send(Message::Text("hello from client".into()))
            .await
            .unwrap();

        let received = server_conn
            .recv()
            .await
            .expect("recv should succeed")
            .expect("should have data");
        assert_eq!(received, b"hello from client");

        server_conn.close().await.expect("close should succeed");
    }

    #[tokio::test]
    async fn test_websocket_recv_accepts_binary_frames() {
        let (mut transport, addr) = bind_random().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        use futures_util::SinkExt;
        use tokio_tungstenite::tungstenite::Message;
        client_ws
            .send(Message::Binary(b"raw bytes".to_vec().into()))
            .await
            .unwrap();

        let received = server_conn.recv().await.unwrap().unwrap();
        assert_eq!(received, b"raw bytes");
    }

    #[tokio::test]
    async fn test_websocket_recv_returns_none_on_client_close() {
        let (mut transport, addr) = bind_random().await;

        let server_handle = tokio::spawn(async move {
            transport.accept().await.expect("should accept")
        });

        let mut client_ws = connect_client(&addr).await;
        let server_conn = server_handle.await.unwrap();

        use futures_util::SinkExt;
        use tokio_tungstenite::tungstenite::Message;
        client_ws.send(Message::Close(None)).await.unwrap();

        let result =
            server_conn.recv().await.expect("recv should not error");
        assert!(result.is_none(), "should return None on client close");
    }

    #[tokio::test]
    async fn test_websocket_connection_ids_are_unique() {
        let (mut transport, addr) = bind_random().await;

        let server_handle = tokio::spawn(async move {
            let a = transport.accept().await.expect("first accept");
            let b = transport.accept().await.expect("second accept");
            (a, b)
        });

        let _c1 = connect_client(&addr).await;
        let _c2 = connect_client(&addr).await;

        let (a, b) = server_handle.await.unwrap();
        assert_ne!(a.id(), b.id());
    }
}
