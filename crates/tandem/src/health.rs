//! Liveness endpoint: one fixed JSON answer over plain HTTP.
//!
//! Deployment platforms probe this to decide whether to keep the
//! process alive. It shares nothing with the WebSocket side and answers
//! every request the same way, so a full HTTP stack would be overkill;
//! a raw TCP listener writing a canned response is enough.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const BODY: &str = r#"{"message":"I'm alive"}"#;

/// The liveness listener. Bind it, then run its accept loop.
pub struct HealthServer {
    listener: TcpListener,
}

impl HealthServer {
    /// Binds the liveness listener to the given address.
    pub async fn bind(addr: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr, "health endpoint listening");
        Ok(Self { listener })
    }

    /// Returns the local address the listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the accept loop. Every request gets the same 200 regardless
    /// of method or path.
    pub async fn run(self) -> std::io::Result<()> {
        loop {
            let (mut stream, _) = self.listener.accept().await?;
            tokio::spawn(async move {
                // Drain whatever the probe sent first; the reply does
                // not depend on it.
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;

                let response = format!(
                    "HTTP/1.1 200 OK\r\n\
                     content-type: application/json\r\n\
                     content-length: {}\r\n\
                     connection: close\r\n\
                     \r\n\
                     {}",
                    BODY.len(),
                    BODY
                );
                if let Err(e) =
                    stream.write_all(response.as_bytes()).await
                {
                    tracing::debug!(error = %e, "health reply failed");
                }
                let _ = stream.shutdown().await;
            });
        }
    }
}
