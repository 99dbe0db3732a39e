//! `TandemServer` builder and accept loop.
//!
//! This is the entry point for running a Tandem server. It ties
//! together all the layers: transport, protocol, store, and the room
//! core, and spawns a handler task per accepted connection.

use std::sync::Arc;

use tandem_protocol::JsonCodec;
use tandem_room::RoomCore;
use tandem_store::RoomStore;
use tandem_transport::{Transport, WebSocketTransport};

use crate::handler::handle_connection;
use crate::health::HealthServer;
use crate::registry::ConnectionRegistry;
use crate::{ServerConfig, TandemError};

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState<S: RoomStore> {
    pub(crate) core: RoomCore<S, ConnectionRegistry>,
    pub(crate) registry: ConnectionRegistry,
    pub(crate) codec: JsonCodec,
}

/// Builder for configuring and starting a Tandem server.
///
/// # Example
///
/// ```rust,ignore
/// use tandem::prelude::*;
///
/// let server = TandemServerBuilder::new()
///     .bind("0.0.0.0:3000")
///     .build(MemoryStore::new())
///     .await?;
/// server.run().await
/// ```
pub struct TandemServerBuilder {
    bind_addr: String,
    health_addr: Option<String>,
}

impl TandemServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            health_addr: None,
        }
    }

    /// Builder preconfigured from a [`ServerConfig`].
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            bind_addr: config.bind_addr.clone(),
            health_addr: config.health_addr.clone(),
        }
    }

    /// Sets the address to bind the WebSocket listener to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Enables the liveness endpoint on the given address.
    pub fn health(mut self, addr: &str) -> Self {
        self.health_addr = Some(addr.to_string());
        self
    }

    /// Binds the listeners and assembles the server over the given
    /// store.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`, the stack the web
    /// client speaks.
    pub async fn build<S: RoomStore>(
        self,
        store: S,
    ) -> Result<TandemServer<S>, TandemError> {
        let transport =
            WebSocketTransport::bind(&self.bind_addr).await?;
        let health = match &self.health_addr {
            Some(addr) => Some(HealthServer::bind(addr).await?),
            None => None,
        };

        let registry = ConnectionRegistry::new();
        let state = Arc::new(ServerState {
            core: RoomCore::new(store, registry.clone()),
            registry,
            codec: JsonCodec,
        });

        Ok(TandemServer {
            transport,
            state,
            health,
        })
    }
}

impl Default for TandemServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Tandem server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct TandemServer<S: RoomStore> {
    transport: WebSocketTransport,
    state: Arc<ServerState<S>>,
    health: Option<HealthServer>,
}

impl<S: RoomStore> TandemServer<S> {
    /// Creates a new builder.
    pub fn builder() -> TandemServerBuilder {
        TandemServerBuilder::new()
    }

    /// Returns the local address the WebSocket listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Returns the local address of the liveness endpoint, if enabled.
    pub fn health_addr(&self) -> Option<std::net::SocketAddr> {
        self.health
            .as_ref()
            .and_then(|health| health.local_addr().ok())
    }

    /// Runs the server accept loop.
    ///
    /// Spawns the liveness endpoint (when configured) and a handler
    /// task for each accepted connection. Runs until the process is
    /// terminated.
    pub async fn run(mut self) -> Result<(), TandemError> {
        if let Some(health) = self.health.take() {
            tokio::spawn(async move {
                if let Err(e) = health.run().await {
                    tracing::error!(
                        error = %e, "health endpoint failed"
                    );
                }
            });
        }

        tracing::info!("Tandem server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_connection(conn, state).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
