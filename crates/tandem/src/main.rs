//! The Tandem server binary.

use tandem::{ServerConfig, TandemError, TandemServerBuilder};
use tandem_store::MemoryStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), TandemError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(
        addr = %config.bind_addr,
        health = config.health_addr.as_deref(),
        "starting tandem server"
    );

    let server = TandemServerBuilder::from_config(&config)
        .build(MemoryStore::new())
        .await?;
    server.run().await
}
