//! Process bootstrap for the lobby server.
//!
//! Configuration comes from the environment:
//! - `LOBBYD_ADDR`: bind address (default `127.0.0.1:3000`)
//! - `LOBBYD_PROFILE`: `lobby` (default) or `room`
//! - `RUST_LOG`: tracing filter (default `info`)

use lobbykit::{LobbyKitError, LobbyServer, RegistryConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), LobbyKitError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("LOBBYD_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let config = match std::env::var("LOBBYD_PROFILE").as_deref() {
        Ok("room") => RegistryConfig::room(),
        _ => RegistryConfig::default(),
    };

    tracing::info!(%addr, profile = %config.profile, "starting lobbyd");

    let server = LobbyServer::builder()
        .bind(&addr)
        .registry_config(config)
        .build()
        .await?;
    server.run().await
}
