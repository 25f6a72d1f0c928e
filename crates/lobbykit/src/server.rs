//! `LobbyServer` builder and accept loop.
//!
//! Ties the layers together: transport → protocol → registry → relay.

use std::sync::Arc;

use lobbykit_protocol::{Codec, JsonCodec};
use lobbykit_registry::{LobbyRegistry, Profile, RegistryConfig};
use lobbykit_transport::{Transport, WebSocketConnection, WebSocketTransport};
use tokio::sync::Mutex;

use crate::handler::handle_connection;
use crate::{Gateway, LobbyKitError};

/// Shared server state passed to each connection handler task.
///
/// Wrapped in `Arc` so it can be cheaply cloned across tasks. All
/// registry mutations go through the single `Mutex<LobbyRegistry>`,
/// which serializes the capacity check / code draw / insert sequence
/// and the membership bookkeeping. Membership snapshots are copied out
/// before any send so no network I/O happens under this lock.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) registry: Mutex<LobbyRegistry>,
    pub(crate) gateway: Gateway<WebSocketConnection>,
    pub(crate) codec: C,
    /// Copy of the registry's profile, readable without the lock.
    pub(crate) profile: Profile,
}

/// Builder for configuring and starting a lobby server.
///
/// # Example
///
/// ```rust,no_run
/// use lobbykit::{LobbyServer, RegistryConfig};
///
/// # async fn run() -> Result<(), lobbykit::LobbyKitError> {
/// let server = LobbyServer::builder()
///     .bind("0.0.0.0:3000")
///     .registry_config(RegistryConfig::default())
///     .build()
///     .await?;
/// server.run().await
/// # }
/// ```
pub struct LobbyServerBuilder {
    bind_addr: String,
    registry_config: RegistryConfig,
}

impl LobbyServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            registry_config: RegistryConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Sets the registry configuration (profile, capacity, code length).
    pub fn registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry_config = config;
        self
    }

    /// Binds the transport and builds the server.
    ///
    /// Uses `JsonCodec` and the WebSocket transport.
    pub async fn build(self) -> Result<LobbyServer<JsonCodec>, LobbyKitError> {
        let transport = WebSocketTransport::bind(&self.bind_addr).await?;

        let profile = self.registry_config.profile;
        let state = Arc::new(ServerState {
            registry: Mutex::new(LobbyRegistry::new(self.registry_config)),
            gateway: Gateway::new(),
            codec: JsonCodec,
            profile,
        });

        Ok(LobbyServer { transport, state })
    }
}

impl Default for LobbyServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running lobby server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct LobbyServer<C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<C>>,
}

impl LobbyServer<JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> LobbyServerBuilder {
        LobbyServerBuilder::new()
    }
}

impl<C: Codec> LobbyServer<C> {
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// Runs the server accept loop.
    ///
    /// Accepts incoming connections and spawns a handler task for each.
    /// Runs until the process is terminated.
    pub async fn run(mut self) -> Result<(), LobbyKitError> {
        tracing::info!("lobbykit server running");

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
