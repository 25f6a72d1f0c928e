//! # lobbykit
//!
//! Real-time lobby coordination service: clients connect over a
//! WebSocket, one client creates a lobby, others join it with a short
//! code, and opaque payloads are relayed to the lobby's membership.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lobbykit::LobbyServer;
//!
//! # async fn run() -> Result<(), lobbykit::LobbyKitError> {
//! let server = LobbyServer::builder()
//!     .bind("0.0.0.0:3000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod error;
mod gateway;
mod handler;
mod relay;
mod server;

pub use error::LobbyKitError;
pub use gateway::Gateway;
pub use server::{LobbyServer, LobbyServerBuilder};

pub use lobbykit_protocol::{
    ClientEvent, Codec, JsonCodec, LobbyCode, ServerEvent,
};
pub use lobbykit_registry::{Profile, RegistryConfig};
pub use lobbykit_transport::ConnectionId;
