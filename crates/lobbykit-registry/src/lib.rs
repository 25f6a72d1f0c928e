//! Lobby lifecycle management for lobbykit.
//!
//! The registry is the authoritative state machine of the service: it
//! allocates lobby codes, tracks which connection belongs to which lobby,
//! enforces the open-lobby capacity ceiling, and decides what happens
//! when a connection drops.
//!
//! # Key types
//!
//! - [`LobbyRegistry`]: creates, tracks, and closes lobbies
//! - [`Lobby`]: one named group of connections
//! - [`CodeGenerator`]: produces short base-36 lobby codes
//! - [`RegistryConfig`] / [`Profile`]: capacity limits and the
//!   host-aware vs. legacy room profile
//! - [`RegistryError`]: rejection reasons
//!
//! The registry holds no networking: it returns membership snapshots
//! and [`DisconnectOutcome`]s, and the server layer performs delivery
//! after releasing the registry lock.

mod code;
mod config;
mod error;
mod lobby;
mod registry;

pub use code::CodeGenerator;
pub use config::{Profile, RegistryConfig};
pub use error::RegistryError;
pub use lobby::Lobby;
pub use registry::{DisconnectOutcome, LobbyRegistry};
