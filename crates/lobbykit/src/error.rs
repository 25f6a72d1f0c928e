//! Unified error type for the lobbykit server.

use lobbykit_protocol::ProtocolError;
use lobbykit_registry::RegistryError;
use lobbykit_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attributes auto-generate `From` impls, so `?` converts
/// sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum LobbyKitError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A registry-level error (capacity, not found, full).
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
