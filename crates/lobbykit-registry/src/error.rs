//! Error types for the registry layer.

use lobbykit_protocol::LobbyCode;
use lobbykit_transport::ConnectionId;

/// Rejection reasons for registry operations.
///
/// All of these are recoverable and local to the requesting connection;
/// none of them corrupt registry state.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The open-lobby ceiling was reached at create time. Carries the
    /// number of lobbies currently open.
    #[error("lobby capacity reached ({0} open)")]
    CapacityExceeded(usize),

    /// The code does not name a currently-open lobby.
    #[error("lobby {0} not found")]
    NotFound(LobbyCode),

    /// The lobby's configured member cap is reached.
    #[error("lobby {0} is full")]
    LobbyFull(LobbyCode),

    /// The connection already belongs to a lobby; a connection may be
    /// in at most one at a time.
    #[error("{0} already belongs to lobby {1}")]
    AlreadyInLobby(ConnectionId, LobbyCode),

    /// Repeated code draws all collided with open lobbies. Pathological;
    /// bounded so a create fails loudly instead of looping forever.
    #[error("no unused lobby code after {0} attempts")]
    CodeGenerationExhausted(u32),
}
