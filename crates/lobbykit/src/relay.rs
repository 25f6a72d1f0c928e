//! Relay engine: forwards opaque payloads between lobby members.
//!
//! Payloads are never inspected or validated; they go out verbatim
//! under `information-shared` / `lobby-synchronised`. Both operations
//! are fire-and-forget: no acknowledgement, best-effort delivery to
//! whoever is connected at the moment of the call. The membership
//! snapshot is taken under the registry lock, the lock is released,
//! and only then does any send happen.

use std::sync::Arc;

use lobbykit_protocol::{Codec, ServerEvent};
use lobbykit_registry::Profile;
use lobbykit_transport::ConnectionId;

use crate::server::ServerState;
use crate::LobbyKitError;

/// Broadcasts `payload` to every other member of the sender's lobby.
///
/// In the legacy room profile there is no per-lobby scoping at call
/// time: the payload goes to every connected client except the sender.
pub(crate) async fn share_information<C: Codec>(
    state: &Arc<ServerState<C>>,
    sender: ConnectionId,
    payload: String,
) -> Result<(), LobbyKitError> {
    let bytes = state
        .codec
        .encode(&ServerEvent::InformationShared(payload))?;

    match state.profile {
        Profile::Lobby => {
            send_to_peers(state, sender, &bytes).await;
        }
        Profile::Room => {
            state.gateway.broadcast_all(Some(sender), &bytes).await;
        }
    }
    Ok(())
}

/// Broadcasts a state snapshot to the rest of the sender's lobby.
/// Lobby profile only; the handler never routes it otherwise.
pub(crate) async fn synchronise_lobby<C: Codec>(
    state: &Arc<ServerState<C>>,
    sender: ConnectionId,
    snapshot: String,
) -> Result<(), LobbyKitError> {
    let bytes = state
        .codec
        .encode(&ServerEvent::LobbySynchronised(snapshot))?;
    send_to_peers(state, sender, &bytes).await;
    Ok(())
}

/// Snapshots the sender's lobby peers and delivers to them. A sender
/// outside any lobby is logged and dropped, not an error.
async fn send_to_peers<C: Codec>(
    state: &Arc<ServerState<C>>,
    sender: ConnectionId,
    bytes: &[u8],
) {
    let peers = {
        let registry = state.registry.lock().await;
        registry.peers_of(sender)
    };

    match peers {
        Some((code, peers)) => {
            tracing::debug!(
                %sender,
                %code,
                peers = peers.len(),
                "relaying to lobby peers"
            );
            state.gateway.send_many(&peers, bytes).await;
        }
        None => {
            tracing::debug!(
                %sender,
                "relay from a connection outside any lobby, dropping"
            );
        }
    }
}
