//! Per-connection handler: event dispatch and disconnect handling.
//!
//! Each accepted connection gets its own Tokio task running this
//! handler. The flow is:
//!   1. Register the connection with the gateway
//!   2. Loop: receive events → dispatch to registry or relay
//!   3. On close: unregister, then let the registry resolve the
//!      disconnect (host → lobby closure, member → removal)

use std::sync::Arc;

use lobbykit_protocol::{ClientEvent, Codec, ServerEvent};
use lobbykit_registry::{DisconnectOutcome, Profile, RegistryError};
use lobbykit_transport::{Connection, ConnectionId, WebSocketConnection};

use crate::relay;
use crate::server::ServerState;
use crate::LobbyKitError;

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WebSocketConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), LobbyKitError> {
    let conn_id = conn.id();
    state.gateway.register(conn.clone()).await;

    loop {
        match conn.recv().await {
            Ok(Some(data)) => {
                let event: ClientEvent = match state.codec.decode(&data) {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::debug!(
                            %conn_id, error = %e, "failed to decode event"
                        );
                        continue;
                    }
                };
                dispatch_event(&state, conn_id, event).await?;
            }
            Ok(None) => {
                tracing::debug!(%conn_id, "connection closed cleanly");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "recv error");
                break;
            }
        }
    }

    // Unregister first so closure notifications skip the dead channel.
    state.gateway.unregister(conn_id).await;
    handle_disconnect(&state, conn_id).await?;
    Ok(())
}

/// Routes one inbound event. Events belonging to the inactive profile
/// are logged and ignored; the two vocabularies are never mixed on one
/// registry.
async fn dispatch_event<C: Codec>(
    state: &Arc<ServerState<C>>,
    conn_id: ConnectionId,
    event: ClientEvent,
) -> Result<(), LobbyKitError> {
    match (state.profile, event) {
        (Profile::Lobby, ClientEvent::CreateLobby(_player_info)) => {
            create(state, conn_id).await
        }
        (Profile::Lobby, ClientEvent::JoinLobby(code)) => {
            join(state, conn_id, code).await
        }
        (Profile::Lobby, ClientEvent::SynchroniseLobby(snapshot)) => {
            relay::synchronise_lobby(state, conn_id, snapshot).await
        }
        (Profile::Room, ClientEvent::CreateRoom(_player_info)) => {
            create(state, conn_id).await
        }
        (Profile::Room, ClientEvent::JoinRoom(code)) => {
            join(state, conn_id, code).await
        }
        (_, ClientEvent::ShareInformation(payload)) => {
            relay::share_information(state, conn_id, payload).await
        }
        (profile, event) => {
            tracing::debug!(
                %conn_id,
                %profile,
                ?event,
                "event does not match the active profile, ignoring"
            );
            Ok(())
        }
    }
}

/// Creates a lobby for `conn_id` and acknowledges the creator.
///
/// Capacity rejection is log-only: the source behavior expects no
/// client feedback for that case. Every other failure is reported back
/// as an `error` event.
async fn create<C: Codec>(
    state: &Arc<ServerState<C>>,
    conn_id: ConnectionId,
) -> Result<(), LobbyKitError> {
    let result = {
        let mut registry = state.registry.lock().await;
        registry.create_lobby(conn_id)
    };

    match result {
        Ok(code) => {
            let ack = match state.profile {
                Profile::Lobby => ServerEvent::LobbyCreated(code),
                Profile::Room => ServerEvent::RoomCreated(code),
            };
            send_event(state, conn_id, &ack).await
        }
        Err(RegistryError::CapacityExceeded(open)) => {
            tracing::warn!(%conn_id, open, "lobby capacity reached, create rejected");
            Ok(())
        }
        Err(e) => {
            tracing::warn!(%conn_id, error = %e, "create failed");
            send_error(state, conn_id, &e).await
        }
    }
}

/// Joins `conn_id` to the lobby named by `code` and acknowledges it.
async fn join<C: Codec>(
    state: &Arc<ServerState<C>>,
    conn_id: ConnectionId,
    code: lobbykit_protocol::LobbyCode,
) -> Result<(), LobbyKitError> {
    let result = {
        let mut registry = state.registry.lock().await;
        registry.join_lobby(conn_id, &code)
    };

    match result {
        Ok(()) => {
            let ack = match state.profile {
                Profile::Lobby => ServerEvent::LobbyJoined,
                Profile::Room => ServerEvent::RoomJoined,
            };
            send_event(state, conn_id, &ack).await
        }
        Err(e) => {
            tracing::debug!(%conn_id, %code, error = %e, "join failed");
            send_error(state, conn_id, &e).await
        }
    }
}

/// Resolves a dropped connection and notifies remaining members if its
/// lobby closed.
async fn handle_disconnect<C: Codec>(
    state: &Arc<ServerState<C>>,
    conn_id: ConnectionId,
) -> Result<(), LobbyKitError> {
    let outcome = {
        let mut registry = state.registry.lock().await;
        registry.handle_disconnect(conn_id)
    };

    if let DisconnectOutcome::LobbyClosed { code, members } = outcome {
        tracing::debug!(
            %code,
            notified = members.len(),
            "notifying members of closure"
        );
        if !members.is_empty() {
            let bytes = state.codec.encode(&ServerEvent::LobbyClosed)?;
            state.gateway.send_many(&members, &bytes).await;
        }
    }
    Ok(())
}

/// Encodes one event and delivers it to one connection.
pub(crate) async fn send_event<C: Codec>(
    state: &Arc<ServerState<C>>,
    conn_id: ConnectionId,
    event: &ServerEvent,
) -> Result<(), LobbyKitError> {
    let bytes = state.codec.encode(event)?;
    state.gateway.send(conn_id, &bytes).await;
    Ok(())
}

/// Reports a registry rejection back to the requesting connection.
async fn send_error<C: Codec>(
    state: &Arc<ServerState<C>>,
    conn_id: ConnectionId,
    error: &RegistryError,
) -> Result<(), LobbyKitError> {
    let code = match error {
        RegistryError::NotFound(_) => 404,
        RegistryError::LobbyFull(_) | RegistryError::AlreadyInLobby(..) => 409,
        RegistryError::CodeGenerationExhausted(_) => 503,
        RegistryError::CapacityExceeded(_) => 503,
    };
    send_event(
        state,
        conn_id,
        &ServerEvent::Error {
            code,
            message: error.to_string(),
        },
    )
    .await
}
