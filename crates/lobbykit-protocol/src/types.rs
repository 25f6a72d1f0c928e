//! Event types for lobbykit's wire format.
//!
//! Every message on the wire is a JSON object of the shape
//! `{"event": "<name>", "data": <payload>}`; events without a payload
//! omit `data` entirely. The kebab-case event names are part of the
//! protocol and must not change.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// LobbyCode
// ---------------------------------------------------------------------------

/// A short, human-typeable lobby identifier.
///
/// Newtype over `String` so a lobby code can't be confused with an
/// arbitrary payload string. `#[serde(transparent)]` keeps the wire
/// representation a plain JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LobbyCode(pub String);

impl LobbyCode {
    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LobbyCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// ClientEvent: inbound
// ---------------------------------------------------------------------------

/// Events a client sends to the server.
///
/// The `create-lobby`/`join-lobby`/`share-information`/`synchronise-lobby`
/// names belong to the host-aware lobby profile; `create-room`/`join-room`
/// are the legacy room profile. A server runs exactly one profile and
/// ignores events from the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientEvent {
    /// Request to create and join a new lobby. The payload is free-form
    /// player info; the server relays nothing from it (it is accepted
    /// for wire compatibility and otherwise ignored).
    #[serde(rename = "create-lobby")]
    CreateLobby(String),

    /// Request to join the lobby with the given code.
    #[serde(rename = "join-lobby")]
    JoinLobby(LobbyCode),

    /// Opaque payload to relay to the sender's lobby peers.
    #[serde(rename = "share-information")]
    ShareInformation(String),

    /// Opaque state snapshot to relay to the sender's lobby peers.
    /// Lobby profile only.
    #[serde(rename = "synchronise-lobby")]
    SynchroniseLobby(String),

    /// Legacy room profile: create and join a room.
    #[serde(rename = "create-room")]
    CreateRoom(String),

    /// Legacy room profile: join the room with the given code.
    #[serde(rename = "join-room")]
    JoinRoom(LobbyCode),
}

// ---------------------------------------------------------------------------
// ServerEvent: outbound
// ---------------------------------------------------------------------------

/// Events the server sends to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// Sent to the host only, after a successful create.
    #[serde(rename = "lobby-created")]
    LobbyCreated(LobbyCode),

    /// Sent to the joiner only, after a successful join.
    #[serde(rename = "lobby-joined")]
    LobbyJoined,

    /// Sent to every remaining member when their lobby closes.
    #[serde(rename = "lobby-closed")]
    LobbyClosed,

    /// Relayed payload from a lobby peer.
    #[serde(rename = "information-shared")]
    InformationShared(String),

    /// Relayed state snapshot from a lobby peer.
    #[serde(rename = "lobby-synchronised")]
    LobbySynchronised(String),

    /// Legacy room profile: sent to the creator after a successful create.
    #[serde(rename = "room-created")]
    RoomCreated(LobbyCode),

    /// Legacy room profile: sent to the joiner after a successful join.
    #[serde(rename = "room-joined")]
    RoomJoined,

    /// A request failed. `code` follows HTTP-style conventions
    /// (404 = unknown lobby code, 409 = conflict, 503 = exhausted).
    #[serde(rename = "error")]
    Error { code: u16, message: String },
}

// =========================================================================
// Tests
// =========================================================================
