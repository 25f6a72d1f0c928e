//! The lobby registry: creates, tracks, and closes lobbies.

use std::collections::HashMap;

use lobbykit_protocol::LobbyCode;
use lobbykit_transport::ConnectionId;

use crate::code::CodeGenerator;
use crate::{Lobby, Profile, RegistryConfig, RegistryError};

/// What [`LobbyRegistry::handle_disconnect`] decided.
///
/// The registry mutates its own state only; the caller is responsible
/// for delivering `lobby-closed` to the returned members (after the
/// registry lock is released).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// The connection was in no lobby; nothing to do.
    NotInLobby,

    /// A non-host member dropped; its membership was removed.
    MemberRemoved { code: LobbyCode },

    /// The lobby closed: either its host disconnected, or the last
    /// member left. `members` is everyone still present at close time
    /// (the disconnected connection excluded) who should be told.
    LobbyClosed {
        code: LobbyCode,
        members: Vec<ConnectionId>,
    },
}

/// Process-wide map from lobby code to lobby state.
///
/// This is the entry point for lobby operations from the server layer.
/// The registry is not thread-safe by itself; the server owns it behind
/// a single mutex, and every mutation happens atomically under that
/// lock, from the capacity check through the insert, or from member
/// removal through eviction.
pub struct LobbyRegistry {
    config: RegistryConfig,
    generator: CodeGenerator,

    /// Open lobbies, keyed by code. Removal from this map is closure.
    lobbies: HashMap<LobbyCode, Lobby>,

    /// Maps each connection to the lobby it is currently in.
    /// A connection is in at most ONE lobby at a time (key invariant).
    member_index: HashMap<ConnectionId, LobbyCode>,
}

impl LobbyRegistry {
    /// Creates an empty registry with the given configuration.
    pub fn new(config: RegistryConfig) -> Self {
        let generator = CodeGenerator::new(config.code_length);
        Self {
            config,
            generator,
            lobbies: HashMap::new(),
            member_index: HashMap::new(),
        }
    }

    /// Returns the active profile.
    pub fn profile(&self) -> Profile {
        self.config.profile
    }

    /// Creates a new lobby with `creator` as sole member (and host, in
    /// the lobby profile), and returns its code.
    ///
    /// Rejects with [`RegistryError::CapacityExceeded`] at the open-lobby
    /// ceiling; existing lobbies are never evicted to make room. Code
    /// draws that collide with an open lobby are retried up to the
    /// configured limit.
    pub fn create_lobby(
        &mut self,
        creator: ConnectionId,
    ) -> Result<LobbyCode, RegistryError> {
        if let Some(current) = self.member_index.get(&creator) {
            return Err(RegistryError::AlreadyInLobby(
                creator,
                current.clone(),
            ));
        }
        if self.lobbies.len() >= self.config.max_lobbies {
            return Err(RegistryError::CapacityExceeded(self.lobbies.len()));
        }

        let code = self.unused_code()?;
        let lobby = Lobby::new(
            code.clone(),
            creator,
            self.config.profile.is_host_aware(),
        );
        self.lobbies.insert(code.clone(), lobby);
        self.member_index.insert(creator, code.clone());

        tracing::info!(
            %code,
            %creator,
            open = self.lobbies.len(),
            "lobby created"
        );
        Ok(code)
    }

    /// Adds `conn` to the lobby named by `code`.
    ///
    /// Unknown codes are reported as [`RegistryError::NotFound`] rather
    /// than dropped. Enforces the one-lobby-at-a-time invariant and the
    /// optional per-lobby member cap.
    pub fn join_lobby(
        &mut self,
        conn: ConnectionId,
        code: &LobbyCode,
    ) -> Result<(), RegistryError> {
        if let Some(current) = self.member_index.get(&conn) {
            return Err(RegistryError::AlreadyInLobby(
                conn,
                current.clone(),
            ));
        }

        let lobby = self
            .lobbies
            .get_mut(code)
            .ok_or_else(|| RegistryError::NotFound(code.clone()))?;

        if let Some(cap) = self.config.max_members {
            if lobby.member_count() >= cap {
                return Err(RegistryError::LobbyFull(code.clone()));
            }
        }

        lobby.insert(conn);
        let members = lobby.member_count();
        self.member_index.insert(conn, code.clone());

        tracing::info!(%code, %conn, members, "joined lobby");
        Ok(())
    }

    /// Closes the lobby named by `code` and returns the membership
    /// present at close time, so the caller can notify each member.
    ///
    /// Idempotent: an unknown or already-closed code is a no-op that
    /// returns an empty snapshot. Once this returns, the code no longer
    /// resolves; there is no partially-closed state.
    pub fn close_lobby(&mut self, code: &LobbyCode) -> Vec<ConnectionId> {
        let Some(lobby) = self.lobbies.remove(code) else {
            return Vec::new();
        };

        let members = lobby.members();
        for member in &members {
            self.member_index.remove(member);
        }

        tracing::info!(%code, members = members.len(), "lobby closed");
        members
    }

    /// Handles a connection drop. Always logs; the rest depends on what
    /// the connection was:
    ///
    /// - registered host of a lobby → that lobby (and only that lobby)
    ///   closes;
    /// - non-host member → its membership is removed, and a lobby left
    ///   empty is evicted;
    /// - in no lobby → nothing further.
    pub fn handle_disconnect(
        &mut self,
        conn: ConnectionId,
    ) -> DisconnectOutcome {
        tracing::info!(%conn, "client disconnected");

        let Some(code) = self.member_index.remove(&conn) else {
            return DisconnectOutcome::NotInLobby;
        };

        let was_host = self
            .lobbies
            .get(&code)
            .is_some_and(|lobby| lobby.is_host(conn));

        if was_host {
            tracing::info!(%conn, %code, "host disconnected");
            let mut members = self.close_lobby(&code);
            members.retain(|m| *m != conn);
            return DisconnectOutcome::LobbyClosed { code, members };
        }

        if let Some(lobby) = self.lobbies.get_mut(&code) {
            lobby.remove(conn);
            tracing::debug!(
                %code,
                %conn,
                remaining = lobby.member_count(),
                "member left lobby"
            );
            if lobby.is_empty() {
                let members = self.close_lobby(&code);
                debug_assert!(members.is_empty());
                return DisconnectOutcome::LobbyClosed { code, members };
            }
        }

        DisconnectOutcome::MemberRemoved { code }
    }

    /// Returns the code of the lobby `conn` is currently in, if any.
    pub fn lobby_of(&self, conn: ConnectionId) -> Option<&LobbyCode> {
        self.member_index.get(&conn)
    }

    /// Snapshot of the sender's lobby code and every *other* member,
    /// the relay's addressing primitive. `None` if the connection is in
    /// no lobby.
    pub fn peers_of(
        &self,
        conn: ConnectionId,
    ) -> Option<(LobbyCode, Vec<ConnectionId>)> {
        let code = self.member_index.get(&conn)?;
        let lobby = self.lobbies.get(code)?;
        Some((code.clone(), lobby.members_except(conn)))
    }

    /// Returns `true` if `code` names a currently-open lobby.
    pub fn is_open(&self, code: &LobbyCode) -> bool {
        self.lobbies.contains_key(code)
    }

    /// Number of members in the named lobby, if it is open.
    pub fn member_count(&self, code: &LobbyCode) -> Option<usize> {
        self.lobbies.get(code).map(Lobby::member_count)
    }

    /// Number of currently-open lobbies.
    pub fn lobby_count(&self) -> usize {
        self.lobbies.len()
    }

    /// Codes of all currently-open lobbies, in no particular order.
    pub fn open_codes(&self) -> Vec<LobbyCode> {
        self.lobbies.keys().cloned().collect()
    }

    /// Draws codes until one names no open lobby, bounded by the
    /// configured retry limit.
    fn unused_code(&self) -> Result<LobbyCode, RegistryError> {
        for _ in 0..self.config.code_retry_limit {
            let code = self.generator.generate();
            if !self.lobbies.contains_key(&code) {
                return Ok(code);
            }
        }
        Err(RegistryError::CodeGenerationExhausted(
            self.config.code_retry_limit,
        ))
    }
}

impl Default for LobbyRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}
