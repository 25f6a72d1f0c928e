//! A single lobby: one named group of connections.

use std::collections::HashSet;

use lobbykit_protocol::LobbyCode;
use lobbykit_transport::ConnectionId;

/// One open lobby.
///
/// A lobby is `Open` for as long as it sits in the registry map; removal
/// from the map is closure, and closure is terminal. There are no other
/// lifecycle states.
#[derive(Debug, Clone)]
pub struct Lobby {
    code: LobbyCode,
    /// The connection whose create request produced this lobby. `None`
    /// in the legacy room profile, which has no host concept.
    host: Option<ConnectionId>,
    members: HashSet<ConnectionId>,
}

impl Lobby {
    /// Creates a lobby with the creator as its sole member. In a
    /// host-aware profile the creator is also recorded as host.
    pub(crate) fn new(
        code: LobbyCode,
        creator: ConnectionId,
        host_aware: bool,
    ) -> Self {
        let mut members = HashSet::new();
        members.insert(creator);
        Self {
            code,
            host: host_aware.then_some(creator),
            members,
        }
    }

    /// Returns the lobby's code.
    pub fn code(&self) -> &LobbyCode {
        &self.code
    }

    /// Returns the host connection, if this lobby has one.
    pub fn host(&self) -> Option<ConnectionId> {
        self.host
    }

    /// Returns `true` if `conn` is this lobby's registered host.
    pub fn is_host(&self, conn: ConnectionId) -> bool {
        self.host == Some(conn)
    }

    /// Returns `true` if `conn` is a member.
    pub fn contains(&self, conn: ConnectionId) -> bool {
        self.members.contains(&conn)
    }

    /// Number of current members.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the lobby has no members left.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Snapshot of the full membership, in no particular order.
    pub fn members(&self) -> Vec<ConnectionId> {
        self.members.iter().copied().collect()
    }

    /// Snapshot of every member except `excluded`.
    pub fn members_except(&self, excluded: ConnectionId) -> Vec<ConnectionId> {
        self.members
            .iter()
            .copied()
            .filter(|m| *m != excluded)
            .collect()
    }

    pub(crate) fn insert(&mut self, conn: ConnectionId) {
        self.members.insert(conn);
    }

    pub(crate) fn remove(&mut self, conn: ConnectionId) -> bool {
        self.members.remove(&conn)
    }
}
