//! Registry configuration and the profile selector.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Which event vocabulary and relay scope a registry speaks.
///
/// The two profiles are historical variants of the same design and must
/// never be mixed on one registry: a server runs exactly one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Host-aware: `create-lobby`/`join-lobby`, lobby-scoped relay,
    /// `synchronise-lobby`, and closure when the host disconnects.
    #[default]
    Lobby,

    /// Legacy host-less rooms: `create-room`/`join-room`, relay to every
    /// connected client except the sender, no close or synchronize events.
    Room,
}

impl Profile {
    /// Returns `true` if lobbies in this profile record a host.
    pub fn is_host_aware(&self) -> bool {
        matches!(self, Self::Lobby)
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lobby => write!(f, "lobby"),
            Self::Room => write!(f, "room"),
        }
    }
}

// ---------------------------------------------------------------------------
// RegistryConfig
// ---------------------------------------------------------------------------

/// Configuration for a [`LobbyRegistry`](crate::LobbyRegistry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The active profile.
    pub profile: Profile,

    /// Maximum number of simultaneously open lobbies. Creates beyond
    /// this are rejected, never auto-evicted.
    pub max_lobbies: usize,

    /// Optional per-lobby member cap. `None` (the default) imposes no
    /// limit beyond the overall lobby-count capacity.
    pub max_members: Option<usize>,

    /// Length of generated lobby codes.
    pub code_length: usize,

    /// How many colliding draws to tolerate before a create fails with
    /// `CodeGenerationExhausted`.
    pub code_retry_limit: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Lobby,
            max_lobbies: 50,
            max_members: None,
            code_length: 5,
            code_retry_limit: 16,
        }
    }
}

impl RegistryConfig {
    /// Defaults for the legacy room profile (10 rooms, host-less).
    pub fn room() -> Self {
        Self {
            profile: Profile::Room,
            max_lobbies: 10,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_lobby_profile() {
        let config = RegistryConfig::default();
        assert_eq!(config.profile, Profile::Lobby);
        assert_eq!(config.max_lobbies, 50);
        assert_eq!(config.max_members, None);
        assert_eq!(config.code_length, 5);
    }

    #[test]
    fn test_room_config_lowers_capacity() {
        let config = RegistryConfig::room();
        assert_eq!(config.profile, Profile::Room);
        assert_eq!(config.max_lobbies, 10);
    }

    #[test]
    fn test_profile_host_awareness() {
        assert!(Profile::Lobby.is_host_aware());
        assert!(!Profile::Room.is_host_aware());
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(Profile::Lobby.to_string(), "lobby");
        assert_eq!(Profile::Room.to_string(), "room");
    }
}
