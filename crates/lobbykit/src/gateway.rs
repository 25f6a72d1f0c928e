//! Connection gateway: the table of live connections and the delivery
//! primitives the registry and relay layers address clients through.
//!
//! The gateway holds no domain state; it maps a [`ConnectionId`] to a
//! connection handle and delivers pre-encoded event bytes. Callers
//! resolve *who* to send to (one connection, a membership snapshot, or
//! everyone) before calling in; the registry lock is never held here.

use std::collections::HashMap;

use lobbykit_transport::{Connection, ConnectionId};
use tokio::sync::Mutex;

/// Tracks live connections and delivers outbound events to them.
///
/// Sends to connections that have since disconnected are logged and
/// dropped; disconnection is expected, not an error.
pub struct Gateway<C: Connection> {
    connections: Mutex<HashMap<ConnectionId, C>>,
}

impl<C: Connection> Gateway<C> {
    /// Creates an empty gateway.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a newly accepted connection.
    pub async fn register(&self, conn: C) {
        let id = conn.id();
        self.connections.lock().await.insert(id, conn);
        tracing::debug!(%id, "connection registered");
    }

    /// Removes a connection; called exactly once when its channel closes.
    pub async fn unregister(&self, id: ConnectionId) {
        self.connections.lock().await.remove(&id);
        tracing::debug!(%id, "connection unregistered");
    }

    /// Number of currently registered connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.lock().await.len()
    }

    /// Delivers one event to exactly one connection.
    pub async fn send(&self, id: ConnectionId, data: &[u8]) {
        // Clone the handle out so the table lock is not held during I/O.
        let conn = self.connections.lock().await.get(&id).cloned();
        match conn {
            Some(conn) => {
                if let Err(e) = conn.send(data).await {
                    tracing::debug!(%id, error = %e, "send to connection failed, dropping");
                }
            }
            None => {
                tracing::debug!(%id, "send to vanished connection, dropping");
            }
        }
    }

    /// Delivers one event to every connection in `ids`.
    pub async fn send_many(&self, ids: &[ConnectionId], data: &[u8]) {
        let handles: Vec<C> = {
            let table = self.connections.lock().await;
            ids.iter().filter_map(|id| table.get(id).cloned()).collect()
        };
        for conn in handles {
            let id = conn.id();
            if let Err(e) = conn.send(data).await {
                tracing::debug!(%id, error = %e, "send to connection failed, dropping");
            }
        }
    }

    /// Legacy global broadcast: every registered connection, optionally
    /// excluding one (the sender).
    pub async fn broadcast_all(
        &self,
        excluding: Option<ConnectionId>,
        data: &[u8],
    ) {
        let handles: Vec<C> = {
            let table = self.connections.lock().await;
            table
                .values()
                .filter(|conn| Some(conn.id()) != excluding)
                .cloned()
                .collect()
        };
        for conn in handles {
            let id = conn.id();
            if let Err(e) = conn.send(data).await {
                tracing::debug!(%id, error = %e, "send to connection failed, dropping");
            }
        }
    }
}

impl<C: Connection> Default for Gateway<C> {
    fn default() -> Self {
        Self::new()
    }
}
