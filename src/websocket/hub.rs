//! WebSocket Connection Hub
//!
//! Manages all WebSocket connections and prediction broadcasting.
//! Keeps the most recent prediction payload so new connections get a
//! snapshot immediately instead of waiting for the next poll.

use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Manages all WebSocket connections
pub struct ConnectionHub {
    /// Active connections: ConnectionId → ConnectionHandle
    connections: RwLock<HashMap<ConnectionId, ConnectionHandle>>,
    /// Most recent prediction update, replayed to new connections
    latest: RwLock<Option<ServerMessage>>,
    /// Configuration
    config: HubConfig,
}

/// Configuration for the connection hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent connections
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
        }
    }
}

/// Handle for sending messages to a specific connection
pub struct ConnectionHandle {
    /// Channel sender for this connection
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

impl ConnectionHub {
    /// Create a new connection hub
    pub fn new(config: HubConfig) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            latest: RwLock::new(None),
            config,
        }
    }

    /// Register a new WebSocket connection
    ///
    /// Returns the connection ID on success, or an error if the connection
    /// limit has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let mut connections = self.connections.write().await;
        if connections.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections);
        }

        let id = Uuid::new_v4().to_string();
        connections.insert(id.clone(), ConnectionHandle { sender });

        tracing::info!(connection_id = %id, "WebSocket connected");
        Ok(id)
    }

    /// Unregister a connection
    pub async fn unregister(&self, id: &str) {
        self.connections.write().await.remove(id);
        tracing::info!(connection_id = %id, "WebSocket disconnected");
    }

    /// Publish a prediction update: store it as the latest snapshot and
    /// send it to every connected client
    pub async fn publish_predictions(&self, message: ServerMessage) {
        *self.latest.write().await = Some(message.clone());

        let connections = self.connections.read().await;
        let mut sent_count = 0;
        for handle in connections.values() {
            // A send failure means the connection task is gone; the handler
            // unregisters it on its way out
            if handle.sender.send(message.clone()).is_ok() {
                sent_count += 1;
            }
        }

        if sent_count > 0 {
            tracing::trace!(subscribers = sent_count, "Broadcast prediction update");
        }
    }

    /// The most recent prediction update, if any poll has succeeded yet
    pub async fn latest(&self) -> Option<ServerMessage> {
        self.latest.read().await.clone()
    }

    /// Send a message directly to a specific connection
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let connections = self.connections.read().await;
        let handle = connections.get(id).ok_or(HubError::ConnectionNotFound)?;

        handle
            .sender
            .send(message)
            .map_err(|_| HubError::SendFailed)
    }

    /// Get the current connection count
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

/// Errors that can occur in the connection hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many connections")]
    TooManyConnections,

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.max_connections, 1000);
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(hub.connection_count().await, 1);

        hub.unregister(&id).await;
        assert_eq!(hub.connection_count().await, 0);
    }

    #[tokio::test]
    async fn test_connection_limit() {
        let config = HubConfig { max_connections: 2 };
        let hub = ConnectionHub::new(config);

        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();
        let (tx3, _rx3) = mpsc::unbounded_channel();

        let id1 = hub.register(tx1).await.unwrap();
        let id2 = hub.register(tx2).await.unwrap();
        let result = hub.register(tx3).await;

        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), HubError::TooManyConnections));

        hub.unregister(&id1).await;
        hub.unregister(&id2).await;
    }

    #[tokio::test]
    async fn test_publish_reaches_all_connections() {
        let hub = ConnectionHub::new(HubConfig::default());

        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();

        let id1 = hub.register(tx1).await.unwrap();
        let id2 = hub.register(tx2).await.unwrap();

        let update = ServerMessage::predictions_from_slice(br#"{"Trains":[]}"#).unwrap();
        hub.publish_predictions(update).await;

        assert!(rx1.try_recv().is_ok());
        assert!(rx2.try_recv().is_ok());

        hub.unregister(&id1).await;
        hub.unregister(&id2).await;
    }

    #[tokio::test]
    async fn test_publish_stores_latest_snapshot() {
        let hub = ConnectionHub::new(HubConfig::default());
        assert!(hub.latest().await.is_none());

        let update = ServerMessage::predictions_from_slice(br#"{"Trains":[]}"#).unwrap();
        hub.publish_predictions(update).await;

        let snapshot = hub.latest().await;
        assert!(matches!(snapshot, Some(ServerMessage::Predictions { .. })));
    }

    #[tokio::test]
    async fn test_send_to_unknown_connection() {
        let hub = ConnectionHub::new(HubConfig::default());
        let result = hub.send_to("nope", ServerMessage::Pong).await;
        assert!(matches!(result.unwrap_err(), HubError::ConnectionNotFound));
    }
}
