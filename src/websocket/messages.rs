//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! clients (dashboards) and the Metroboard server.

use serde::{Deserialize, Serialize};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// A live prediction update
    Predictions {
        /// The upstream prediction payload, unmodified
        data: serde_json::Value,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}

impl ServerMessage {
    /// Build a prediction update from raw upstream bytes
    ///
    /// Fails if the upstream payload is not valid JSON, in which case the
    /// update is dropped rather than forwarded to clients.
    pub fn predictions_from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let data: serde_json::Value = serde_json::from_slice(body)?;
        Ok(ServerMessage::Predictions { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_deserialize_ping() {
        let json = r#"{"type": "ping"}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_client_message_rejects_unknown_type() {
        let json = r#"{"type": "subscribe", "topics": []}"#;
        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            connection_id: "abc-123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"connection_id\":\"abc-123\""));
    }

    #[test]
    fn test_server_message_serialize_predictions() {
        let msg = ServerMessage::predictions_from_slice(
            br#"{"Trains":[{"Line":"RD","Min":"3"}]}"#,
        )
        .unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"predictions\""));
        assert!(json.contains("\"Trains\""));
        assert!(json.contains("\"RD\""));
    }

    #[test]
    fn test_predictions_from_invalid_json() {
        assert!(ServerMessage::predictions_from_slice(b"not json").is_err());
    }
}
