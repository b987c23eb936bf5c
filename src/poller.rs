//! Prediction Poller
//!
//! Background task that polls the upstream prediction endpoint on an
//! interval and fans each payload out to connected WebSocket clients
//! through the hub. Upstream failures are recorded and the loop keeps
//! polling; the feed recovers as soon as the upstream does.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::config::PollerConfig;
use crate::websocket::{ConnectionHub, ServerMessage};
use crate::wmata::{RailApi, WmataError};

/// Polls live predictions and broadcasts them
pub struct PredictionPoller {
    api: Arc<dyn RailApi>,
    hub: Arc<ConnectionHub>,
    interval: Duration,
    running: RwLock<bool>,
    health: RwLock<FeedHealth>,
}

/// Health of the live prediction feed
#[derive(Debug, Clone, Default, Serialize)]
pub struct FeedHealth {
    /// When the last successful poll completed
    pub last_success: Option<DateTime<Utc>>,
    /// Error message from the most recent failed poll
    pub last_error: Option<String>,
    /// Consecutive failed polls since the last success
    pub consecutive_errors: u32,
}

impl FeedHealth {
    /// Whether the feed has delivered at least one update and the most
    /// recent poll succeeded
    pub fn is_healthy(&self) -> bool {
        self.last_success.is_some() && self.consecutive_errors == 0
    }
}

impl PredictionPoller {
    /// Create a new poller
    pub fn new(api: Arc<dyn RailApi>, hub: Arc<ConnectionHub>, config: &PollerConfig) -> Self {
        Self {
            api,
            hub,
            interval: Duration::from_secs(config.interval_secs),
            running: RwLock::new(false),
            health: RwLock::new(FeedHealth::default()),
        }
    }

    /// Run a single poll cycle: fetch predictions and broadcast them
    pub async fn poll_once(&self) -> Result<(), WmataError> {
        let body = match self.api.predictions().await {
            Ok(body) => body,
            Err(e) => {
                self.record_failure(&e.to_string()).await;
                return Err(e);
            }
        };

        let message = match ServerMessage::predictions_from_slice(&body) {
            Ok(message) => message,
            Err(e) => {
                // Don't forward garbage to clients
                self.record_failure(&format!("Invalid prediction payload: {}", e))
                    .await;
                return Err(WmataError::ApiError {
                    status: 200,
                    message: format!("Invalid prediction payload: {}", e),
                });
            }
        };

        self.hub.publish_predictions(message).await;

        let mut health = self.health.write().await;
        health.last_success = Some(Utc::now());
        health.last_error = None;
        health.consecutive_errors = 0;

        Ok(())
    }

    async fn record_failure(&self, error: &str) {
        let mut health = self.health.write().await;
        health.last_error = Some(error.to_string());
        health.consecutive_errors += 1;

        tracing::error!(
            error = %error,
            consecutive_errors = health.consecutive_errors,
            "Prediction poll failed"
        );
    }

    /// Current feed health
    pub async fn health(&self) -> FeedHealth {
        self.health.read().await.clone()
    }

    /// Start the poller background task
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let poller = self.clone();

        tokio::spawn(async move {
            *poller.running.write().await = true;

            let mut interval = tokio::time::interval(poller.interval);
            // The first tick fires immediately, giving clients a snapshot
            // as soon as the server is up

            loop {
                interval.tick().await;

                if !*poller.running.read().await {
                    break;
                }

                let _ = poller.poll_once().await;
            }
        })
    }

    /// Stop the poller
    pub async fn stop(&self) {
        *self.running.write().await = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::HubConfig;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::mpsc;

    /// Stub upstream that serves a canned payload or fails on demand
    struct StubApi {
        fail: AtomicBool,
        payload: Vec<u8>,
    }

    impl StubApi {
        fn new(payload: &[u8]) -> Self {
            Self {
                fail: AtomicBool::new(false),
                payload: payload.to_vec(),
            }
        }
    }

    #[async_trait]
    impl RailApi for StubApi {
        async fn stations(&self) -> Result<Vec<u8>, WmataError> {
            Ok(self.payload.clone())
        }

        async fn lines(&self) -> Result<Vec<u8>, WmataError> {
            Ok(self.payload.clone())
        }

        async fn predictions(&self) -> Result<Vec<u8>, WmataError> {
            if self.fail.load(Ordering::SeqCst) {
                Err(WmataError::Unavailable)
            } else {
                Ok(self.payload.clone())
            }
        }
    }

    fn make_poller(api: Arc<StubApi>) -> (Arc<PredictionPoller>, Arc<ConnectionHub>) {
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let poller = Arc::new(PredictionPoller::new(
            api,
            Arc::clone(&hub),
            &PollerConfig::default(),
        ));
        (poller, hub)
    }

    #[tokio::test]
    async fn test_poll_once_broadcasts_and_stores_snapshot() {
        let api = Arc::new(StubApi::new(br#"{"Trains":[{"Line":"RD","Min":"2"}]}"#));
        let (poller, hub) = make_poller(api);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        poller.poll_once().await.unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            ServerMessage::Predictions { .. }
        ));
        assert!(hub.latest().await.is_some());

        let health = poller.health().await;
        assert!(health.is_healthy());
        assert!(health.last_success.is_some());

        hub.unregister(&id).await;
    }

    #[tokio::test]
    async fn test_poll_failure_is_recorded_and_recovers() {
        let api = Arc::new(StubApi::new(br#"{"Trains":[]}"#));
        let (poller, hub) = make_poller(Arc::clone(&api));

        api.fail.store(true, Ordering::SeqCst);
        assert!(poller.poll_once().await.is_err());
        assert!(poller.poll_once().await.is_err());

        let health = poller.health().await;
        assert!(!health.is_healthy());
        assert_eq!(health.consecutive_errors, 2);
        assert!(health.last_error.is_some());
        assert!(hub.latest().await.is_none());

        // Upstream comes back; the feed recovers
        api.fail.store(false, Ordering::SeqCst);
        poller.poll_once().await.unwrap();

        let health = poller.health().await;
        assert!(health.is_healthy());
        assert_eq!(health.consecutive_errors, 0);
        assert!(hub.latest().await.is_some());
    }

    #[tokio::test]
    async fn test_invalid_payload_is_not_broadcast() {
        let api = Arc::new(StubApi::new(b"<html>gateway error</html>"));
        let (poller, hub) = make_poller(api);

        assert!(poller.poll_once().await.is_err());
        assert!(hub.latest().await.is_none());
        assert_eq!(poller.health().await.consecutive_errors, 1);
    }
}
