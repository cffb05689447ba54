//! Domain event notifications
//!
//! Aggregates collect `DomainEvent`s while they are mutated. Once the
//! repository call succeeds, the handler drains them and hands them to
//! `publish_all`, which wraps each in a `Notification` envelope and pushes
//! it onto the configured `EventBus`. Delivery problems are logged and never
//! fail the command that raised the event.

use crate::config::EventBusConfig;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use metrics::counter;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

pub const EVENT_TYPE_HEADER: &str = "X-Event-Type";
pub const SIGNATURE_HEADER: &str = "X-Event-Signature";

/// Something that happened to an aggregate
pub trait DomainEvent: Serialize + Send + Sync {
    /// Dotted name such as `country.created`
    fn event_type(&self) -> &'static str;

    fn aggregate_id(&self) -> String;
}

/// Envelope put on the bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub event_type: String,
    pub aggregate_id: String,
    /// Service that raised the event
    pub source: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: serde_json::Value,
}

impl Notification {
    pub fn from_event<E: DomainEvent>(source: &str, event: &E) -> Result<Self> {
        let payload = serde_json::to_value(event)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode event: {}", e)))?;
        Ok(Self {
            id: Uuid::new_v4(),
            event_type: event.event_type().to_string(),
            aggregate_id: event.aggregate_id(),
            source: source.to_string(),
            occurred_at: Utc::now(),
            payload,
        })
    }
}

#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, notification: Notification) -> Result<()>;

    /// Short name for logs
    fn kind(&self) -> &'static str;
}

/// In-process bus; subscribers receive every notification published after
/// they subscribed.
#[derive(Clone)]
pub struct BroadcastEventBus {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastEventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EventBus for BroadcastEventBus {
    async fn publish(&self, notification: Notification) -> Result<()> {
        if self.sender.send(notification).is_err() {
            tracing::debug!("No subscribers for in-process notification");
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "broadcast"
    }
}

/// Posts notifications as JSON to an HTTP endpoint.
///
/// When a secret is configured the body is signed with HMAC-SHA256 and the
/// signature sent as `X-Event-Signature: sha256=<hex>`.
pub struct HttpEventBus {
    client: reqwest::Client,
    endpoint: String,
    secret: Option<String>,
}

impl HttpEventBus {
    pub fn new(
        endpoint: impl Into<String>,
        secret: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to build event bus client: {}", e))
            })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            secret,
        })
    }
}

#[async_trait]
impl EventBus for HttpEventBus {
    async fn publish(&self, notification: Notification) -> Result<()> {
        let body = serde_json::to_string(&notification)
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to encode notification: {}", e))
            })?;

        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header(EVENT_TYPE_HEADER, &notification.event_type);

        if let Some(secret) = &self.secret {
            request = request.header(SIGNATURE_HEADER, compute_signature(&body, secret)?);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Event bus unreachable: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Event bus returned status {}",
                response.status().as_u16()
            )));
        }
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "http"
    }
}

/// Drops every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventBus;

#[async_trait]
impl EventBus for NoOpEventBus {
    async fn publish(&self, _notification: Notification) -> Result<()> {
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "noop"
    }
}

/// No-op bus when disabled, HTTP bus when an endpoint is configured,
/// in-process broadcast otherwise
pub fn build_event_bus(config: &EventBusConfig) -> Result<Arc<dyn EventBus>> {
    if !config.enabled {
        tracing::info!("Domain event publishing is disabled");
        return Ok(Arc::new(NoOpEventBus));
    }
    match &config.endpoint {
        Some(endpoint) => {
            tracing::info!(endpoint = %endpoint, "Publishing domain events over HTTP");
            Ok(Arc::new(HttpEventBus::new(
                endpoint.clone(),
                config.secret.clone(),
                Duration::from_secs(config.timeout_secs),
            )?))
        }
        None => Ok(Arc::new(BroadcastEventBus::default())),
    }
}

/// Publish every event, logging failures instead of returning them
pub async fn publish_all<E: DomainEvent>(bus: &dyn EventBus, source: &str, events: Vec<E>) {
    for event in events {
        let notification = match Notification::from_event(source, &event) {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(event_type = event.event_type(), "Skipping event: {}", e);
                continue;
            }
        };
        let event_type = notification.event_type.clone();
        let result = match bus.publish(notification).await {
            Ok(()) => "ok",
            Err(e) => {
                tracing::warn!(event_type = %event_type, "Event delivery failed: {}", e);
                "error"
            }
        };
        counter!("motorpool_events_published_total", "event_type" => event_type, "result" => result)
            .increment(1);
    }
}

/// `sha256=<hex hmac>` of the payload
pub fn compute_signature(payload: &str, secret: &str) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid HMAC key: {}", e)))?;
    mac.update(payload.as_bytes());
    Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
}
