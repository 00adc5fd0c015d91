//! Order event sink

use async_trait::async_trait;
use justeat::status::OrderStatus;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Failure delivering an event to the notification channel.
#[derive(Debug, Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Events emitted after durable order state changes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OrderEvent {
    OrderPlaced {
        order: Uuid,
        order_number: String,
        customer: Uuid,
    },
    StatusChanged {
        order: Uuid,
        order_number: String,
        customer: Uuid,
        status: OrderStatus,
    },
}

/// One-way sink for customer-facing notifications (email, in-app, push).
///
/// Delivery is best-effort: callers log failures and never roll back the
/// state change that produced the event.
#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, event: OrderEvent) -> Result<(), NotifyError>;
}

/// Notifier that writes events to the application log.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: OrderEvent) -> Result<(), NotifyError> {
        let payload = serde_json::to_string(&event).map_err(|e| NotifyError(e.to_string()))?;

        tracing::info!(target: "justeat::notify", %payload, "order event");

        Ok(())
    }
}
