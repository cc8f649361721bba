use crate::domain::entities::notification::NotificationPayload;
use crate::domain::error::DomainError;
use async_trait::async_trait;

/// Destination for profit-target alerts.
///
/// Delivery is complete once the sink accepts the payload; what it does with
/// it afterwards (emailing, logging to a sheet) is its own concern.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, payload: &NotificationPayload) -> Result<(), DomainError>;
}
