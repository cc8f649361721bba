use crate::domain::entities::notification::NotificationPayload;
use crate::domain::ports::notification_sink::NotificationSink;
use crate::domain::values::fire_policy::FirePolicy;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Result of handing one alert to the sink.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DispatchOutcome {
    Delivered,
    /// No sink configured; the alert was only logged.
    Skipped,
    Failed { reason: String },
}

impl DispatchOutcome {
    /// Whether the alert's target should now count as fired under `policy`.
    ///
    /// A skip counts as handled under both policies: without a sink nothing
    /// would ever succeed on retry.
    pub fn marks_fired(&self, policy: FirePolicy) -> bool {
        match policy {
            FirePolicy::OnCross => true,
            FirePolicy::OnDelivery => !matches!(self, DispatchOutcome::Failed { .. }),
        }
    }
}

/// Delivers alerts to an optional sink with a bounded wait per send.
pub struct AlertDispatcher {
    sink: Option<Arc<dyn NotificationSink>>,
    timeout: Duration,
}

impl AlertDispatcher {
    pub fn new(sink: Option<Arc<dyn NotificationSink>>, timeout: Duration) -> Self {
        Self { sink, timeout }
    }

    /// Send one alert. Never fails: errors and timeouts are logged and
    /// reported in the outcome.
    pub async fn dispatch(&self, payload: &NotificationPayload) -> DispatchOutcome {
        let Some(sink) = &self.sink else {
            warn!(
                alert = %payload.key(),
                "Notification sink not configured - skipping alert delivery"
            );
            return DispatchOutcome::Skipped;
        };

        match tokio::time::timeout(self.timeout, sink.send(payload)).await {
            Ok(Ok(())) => {
                info!(alert = %payload.key(), sink = sink.name(), "Alert delivered");
                DispatchOutcome::Delivered
            }
            Ok(Err(e)) => {
                error!(alert = %payload.key(), sink = sink.name(), "Failed to deliver alert: {e}");
                DispatchOutcome::Failed {
                    reason: e.to_string(),
                }
            }
            Err(_) => {
                error!(
                    alert = %payload.key(),
                    sink = sink.name(),
                    "Alert delivery timed out after {:?}",
                    self.timeout
                );
                DispatchOutcome::Failed {
                    reason: format!("timed out after {:?}", self.timeout),
                }
            }
        }
    }
}
