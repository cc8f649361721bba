use crate::domain::entities::notification::NotificationPayload;
use crate::domain::error::DomainError;
use crate::domain::ports::notification_sink::NotificationSink;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Posts alerts as JSON to a web-app endpoint (e.g. a Google Apps Script
/// that forwards them by email).
pub struct WebhookSink {
    url: String,
    email: Option<String>,
    client: reqwest::Client,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, email: Option<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            email,
            client: reqwest::Client::builder()
                .user_agent("profitwatch/0.1")
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AlertRequest<'a> {
    id: &'a str,
    timestamp: String,
    coin: &'a str,
    coin_name: &'a str,
    current_price: f64,
    target_price: f64,
    target_level: u32,
    target_description: &'a str,
    sell_percentage: f64,
    sell_quantity: f64,
    profit_value: f64,
    message: String,
    email: Option<&'a str>,
}

impl<'a> AlertRequest<'a> {
    fn new(p: &'a NotificationPayload, email: Option<&'a str>) -> Self {
        Self {
            id: &p.id,
            timestamp: p.timestamp.to_rfc3339(),
            coin: &p.symbol,
            coin_name: &p.display_name,
            current_price: p.current_price,
            target_price: p.trigger_price,
            target_level: p.target_level,
            target_description: &p.target_description,
            sell_percentage: p.sell_percentage,
            sell_quantity: p.sold_quantity,
            profit_value: p.proceeds,
            message: p.message(),
            email,
        }
    }
}

#[async_trait]
impl NotificationSink for WebhookSink {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), DomainError> {
        let body = AlertRequest::new(payload, self.email.as_deref());

        let resp = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Dispatch(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(DomainError::Dispatch(format!(
                "Webhook returned {status}: {text}"
            )));
        }

        Ok(())
    }
}
