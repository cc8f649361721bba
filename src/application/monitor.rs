use crate::application::dispatch::{AlertDispatcher, DispatchOutcome};
use crate::application::evaluate::evaluate;
use crate::domain::entities::notification::NotificationPayload;
use crate::domain::entities::portfolio::Portfolio;
use crate::domain::error::DomainError;
use crate::domain::ports::price_source::PriceSource;
use crate::domain::values::fire_policy::FirePolicy;
use crate::domain::values::price_snapshot::PriceSnapshot;
use crate::domain::values::trigger_history::TriggerHistory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Outcome of one fetch → evaluate → dispatch cycle.
#[derive(Debug, Serialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub prices_received: usize,
    /// Set when the fetch failed and the cycle ran on an empty snapshot.
    pub fetch_error: Option<String>,
    pub alerts: Vec<AlertReport>,
}

#[derive(Debug, Serialize)]
pub struct AlertReport {
    pub payload: NotificationPayload,
    pub outcome: DispatchOutcome,
}

impl CycleReport {
    pub fn fired(&self) -> usize {
        self.alerts.len()
    }

    pub fn delivered(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.outcome == DispatchOutcome::Delivered)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| matches!(a.outcome, DispatchOutcome::Failed { .. }))
            .count()
    }
}

/// Owns the trigger history and runs single monitoring cycles against it.
pub struct MonitorUseCase {
    portfolio: Arc<Portfolio>,
    source: Arc<dyn PriceSource>,
    dispatcher: AlertDispatcher,
    history: TriggerHistory,
    policy: FirePolicy,
    fetch_timeout: Duration,
}

impl MonitorUseCase {
    pub fn new(
        portfolio: Arc<Portfolio>,
        source: Arc<dyn PriceSource>,
        dispatcher: AlertDispatcher,
        policy: FirePolicy,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            portfolio,
            source,
            dispatcher,
            history: TriggerHistory::new(),
            policy,
            fetch_timeout,
        }
    }

    pub fn history(&self) -> &TriggerHistory {
        &self.history
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Fetch a snapshot under the configured timeout.
    pub async fn fetch_snapshot(&self) -> Result<PriceSnapshot, DomainError> {
        match tokio::time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::Timeout(format!(
                "{} fetch exceeded {:?}",
                self.source.name(),
                self.fetch_timeout
            ))),
        }
    }

    /// Run one cycle. Fetch failures degrade to an empty snapshot; dispatch
    /// failures are reported per alert. Nothing here returns an error.
    pub async fn run_cycle(&mut self) -> CycleReport {
        let started_at = Utc::now();

        let (snapshot, fetch_error) = match self.fetch_snapshot().await {
            Ok(snapshot) => (snapshot, None),
            Err(e) => {
                warn!(source = self.source.name(), "Error fetching prices: {e}");
                (PriceSnapshot::empty(), Some(e.to_string()))
            }
        };

        for symbol in snapshot.symbols() {
            if let Some(quote) = snapshot.quote(symbol) {
                debug!(symbol, price = quote.price, change_24h = ?quote.change_24h, "Quote");
            }
        }

        let payloads = match self.policy {
            FirePolicy::OnCross => evaluate(&snapshot, &self.portfolio, &mut self.history),
            // Evaluate against a scratch copy; keys are committed after delivery.
            FirePolicy::OnDelivery => {
                let mut pass = self.history.clone();
                evaluate(&snapshot, &self.portfolio, &mut pass)
            }
        };

        let mut alerts = Vec::with_capacity(payloads.len());
        for payload in payloads {
            info!(
                symbol = %payload.symbol,
                level = payload.target_level,
                "PROFIT TARGET HIT: {} reached ${} (Target: ${})",
                payload.symbol,
                payload.current_price,
                payload.trigger_price
            );

            let outcome = self.dispatcher.dispatch(&payload).await;
            if self.policy == FirePolicy::OnDelivery && outcome.marks_fired(self.policy) {
                self.history.record(payload.key());
            }
            alerts.push(AlertReport { payload, outcome });
        }

        CycleReport {
            started_at,
            prices_received: snapshot.len(),
            fetch_error,
            alerts,
        }
    }
}
