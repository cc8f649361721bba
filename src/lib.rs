pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::dispatch::AlertDispatcher;
use crate::application::monitor::{CycleReport, MonitorUseCase};
use crate::application::scheduler::{RunSummary, Scheduler};
use crate::config::Settings;
use crate::domain::entities::portfolio::Portfolio;
use crate::domain::error::DomainError;
use crate::domain::ports::notification_sink::NotificationSink;
use crate::domain::ports::price_source::PriceSource;
use crate::domain::values::price_snapshot::PriceSnapshot;
use crate::domain::values::trigger_history::TriggerHistory;
use crate::infrastructure::feeds::coingecko::CoinGeckoSource;
use crate::infrastructure::sinks::webhook::WebhookSink;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

pub struct ProfitWatch {
    monitor: MonitorUseCase,
    check_interval: Duration,
}

impl ProfitWatch {
    /// Load the portfolio named in `settings` and wire up the CoinGecko
    /// source and, if configured, the webhook sink.
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let (portfolio, warnings) = Portfolio::load(&settings.portfolio_path)?;
        for w in &warnings {
            warn!("Portfolio: {w}");
        }

        let source: Arc<dyn PriceSource> = Arc::new(
            CoinGeckoSource::new(&portfolio, settings.fetch_timeout)
                .with_base_url(settings.price_api_url.as_str())
                .with_vs_currency(settings.vs_currency.as_str()),
        );

        let sink: Option<Arc<dyn NotificationSink>> = settings.sink_url.as_ref().map(|url| {
            Arc::new(WebhookSink::new(
                url.as_str(),
                settings.notify_email.clone(),
                settings.dispatch_timeout,
            )) as Arc<dyn NotificationSink>
        });

        Ok(Self::with_providers(portfolio, source, sink, settings))
    }

    pub fn with_providers(
        portfolio: Portfolio,
        source: Arc<dyn PriceSource>,
        sink: Option<Arc<dyn NotificationSink>>,
        settings: &Settings,
    ) -> Self {
        let dispatcher = AlertDispatcher::new(sink, settings.dispatch_timeout);
        Self {
            monitor: MonitorUseCase::new(
                Arc::new(portfolio),
                source,
                dispatcher,
                settings.fire_policy,
                settings.fetch_timeout,
            ),
            check_interval: settings.check_interval,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        self.monitor.portfolio()
    }

    pub fn history(&self) -> &TriggerHistory {
        self.monitor.history()
    }

    pub fn check_interval(&self) -> Duration {
        self.check_interval
    }

    /// One fetch → evaluate → dispatch cycle.
    pub async fn check(&mut self) -> CycleReport {
        self.monitor.run_cycle().await
    }

    /// Fetch prices without evaluating targets.
    pub async fn prices(&self) -> Result<PriceSnapshot, DomainError> {
        self.monitor.fetch_snapshot().await
    }

    /// Run cycles every `check_interval` until `shutdown` flips to true.
    pub async fn run(&mut self, shutdown: watch::Receiver<bool>) -> RunSummary {
        Scheduler::new(self.check_interval, shutdown)
            .run(&mut self.monitor)
            .await
    }
}
