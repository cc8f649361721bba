//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use profitwatch::config::Settings;
use profitwatch::domain::entities::holding::{Holding, Target};
use profitwatch::domain::entities::notification::NotificationPayload;
use profitwatch::domain::entities::portfolio::Portfolio;
use profitwatch::domain::error::DomainError;
use profitwatch::domain::ports::notification_sink::NotificationSink;
use profitwatch::domain::ports::price_source::PriceSource;
use profitwatch::domain::values::fire_policy::FirePolicy;
use profitwatch::domain::values::price_snapshot::PriceSnapshot;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub fn eth() -> Holding {
    Holding::new("ETH", "Ethereum", 6.84722883)
        .with_quote_id("ethereum")
        .with_target(Target::new(1, 10500.0, 30.0, "First profit target (2.5x)"))
        .with_target(Target::new(2, 25200.0, 40.0, "Second profit target (6.0x)"))
        .with_target(Target::new(3, 33600.0, 30.0, "Final profit target (8.0x)"))
}

pub fn xrp() -> Holding {
    Holding::new("XRP", "XRP", 287.525101)
        .with_quote_id("ripple")
        .with_target(Target::new(1, 9.5, 100.0, "Bull run target (3.0x) - Full position"))
}

pub fn sample_portfolio() -> Portfolio {
    Portfolio::new(vec![eth(), xrp()])
}

pub fn prices(pairs: &[(&str, f64)]) -> PriceSnapshot {
    pairs
        .iter()
        .fold(PriceSnapshot::empty(), |snap, (symbol, price)| {
            snap.with_price(*symbol, *price)
        })
}

pub fn settings(policy: FirePolicy) -> Settings {
    Settings {
        fire_policy: policy,
        ..Settings::default()
    }
}

/// Price source that replays queued results, then returns empty snapshots.
#[derive(Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<Result<PriceSnapshot, DomainError>>>,
    delay: Duration,
    starts: Mutex<Vec<Instant>>,
    completed: Mutex<usize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn push(&self, result: Result<PriceSnapshot, DomainError>) -> &Self {
        self.script.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> usize {
        self.starts.lock().unwrap().len()
    }

    pub fn starts(&self) -> Vec<Instant> {
        self.starts.lock().unwrap().clone()
    }

    pub fn completed(&self) -> usize {
        *self.completed.lock().unwrap()
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self) -> Result<PriceSnapshot, DomainError> {
        self.starts.lock().unwrap().push(Instant::now());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        *self.completed.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(PriceSnapshot::empty()))
    }
}

/// Sink that records deliveries and can fail its first N sends.
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<NotificationPayload>>,
    attempts: Mutex<usize>,
    fail_first: Mutex<usize>,
    delay: Duration,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_first(n: usize) -> Self {
        Self {
            fail_first: Mutex::new(n),
            ..Self::default()
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }

    pub fn delivered(&self) -> Vec<NotificationPayload> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn delivered_keys(&self) -> Vec<String> {
        self.delivered().iter().map(|p| p.key().to_string()).collect()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, payload: &NotificationPayload) -> Result<(), DomainError> {
        *self.attempts.lock().unwrap() += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        {
            let mut remaining = self.fail_first.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(DomainError::Dispatch("sink unavailable".into()));
            }
        }
        self.delivered.lock().unwrap().push(payload.clone());
        Ok(())
    }
}
