use crate::application::monitor::MonitorUseCase;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub cycles: u64,
    pub alerts_fired: u64,
}

/// Periodic driver for [`MonitorUseCase`].
///
/// Runs one cycle immediately, then waits `interval` after each cycle
/// settles before starting the next, so cycles never overlap. A stop
/// request is honoured between cycles; an in-flight cycle always finishes.
pub struct Scheduler {
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl Scheduler {
    pub fn new(interval: Duration, shutdown: watch::Receiver<bool>) -> Self {
        Self { interval, shutdown }
    }

    pub async fn run(mut self, monitor: &mut MonitorUseCase) -> RunSummary {
        let mut summary = RunSummary::default();

        loop {
            let report = monitor.run_cycle().await;
            summary.cycles += 1;
            summary.alerts_fired += report.fired() as u64;

            if *self.shutdown.borrow() {
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                // A dropped sender also means stop
                _ = self.shutdown.changed() => {
                    break;
                }
            }
        }

        info!(
            cycles = summary.cycles,
            alerts = summary.alerts_fired,
            "Monitor stopped"
        );
        summary
    }
}
