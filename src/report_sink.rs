//! Report Sink - async consumer for joystick callbacks
//!
//! Joystick callbacks run on the UI thread and must never block. The console
//! therefore hands every report to a bounded channel with `try_send` and lets
//! this task do the rest: stamp it, log it and publish the latest report per
//! joystick through a watch channel the UI can read every frame.
//!
//! ```text
//! callback ─[StickReport]→ ReportSink task ─[Telemetry]→ UI
//!          (mpsc, bounded)                   (watch)
//! ```

use crate::joystick::{JoystickId, PositionCallback, StickReport};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// A report together with the time the sink received it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StampedReport {
    pub report: StickReport,
    pub received: DateTime<Local>,
}

/// Snapshot published after every report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Telemetry {
    pub latest: BTreeMap<JoystickId, StampedReport>,
    pub total_reports: u64,
}

/// Handle of the running sink task
pub struct ReportSink {
    telemetry: watch::Receiver<Telemetry>,
    task: JoinHandle<()>,
}

impl ReportSink {
    /// Spawns the sink and returns the sender callbacks should feed
    pub fn spawn(capacity: usize) -> (Self, mpsc::Sender<StickReport>) {
        let (report_tx, report_rx) = mpsc::channel(capacity.max(1));
        let (telemetry_tx, telemetry_rx) = watch::channel(Telemetry::default());
        debug!("Created report channel with buffer capacity {}", capacity);

        let task = tokio::spawn(run(report_rx, telemetry_tx));
        info!("Report sink spawned");

        (
            Self {
                telemetry: telemetry_rx,
                task,
            },
            report_tx,
        )
    }

    pub fn subscribe(&self) -> watch::Receiver<Telemetry> {
        self.telemetry.clone()
    }

    /// Waits for the task to finish; it ends once every sender is dropped
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            warn!("Report sink task failed: {}", e);
        }
    }
}

async fn run(mut reports: mpsc::Receiver<StickReport>, telemetry: watch::Sender<Telemetry>) {
    while let Some(report) = reports.recv().await {
        let received = Local::now();
        debug!("{} at {}", report, received.format("%H:%M:%S%.3f"));

        telemetry.send_modify(|t| {
            t.latest.insert(report.id, StampedReport { report, received });
            t.total_reports += 1;
        });
    }
    info!("All report senders dropped, report sink stopping");
}

/// Callback that forwards every report into the sink without blocking
///
/// A full channel drops the report; the UI thread is never held up.
pub fn forwarder(sender: mpsc::Sender<StickReport>) -> Box<dyn PositionCallback> {
    Box::new(move |id: JoystickId, x: i16, y: i16| {
        if let Err(e) = sender.try_send(StickReport { id, x, y }) {
            warn!("Dropping report of {}: {}", id, e);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn keeps_latest_report_per_joystick() {
        let (sink, sender) = ReportSink::spawn(16);
        let mut telemetry = sink.subscribe();

        let mut left = forwarder(sender.clone());
        let mut right = forwarder(sender);
        left.on_position(JoystickId(0), 5, 0);
        right.on_position(JoystickId(1), 3, -2);
        left.on_position(JoystickId(0), 6, 1);
        drop(left);
        drop(right);

        sink.join().await;
        let snapshot = telemetry.borrow_and_update().clone();

        assert_eq!(snapshot.total_reports, 3);
        assert_eq!(
            snapshot.latest[&JoystickId(0)].report,
            StickReport { id: JoystickId(0), x: 6, y: 1 }
        );
        assert_eq!(
            snapshot.latest[&JoystickId(1)].report,
            StickReport { id: JoystickId(1), x: 3, y: -2 }
        );
    }

    #[tokio::test]
    async fn full_channel_drops_instead_of_blocking() {
        let (report_tx, mut report_rx) = mpsc::channel(1);
        let mut callback = forwarder(report_tx);

        callback.on_position(JoystickId(2), 1, 1);
        callback.on_position(JoystickId(2), 2, 2);

        assert_eq!(
            report_rx.recv().await,
            Some(StickReport { id: JoystickId(2), x: 1, y: 1 })
        );
        assert!(report_rx.try_recv().is_err());
    }
}
