use std::sync::mpsc::Sender;

use tracing::info;

use trackday_core::telemetry::TelemetrySnapshot;

pub trait TelemetrySink {
    fn publish(&mut self, snapshot: &TelemetrySnapshot);
}

// writes each snapshot to the log as a JSON line
pub struct LogSink;

impl TelemetrySink for LogSink {
    fn publish(&mut self, snapshot: &TelemetrySnapshot) {
        info!(target: "telemetry", "{}", snapshot.to_json());
    }
}

// hands snapshots to another thread, e.g. whatever draws the HUD
pub struct ChannelSink {
    sender: Sender<TelemetrySnapshot>,
}

impl ChannelSink {
    pub fn new(sender: Sender<TelemetrySnapshot>) -> Self {
        ChannelSink { sender }
    }
}

impl TelemetrySink for ChannelSink {
    fn publish(&mut self, snapshot: &TelemetrySnapshot) {
        // a display that went away shouldn't stop the car
        let _ = self.sender.send(snapshot.clone());
    }
}
