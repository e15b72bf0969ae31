use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::info;
use uuid::Uuid;

use trackday_core::telemetry::TelemetrySnapshot;
use trackday_core::track::TrackMap;
use trackday_core::Settings;

use crate::input_port::InputPort;
use crate::physics::{PhysicsModel, VehicleEntity};

pub mod telemetry;

use telemetry::TelemetrySink;

const IDLE: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;

// Lets another thread end a session; stopping twice is the same as once
#[derive(Clone)]
pub struct StopHandle {
    state: Arc<AtomicU8>,
}

impl StopHandle {
    // returns whether this call was the one that stopped the session
    pub fn stop(&self) -> bool {
        self.state.swap(STOPPED, Ordering::SeqCst) != STOPPED
    }
}

pub struct DrivingSession {
    id: Uuid,
    vehicle: VehicleEntity,
    track: Arc<TrackMap>,
    inputs: InputPort,
    telemetry: Box<dyn TelemetrySink>,
    model: PhysicsModel,

    frame_interval: Duration,
    telemetry_interval: Duration,
    session_duration: Option<Duration>,

    // IDLE -> RUNNING -> STOPPED, never back
    state: Arc<AtomicU8>,
    started_at: Option<Instant>,
    last_frame: Option<Instant>,
    last_telemetry: Option<Instant>,
}

impl DrivingSession {
    pub fn new(
        vehicle: VehicleEntity,
        track: Arc<TrackMap>,
        inputs: InputPort,
        telemetry: Box<dyn TelemetrySink>,
        model: PhysicsModel,
        settings: &Settings,
    ) -> DrivingSession {
        DrivingSession {
            id: Uuid::new_v4(),
            vehicle,
            track,
            inputs,
            telemetry,
            model,
            frame_interval: Duration::from_millis(settings.frame_interval_ms),
            telemetry_interval: Duration::from_millis(settings.telemetry_interval_ms),
            session_duration: match settings.session_duration_ms {
                0 => None,
                ms => Some(Duration::from_millis(ms)),
            },
            state: Arc::new(AtomicU8::new(IDLE)),
            started_at: None,
            last_frame: None,
            last_telemetry: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vehicle(&self) -> &VehicleEntity {
        &self.vehicle
    }

    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::SeqCst) == RUNNING
    }

    pub fn is_stopped(&self) -> bool {
        self.state.load(Ordering::SeqCst) == STOPPED
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            state: self.state.clone(),
        }
    }

    // a session only starts once; starting a stopped session does nothing
    pub fn start(&mut self) {
        if self
            .state
            .compare_exchange(IDLE, RUNNING, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!(session = %self.id, "session started");
        }
    }

    pub fn stop(&mut self) {
        if self.stop_handle().stop() {
            info!(session = %self.id, "session stopped");
        }
    }

    pub fn telemetry_snapshot(&self) -> TelemetrySnapshot {
        let position = self.vehicle.entity_location.position;
        TelemetrySnapshot {
            vehicle: self.vehicle.snapshot(),
            on_track: self.track.is_on_track(position.x, position.y),
        }
    }

    // advance the session to `now`; does nothing once stopped
    pub fn frame(&mut self, now: Instant) {
        if !self.is_running() {
            return;
        }

        // the first frame only establishes the clock
        let time_step = match self.last_frame {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.started_at.get_or_insert(now);

        self.vehicle.controls = self.inputs.sync_incoming();
        self.vehicle = self
            .vehicle
            .do_physics_step(time_step, &self.track, &self.model);

        let telemetry_due = match self.last_telemetry {
            Some(last) => now.saturating_duration_since(last) >= self.telemetry_interval,
            None => true,
        };
        if telemetry_due {
            self.last_telemetry = Some(now);
            let snapshot = self.telemetry_snapshot();
            self.telemetry.publish(&snapshot);
        }
    }

    fn out_of_time(&self, now: Instant) -> bool {
        match (self.session_duration, self.started_at) {
            (Some(limit), Some(started)) => now.saturating_duration_since(started) >= limit,
            _ => false,
        }
    }

    // Runs frames at the configured cadence until something stops the session
    // or its time is up. Starts the session if it was never started.
    pub fn run(&mut self) {
        self.start();

        while self.is_running() {
            let start_time = Instant::now();
            self.frame(start_time);

            if self.out_of_time(start_time) {
                self.stop();
                break;
            }

            // a slow frame just means the next one starts right away
            if let Some(remaining) = self.frame_interval.checked_sub(start_time.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use trackday_core::entity_location::EntityLocation;
    use trackday_core::player_inputs::{InputEvent, SteeringMode, ThrottleCommand};
    use trackday_core::track::TrackData;

    use super::telemetry::ChannelSink;
    use super::*;
    use crate::input_port::{input_channel, InputSender};
    use crate::physics::VehicleSpec;

    fn get_test_session(
        settings: &Settings,
    ) -> (DrivingSession, InputSender, mpsc::Receiver<TelemetrySnapshot>) {
        let track: TrackMap = TrackData {
            width: 200,
            height: 200,
            bitmap: vec![vec![255; 200]; 200],
        }
        .into();
        let (sender, port) = input_channel(SteeringMode::Discrete);
        let (telemetry_sender, telemetry_receiver) = mpsc::channel();
        let session = DrivingSession::new(
            VehicleEntity::new(
                EntityLocation::new(100.0, 100.0, 1.5),
                0.0,
                VehicleSpec::default(),
            ),
            Arc::new(track),
            port,
            Box::new(ChannelSink::new(telemetry_sender)),
            PhysicsModel::default(),
            settings,
        );
        (session, sender, telemetry_receiver)
    }

    #[test]
    fn frames_before_start_do_nothing() {
        let settings = Settings::defaults().unwrap();
        let (mut session, sender, telemetry) = get_test_session(&settings);
        sender.send(InputEvent::Throttle(ThrottleCommand::Accelerate));

        session.frame(Instant::now());
        assert_eq!(session.vehicle().speed, 0.0);
        assert!(telemetry.try_recv().is_err());
    }

    #[test]
    fn inputs_drive_the_car_between_frames() {
        let settings = Settings::defaults().unwrap();
        let (mut session, sender, _telemetry) = get_test_session(&settings);
        session.start();

        let t0 = Instant::now();
        session.frame(t0);
        assert_eq!(session.vehicle().speed, 0.0);

        sender.send(InputEvent::Throttle(ThrottleCommand::Accelerate));
        session.frame(t0 + Duration::from_millis(100));
        assert!((session.vehicle().speed - 8.51).abs() < 1e-9);
        assert_eq!(session.vehicle().controls.acceleration_input, 1.0);
    }

    #[test]
    fn stop_is_idempotent_and_freezes_the_car() {
        let settings = Settings::defaults().unwrap();
        let (mut session, sender, _telemetry) = get_test_session(&settings);
        session.start();
        sender.send(InputEvent::Throttle(ThrottleCommand::Accelerate));
        let t0 = Instant::now();
        session.frame(t0);
        session.frame(t0 + Duration::from_millis(16));

        session.stop();
        session.stop();
        assert!(!session.stop_handle().stop());
        assert!(!session.is_running());
        assert!(session.is_stopped());

        // no restarting either
        session.start();
        assert!(!session.is_running());

        let frozen = session.vehicle().clone();
        for n in 2..10 {
            session.frame(t0 + Duration::from_millis(16 * n));
        }
        assert_eq!(*session.vehicle(), frozen);
    }

    #[test]
    fn telemetry_is_throttled() {
        let settings = Settings::defaults().unwrap();
        let (mut session, _sender, telemetry) = get_test_session(&settings);
        session.start();

        let t0 = Instant::now();
        // one second of 16ms frames
        for n in 0..63 {
            session.frame(t0 + Duration::from_millis(16 * n));
        }
        let snapshots: Vec<_> = telemetry.try_iter().collect();
        assert!(
            (9..=11).contains(&snapshots.len()),
            "{} snapshots",
            snapshots.len()
        );
        assert!(snapshots.iter().all(|s| s.on_track));
        assert_eq!(snapshots[0].vehicle.heading, "1.500");
    }

    #[test]
    fn telemetry_reports_off_track_on_an_unloaded_map() {
        let settings = Settings::defaults().unwrap();
        let (_sender, port) = input_channel(SteeringMode::Discrete);
        let (telemetry_sender, telemetry) = mpsc::channel();
        let mut session = DrivingSession::new(
            VehicleEntity::at_start(&settings),
            Arc::new(TrackMap::empty()),
            port,
            Box::new(ChannelSink::new(telemetry_sender)),
            PhysicsModel::default(),
            &settings,
        );
        session.start();
        session.frame(Instant::now());

        let snapshot = telemetry.try_recv().unwrap();
        assert!(!snapshot.on_track);
        assert!(snapshot.to_json().contains(r#""onTrack":false"#));
    }

    #[test]
    fn run_ends_after_session_duration() {
        let mut settings = Settings::defaults().unwrap();
        settings.session_duration_ms = 50;
        settings.frame_interval_ms = 5;
        let (mut session, sender, telemetry) = get_test_session(&settings);
        sender.send(InputEvent::Throttle(ThrottleCommand::Accelerate));

        session.run();

        assert!(!session.is_running());
        assert!(session.vehicle().speed > 0.0);
        assert!(telemetry.try_iter().count() >= 1);
    }

    #[test]
    fn stop_handle_ends_run_from_another_thread() {
        let settings = Settings::defaults().unwrap();
        let (mut session, _sender, _telemetry) = get_test_session(&settings);
        let handle = session.stop_handle();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            handle.stop();
        });
        session.run();
        stopper.join().unwrap();

        assert!(session.is_stopped());
    }

    #[test]
    fn run_after_stop_returns_immediately() {
        let settings = Settings::defaults().unwrap();
        let (mut session, sender, telemetry) = get_test_session(&settings);
        sender.send(InputEvent::Throttle(ThrottleCommand::Accelerate));
        session.stop_handle().stop();

        session.run();

        assert_eq!(session.vehicle().controls.acceleration_input, 0.0);
        assert!(telemetry.try_recv().is_err());
    }
}
