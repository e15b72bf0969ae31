use std::io::BufRead;
use std::sync::mpsc;
use std::thread;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use trackday_core::player_inputs::InputEvent;
use trackday_core::telemetry::TelemetrySnapshot;
use trackday_core::{TelemetryOutput, GLOBAL_CONFIG};

use trackday_sim::game::telemetry::{ChannelSink, LogSink, TelemetrySink};
use trackday_sim::game::{DrivingSession, StopHandle};
use trackday_sim::input_port::{input_channel, InputSender};
use trackday_sim::physics::{PhysicsModel, VehicleEntity};
use trackday_sim::track_loader::{ImageTrackSource, TrackCache};

fn is_quit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("quit")
}

// reads one command per line until stdin closes or someone types quit
fn pump_terminal_input(sender: InputSender, stop: StopHandle) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stopped reading input: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        if is_quit(&line) {
            break;
        }
        match line.parse::<InputEvent>() {
            Ok(event) => {
                if !sender.send(event) {
                    return;
                }
            }
            Err(e) => warn!("{}", e),
        }
    }
    stop.stop();
}

// stdout telemetry goes through a channel so a slow pipe never holds up a frame
fn telemetry_sink(output: TelemetryOutput) -> Box<dyn TelemetrySink> {
    match output {
        TelemetryOutput::Log => Box::new(LogSink),
        TelemetryOutput::Stdout => {
            let (sender, receiver) = mpsc::channel::<TelemetrySnapshot>();
            thread::spawn(move || {
                for snapshot in receiver {
                    println!("{}", snapshot.to_json());
                }
            });
            Box::new(ChannelSink::new(sender))
        }
    }
}

fn main() -> anyhow::Result<()> {
    let level = GLOBAL_CONFIG.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // a missing track is reported and the car drives on an all-grass map
    let mut track = TrackCache::new(ImageTrackSource::new(&GLOBAL_CONFIG.track_path));
    let track = match track.load() {
        Ok(map) => map,
        Err(_) => track.map(),
    };

    let (sender, port) = input_channel(GLOBAL_CONFIG.steering_mode);
    let mut session = DrivingSession::new(
        VehicleEntity::at_start(&GLOBAL_CONFIG),
        track,
        port,
        telemetry_sink(GLOBAL_CONFIG.telemetry_output),
        PhysicsModel::from_settings(&GLOBAL_CONFIG),
        &GLOBAL_CONFIG,
    );

    let stop = session.stop_handle();
    thread::spawn(move || pump_terminal_input(sender, stop));

    info!(
        session = %session.id(),
        "driving; commands: left, right, center, accelerate, brake, coast, quit"
    );
    session.run();

    Ok(())
}
