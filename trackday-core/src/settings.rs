use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::Deserialize;

use crate::player_inputs::SteeringMode;

// How the steering angle returns to center once the player lets go
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SteeringDecayMode {
    // fixed number of degrees per integration call, regardless of dt
    PerStep,
    // degrees per second, scaled by dt
    PerSecond,
}

// Where telemetry snapshots go
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryOutput {
    // a JSON line in the log under the "telemetry" target
    Log,
    // a bare JSON line on stdout, for a display reading the pipe
    Stdout,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub track_path: String,
    pub log_level: String,

    pub frame_interval_ms: u64,
    pub telemetry_interval_ms: u64,
    pub telemetry_output: TelemetryOutput,
    // 0 runs until the input source quits
    pub session_duration_ms: u64,

    pub start_x: f64,
    pub start_y: f64,
    pub start_heading: f64,
    pub start_speed: f64,

    pub max_steering_angle: f64,
    pub max_acceleration: f64,
    pub wheelbase: f64,

    pub steering_rate: f64,
    pub steering_mode: SteeringMode,
    pub steering_decay_mode: SteeringDecayMode,
    pub steering_decay_step: f64,
    pub steering_decay_rate: f64,

    pub air_density: f64,
    pub drag_coefficient: f64,
    pub frontal_area: f64,
    pub rolling_resistance: f64,
    pub on_track_grip: f64,
    pub off_track_grip: f64,
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        Settings::builder()?
            .add_source(File::with_name("config.yaml").required(false))
            .build()?
            .try_deserialize()
    }

    // every key has a default so an absent config file still yields a
    // drivable session
    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("track_path", "track.png")?
            .set_default("log_level", "info")?
            .set_default("frame_interval_ms", 16)?
            .set_default("telemetry_interval_ms", 100)?
            .set_default("telemetry_output", "log")?
            .set_default("session_duration_ms", 0)?
            .set_default("start_x", 100.0)?
            .set_default("start_y", 100.0)?
            .set_default("start_heading", 1.5)?
            .set_default("start_speed", 0.0)?
            .set_default("max_steering_angle", 40.0)?
            .set_default("max_acceleration", 100.0)?
            .set_default("wheelbase", 36.0)?
            .set_default("steering_rate", 160.0)?
            .set_default("steering_mode", "incremental")?
            .set_default("steering_decay_mode", "per_step")?
            .set_default("steering_decay_step", 1.0)?
            .set_default("steering_decay_rate", 60.0)?
            .set_default("air_density", 1.225)?
            .set_default("drag_coefficient", 0.4)?
            .set_default("frontal_area", 2.0)?
            .set_default("rolling_resistance", 10.0)?
            .set_default("on_track_grip", 1.0)?
            .set_default("off_track_grip", 0.5)
    }

    pub fn defaults() -> Result<Settings, ConfigError> {
        Settings::builder()?.build()?.try_deserialize()
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}
