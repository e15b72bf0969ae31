pub mod entity_location;
pub mod player_inputs;
mod settings;
pub mod telemetry;
pub mod track;

pub use settings::{Settings, SteeringDecayMode, TelemetryOutput, GLOBAL_CONFIG};
