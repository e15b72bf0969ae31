use serde::{Deserialize, Serialize};

use crate::entity_location::RoundedPosition;

// Speed and heading travel as preformatted strings so every display shows
// the same three decimals
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSnapshot {
    pub position: RoundedPosition,
    pub current_steering_angle: f64,
    pub speed: String,
    pub heading: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    #[serde(flatten)]
    pub vehicle: VehicleSnapshot,
    pub on_track: bool,
}

impl TelemetrySnapshot {
    pub fn to_json(&self) -> String {
        // every field is a plain number, string or bool
        serde_json::to_string(self).unwrap_or_default()
    }
}

pub fn three_decimals(value: f64) -> String {
    format!("{:.3}", value)
}
