use glam::DVec2;
use serde::{Deserialize, Serialize};

// EntityLocation is what the simulation hands to anything drawing the car:
// where it is on the track bitmap and which way it is pointing
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityLocation {
    pub position: DVec2,
    pub heading: f64, // radians, accumulates past 2pi rather than wrapping
}

impl EntityLocation {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        EntityLocation {
            position: DVec2::new(x, y),
            heading,
        }
    }

    // halves round up, toward positive infinity
    pub fn rounded_position(&self) -> RoundedPosition {
        RoundedPosition {
            x: (self.position.x + 0.5).floor() as i64,
            y: (self.position.y + 0.5).floor() as i64,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedPosition {
    pub x: i64,
    pub y: i64,
}
