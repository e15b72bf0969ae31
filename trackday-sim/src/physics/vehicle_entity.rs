use trackday_core::entity_location::EntityLocation;
use trackday_core::player_inputs::ControlState;
use trackday_core::telemetry::{three_decimals, VehicleSnapshot};
use trackday_core::Settings;

use super::constants::{MAX_ACCELERATION, MAX_STEERING_ANGLE, WHEELBASE};

// Fixed per car; nothing writes these once the car exists
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VehicleSpec {
    pub max_steering_angle: f64, // degrees
    pub max_acceleration: f64,   // units per second^2
    pub wheelbase: f64,          // units between the axles
}

impl Default for VehicleSpec {
    fn default() -> Self {
        VehicleSpec {
            max_steering_angle: MAX_STEERING_ANGLE,
            max_acceleration: MAX_ACCELERATION,
            wheelbase: WHEELBASE,
        }
    }
}

impl VehicleSpec {
    pub fn from_settings(settings: &Settings) -> Self {
        VehicleSpec {
            max_steering_angle: settings.max_steering_angle,
            max_acceleration: settings.max_acceleration,
            wheelbase: settings.wheelbase,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VehicleEntity {
    pub entity_location: EntityLocation,
    pub speed: f64, // units per second, never negative after a physics step

    pub controls: ControlState,
    pub current_steering_angle: f64, // degrees, lags controls.steering_input

    spec: VehicleSpec,
}

impl VehicleEntity {
    pub fn new(entity_location: EntityLocation, speed: f64, spec: VehicleSpec) -> Self {
        VehicleEntity {
            entity_location,
            speed,
            controls: ControlState::default(),
            current_steering_angle: 0.0,
            spec,
        }
    }

    // the car a fresh session starts with
    pub fn at_start(settings: &Settings) -> Self {
        VehicleEntity::new(
            EntityLocation::new(settings.start_x, settings.start_y, settings.start_heading),
            settings.start_speed,
            VehicleSpec::from_settings(settings),
        )
    }

    pub fn spec(&self) -> &VehicleSpec {
        &self.spec
    }

    pub fn snapshot(&self) -> VehicleSnapshot {
        VehicleSnapshot {
            position: self.entity_location.rounded_position(),
            current_steering_angle: self.current_steering_angle,
            speed: three_decimals(self.speed),
            heading: three_decimals(self.entity_location.heading),
        }
    }
}
