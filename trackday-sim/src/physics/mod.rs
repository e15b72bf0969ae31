use trackday_core::track::TrackMap;
use trackday_core::{Settings, SteeringDecayMode};

pub mod constants;
pub mod vehicle_entity;


use constants::*;
pub use vehicle_entity::{VehicleEntity, VehicleSpec};

// The tunable half of the motion model; the per-car half lives on VehicleSpec
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PhysicsModel {
    pub air_density: f64,
    pub drag_coefficient: f64,
    pub frontal_area: f64,
    pub rolling_resistance: f64,
    pub on_track_grip: f64,
    pub off_track_grip: f64,
    pub steering_rate: f64,
    pub steering_decay: SteeringDecay,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SteeringDecay {
    // degrees removed on every call, so it runs faster at higher frame rates
    PerStep(f64),
    // degrees per second
    PerSecond(f64),
}

impl Default for PhysicsModel {
    fn default() -> Self {
        PhysicsModel {
            air_density: AIR_DENSITY,
            drag_coefficient: DRAG_COEFFICIENT,
            frontal_area: FRONTAL_AREA,
            rolling_resistance: ROLLING_RESISTANCE,
            on_track_grip: ON_TRACK_GRIP,
            off_track_grip: OFF_TRACK_GRIP,
            steering_rate: STEERING_RATE,
            steering_decay: SteeringDecay::PerStep(STEERING_DECAY_STEP),
        }
    }
}

impl PhysicsModel {
    // rates are magnitudes; a negative one would steer away from its target
    pub fn from_settings(settings: &Settings) -> Self {
        PhysicsModel {
            air_density: settings.air_density,
            drag_coefficient: settings.drag_coefficient,
            frontal_area: settings.frontal_area,
            rolling_resistance: settings.rolling_resistance,
            on_track_grip: settings.on_track_grip,
            off_track_grip: settings.off_track_grip,
            steering_rate: settings.steering_rate.abs(),
            steering_decay: match settings.steering_decay_mode {
                SteeringDecayMode::PerStep => {
                    SteeringDecay::PerStep(settings.steering_decay_step.abs())
                }
                SteeringDecayMode::PerSecond => {
                    SteeringDecay::PerSecond(settings.steering_decay_rate.abs())
                }
            },
        }
    }

    // drag per unit of speed
    pub fn drag_factor(&self) -> f64 {
        0.5 * self.air_density * self.drag_coefficient * self.frontal_area
    }

    pub fn grip(&self, on_track: bool) -> f64 {
        if on_track {
            self.on_track_grip
        } else {
            self.off_track_grip
        }
    }
}

// moves current toward target by at most max_delta without passing it
fn approach(current: f64, target: f64, max_delta: f64) -> f64 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + max_delta.copysign(target - current)
    }
}

impl VehicleEntity {
    /* Given the car as it is now, compute and return the car one time step
     * later. Never fails: degenerate steps collapse into straight-line motion */
    pub fn do_physics_step(
        &self,
        time_step: f64,
        track: &TrackMap,
        model: &PhysicsModel,
    ) -> VehicleEntity {
        // a clock running backwards is treated as no time passing
        let time_step = if time_step.is_finite() && time_step > 0.0 {
            time_step
        } else {
            0.0
        };
        let spec = *self.spec();

        let current_steering_angle = self.next_steering_angle(time_step, model);
        let steering_angle_rad = current_steering_angle.to_radians();

        let mut entity_location = self.entity_location;
        let on_track = track.is_on_track(entity_location.position.x, entity_location.position.y);

        let mut speed = self.speed
            + self.controls.acceleration_input
                * model.grip(on_track)
                * spec.max_acceleration
                * time_step;

        // no reverse gear: resistance and braking stop at zero
        let drag = model.drag_factor() * speed;
        speed = f64::max(speed - (drag + model.rolling_resistance) * time_step, 0.0);

        if current_steering_angle != 0.0 {
            let turning_radius = spec.wheelbase / steering_angle_rad.tan();
            if turning_radius.is_finite() && turning_radius != 0.0 {
                let angular_velocity = speed / turning_radius;
                entity_location.heading += angular_velocity * time_step;
            }
        }

        // forward motion decreases x and y along the heading
        entity_location.position.x -= speed * entity_location.heading.cos() * time_step;
        entity_location.position.y -= speed * entity_location.heading.sin() * time_step;

        let mut next = self.clone();
        next.entity_location = entity_location;
        next.speed = speed;
        next.current_steering_angle = current_steering_angle;
        next
    }

    fn next_steering_angle(&self, time_step: f64, model: &PhysicsModel) -> f64 {
        let max_angle = self.spec().max_steering_angle.abs();
        let steering_input = self.controls.steering_input;

        let angle = if steering_input != 0.0 {
            let target = steering_input.clamp(-1.0, 1.0) * max_angle;
            approach(
                self.current_steering_angle,
                target,
                model.steering_rate * time_step,
            )
        } else if self.current_steering_angle != 0.0 {
            let decay = match model.steering_decay {
                SteeringDecay::PerStep(degrees) => degrees,
                SteeringDecay::PerSecond(rate) => rate * time_step,
            };
            approach(self.current_steering_angle, 0.0, decay)
        } else {
            0.0
        };

        angle.clamp(-max_angle, max_angle)
    }
}
