// Fallback values for PhysicsModel when no settings are at hand; these match
// the config defaults in trackday-core

// 0.5 * AIR_DENSITY * DRAG_COEFFICIENT * FRONTAL_AREA works out to 0.49, the
// drag felt per unit of speed
pub const AIR_DENSITY: f64 = 1.225;
pub const DRAG_COEFFICIENT: f64 = 0.4;
pub const FRONTAL_AREA: f64 = 2.0;

// constant deceleration, in units/s^2, whenever the car is rolling
pub const ROLLING_RESISTANCE: f64 = 10.0;

pub const ON_TRACK_GRIP: f64 = 1.0;
pub const OFF_TRACK_GRIP: f64 = 0.5;

// degrees per second the steering rack can turn the wheels
pub const STEERING_RATE: f64 = 160.0;
pub const STEERING_DECAY_STEP: f64 = 1.0;
pub const STEERING_DECAY_RATE: f64 = 60.0;

pub const MAX_STEERING_ANGLE: f64 = 40.0;
pub const MAX_ACCELERATION: f64 = 100.0;
pub const WHEELBASE: f64 = 36.0;
