use serde::{Deserialize, Serialize};

// how much one Left/Right press moves the wheel in incremental mode
pub const STEERING_INCREMENT: f64 = 0.2;

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Steering(SteeringCommand),
    Throttle(ThrottleCommand),
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum SteeringCommand {
    Left,
    Right,
    Center,
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum ThrottleCommand {
    Accelerate,
    Brake,
    Coast,
}

#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SteeringMode {
    // Left/Right snap straight to full lock
    Discrete,
    // Left/Right nudge the input by STEERING_INCREMENT each time they arrive
    Incremental,
}

impl ThrottleCommand {
    pub fn acceleration_input(self) -> f64 {
        match self {
            ThrottleCommand::Accelerate => 1.0,
            ThrottleCommand::Brake => -1.0,
            ThrottleCommand::Coast => 0.0,
        }
    }
}

// ControlState is the pair of normalized controls the physics step reads
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ControlState {
    pub steering_input: f64,     // [-1, 1], negative is left
    pub acceleration_input: f64, // -1 brake, 0 coast, 1 accelerate
}

impl ControlState {
    pub fn apply(&mut self, event: InputEvent, mode: SteeringMode) {
        match event {
            InputEvent::Throttle(command) => {
                self.acceleration_input = command.acceleration_input();
            }
            InputEvent::Steering(SteeringCommand::Center) => {
                self.steering_input = 0.0;
            }
            InputEvent::Steering(command) => {
                let direction = if command == SteeringCommand::Left {
                    -1.0
                } else {
                    1.0
                };
                self.steering_input = match mode {
                    SteeringMode::Discrete => direction,
                    SteeringMode::Incremental => {
                        (self.steering_input + direction * STEERING_INCREMENT).clamp(-1.0, 1.0)
                    }
                };
            }
        }
    }
}

impl std::str::FromStr for InputEvent {
    type Err = String;

    // line-oriented commands, as typed into a terminal
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(InputEvent::Steering(SteeringCommand::Left)),
            "right" | "r" => Ok(InputEvent::Steering(SteeringCommand::Right)),
            "center" | "c" => Ok(InputEvent::Steering(SteeringCommand::Center)),
            "accelerate" | "up" | "w" => Ok(InputEvent::Throttle(ThrottleCommand::Accelerate)),
            "brake" | "down" | "s" => Ok(InputEvent::Throttle(ThrottleCommand::Brake)),
            "coast" => Ok(InputEvent::Throttle(ThrottleCommand::Coast)),
            other => Err(format!("unknown input command '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discrete_steering_snaps_to_full_lock() {
        let mut controls = ControlState::default();
        controls.apply(
            InputEvent::Steering(SteeringCommand::Left),
            SteeringMode::Discrete,
        );
        assert_eq!(controls.steering_input, -1.0);
        controls.apply(
            InputEvent::Steering(SteeringCommand::Right),
            SteeringMode::Discrete,
        );
        assert_eq!(controls.steering_input, 1.0);
        controls.apply(
            InputEvent::Steering(SteeringCommand::Center),
            SteeringMode::Discrete,
        );
        assert_eq!(controls.steering_input, 0.0);
    }

    #[test]
    fn incremental_steering_clamps_at_full_lock() {
        let mut controls = ControlState::default();
        for _ in 0..8 {
            controls.apply(
                InputEvent::Steering(SteeringCommand::Right),
                SteeringMode::Incremental,
            );
        }
        assert_eq!(controls.steering_input, 1.0);

        controls.apply(
            InputEvent::Steering(SteeringCommand::Left),
            SteeringMode::Incremental,
        );
        assert!((controls.steering_input - 0.8).abs() < 1e-9);

        for _ in 0..20 {
            controls.apply(
                InputEvent::Steering(SteeringCommand::Left),
                SteeringMode::Incremental,
            );
        }
        assert_eq!(controls.steering_input, -1.0);
    }

    #[test]
    fn throttle_maps_to_acceleration_input() {
        let mut controls = ControlState::default();
        controls.apply(
            InputEvent::Throttle(ThrottleCommand::Brake),
            SteeringMode::Discrete,
        );
        assert_eq!(controls.acceleration_input, -1.0);
        controls.apply(
            InputEvent::Throttle(ThrottleCommand::Accelerate),
            SteeringMode::Discrete,
        );
        assert_eq!(controls.acceleration_input, 1.0);
        controls.apply(
            InputEvent::Throttle(ThrottleCommand::Coast),
            SteeringMode::Discrete,
        );
        assert_eq!(controls.acceleration_input, 0.0);
    }

    #[test]
    fn parses_terminal_commands() {
        assert_eq!(
            " Left\n".parse::<InputEvent>(),
            Ok(InputEvent::Steering(SteeringCommand::Left))
        );
        assert_eq!(
            "up".parse::<InputEvent>(),
            Ok(InputEvent::Throttle(ThrottleCommand::Accelerate))
        );
        assert!("honk".parse::<InputEvent>().is_err());
    }
}
