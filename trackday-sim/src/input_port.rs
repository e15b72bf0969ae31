use std::sync::mpsc::{self, Receiver, Sender};

use tracing::debug;

use trackday_core::player_inputs::{ControlState, InputEvent, SteeringMode};

// The writing half, handed to whatever produces input (a terminal, a
// gamepad thread, a test). Cheap to clone; each clone feeds the same port.
#[derive(Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

impl InputSender {
    // false once the session on the other end is gone
    pub fn send(&self, event: InputEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

// The reading half, polled by the driving loop once per frame
pub struct InputPort {
    receiver: Receiver<InputEvent>,
    controls: ControlState,
    steering_mode: SteeringMode,
}

pub fn input_channel(steering_mode: SteeringMode) -> (InputSender, InputPort) {
    let (sender, receiver) = mpsc::channel();
    (
        InputSender { sender },
        InputPort {
            receiver,
            controls: ControlState::default(),
            steering_mode,
        },
    )
}

impl InputPort {
    // apply everything that arrived since the last frame, in order
    pub fn sync_incoming(&mut self) -> ControlState {
        while let Ok(event) = self.receiver.try_recv() {
            debug!(?event, "input");
            self.controls.apply(event, self.steering_mode);
        }
        self.controls
    }

    pub fn controls(&self) -> ControlState {
        self.controls
    }
}
