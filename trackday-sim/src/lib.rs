pub mod error;
pub mod game;
pub mod input_port;
pub mod physics;
pub mod track_loader;
