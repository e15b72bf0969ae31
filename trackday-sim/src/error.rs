use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackError {
    /// The source image could not be opened or decoded
    #[error("track data unavailable: could not load {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, TrackError>;
