use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::DynamicImage;
use tracing::{error, info};

use trackday_core::track::{TrackData, TrackMap};

use crate::error::{Result, TrackError};

// One cell per pixel, valued by the pixel's alpha: painted track is opaque
// (or partially so), everything else is transparent
pub fn track_data_from_image(image: &DynamicImage) -> TrackData {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let bitmap = rgba
        .rows()
        .map(|row| row.map(|pixel| pixel.0[3] as u32).collect())
        .collect();

    TrackData {
        width: width as usize,
        height: height as usize,
        bitmap,
    }
}

pub trait TrackSource {
    fn fetch(&self) -> Result<TrackData>;
}

pub struct ImageTrackSource {
    path: PathBuf,
}

impl ImageTrackSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        ImageTrackSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl TrackSource for ImageTrackSource {
    fn fetch(&self) -> Result<TrackData> {
        let image = image::open(&self.path).map_err(|source| TrackError::Unavailable {
            path: self.path.clone(),
            source,
        })?;
        Ok(track_data_from_image(&image))
    }
}

// Holds the session's track once a fetch succeeds; until then every lookup
// lands on the empty, all-off-track map
pub struct TrackCache<S: TrackSource> {
    source: S,
    map: Arc<TrackMap>,
    loaded: bool,
}

impl<S: TrackSource> TrackCache<S> {
    pub fn new(source: S) -> Self {
        TrackCache {
            source,
            map: Arc::new(TrackMap::empty()),
            loaded: false,
        }
    }

    // fetches on the first call (or after a failure); later calls are free
    pub fn load(&mut self) -> Result<Arc<TrackMap>> {
        if self.loaded {
            return Ok(self.map.clone());
        }

        match self.source.fetch() {
            Ok(data) => {
                let map = TrackMap::from(data);
                info!(
                    width = map.width(),
                    height = map.height(),
                    drivable_cells = map.on_track_cells(),
                    "track loaded"
                );
                self.map = Arc::new(map);
                self.loaded = true;
                Ok(self.map.clone())
            }
            Err(e) => {
                error!("{}", e);
                Err(e)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn map(&self) -> Arc<TrackMap> {
        self.map.clone()
    }
}
