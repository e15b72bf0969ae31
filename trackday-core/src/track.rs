use serde::{Deserialize, Serialize};

// TrackData is what a track source hands back: declared dimensions plus one
// row of cell values per line of the source image
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackData {
    pub width: usize,
    pub height: usize,
    pub bitmap: Vec<Vec<u32>>,
}

/// Read-only occupancy grid of the track. A cell is drivable when its value
/// is above zero; anything outside the grid is off track.
///
/// Only the cells the source actually supplied are stored; cells inside the
/// declared dimensions that were never supplied read as off track.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrackMap {
    width: usize,
    height: usize,
    rows: Vec<Vec<u32>>,
}

impl TrackMap {
    // an unloaded map, on which every lookup is off track
    pub fn empty() -> Self {
        TrackMap::default()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.is_empty())
    }

    pub fn value_at(&self, x: f64, y: f64) -> u32 {
        // NaN fails both comparisons and lands here too
        if !(x >= 0.0 && y >= 0.0) {
            return 0;
        }
        let (column, row) = (x.floor(), y.floor());
        if column >= self.width as f64 || row >= self.height as f64 {
            return 0;
        }
        self.rows
            .get(row as usize)
            .and_then(|cells| cells.get(column as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_on_track(&self, x: f64, y: f64) -> bool {
        self.value_at(x, y) > 0
    }

    pub fn on_track_cells(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&value| value > 0)
            .count()
    }
}

impl From<TrackData> for TrackMap {
    // the declared dimensions win: short rows read as off track past their
    // end and anything past width/height is dropped
    fn from(data: TrackData) -> Self {
        let (width, height) = (data.width, data.height);
        let rows = data
            .bitmap
            .into_iter()
            .take(height)
            .map(|mut row| {
                row.truncate(width);
                row
            })
            .collect();

        TrackMap {
            width,
            height,
            rows,
        }
    }
}

// hands back the supplied cells as they were stored, without padding
impl From<&TrackMap> for TrackData {
    fn from(map: &TrackMap) -> Self {
        TrackData {
            width: map.width,
            height: map.height,
            bitmap: map.rows.clone(),
        }
    }
}
