use std::fmt;

use crate::columns::{column_index, column_label};
use crate::error::Result;
use crate::table::TableOptions;

/// Coordinate reference system written when none is given.
pub const DEFAULT_PROJECTION: &str = "EPSG:4326";

/// The four fixed columns every manifest row copies from its survey row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoColumns {
    pub longitude: usize,
    pub latitude: usize,
    pub elevation: usize,
    pub accuracy: usize,
}

impl GeoColumns {
    /// Resolves column references written as numbers or spreadsheet letters.
    pub fn resolve(longitude: &str, latitude: &str, elevation: &str, accuracy: &str) -> Result<Self> {
        Ok(Self {
            longitude: column_index(longitude.trim())?,
            latitude: column_index(latitude.trim())?,
            elevation: column_index(elevation.trim())?,
            accuracy: column_index(accuracy.trim())?,
        })
    }
}

/// Settings for producing `geo.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestOptions {
    /// Written alone on the first line. Any CRS string OpenDroneMap accepts;
    /// defaults to [`DEFAULT_PROJECTION`].
    pub projection: String,
    pub table: TableOptions,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            projection: DEFAULT_PROJECTION.to_string(),
            table: TableOptions::default(),
        }
    }
}

/// One georeferenced photo line of `geo.txt`.
///
/// Layout is `photo lon lat ele yaw pitch roll horizontal_acc vertical_acc`;
/// the three angles are always `0` and the GPS accuracy fills both accuracy
/// slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub photo: String,
    pub longitude: String,
    pub latitude: String,
    pub elevation: String,
    pub accuracy: String,
}

impl ManifestRow {
    pub fn fields(&self) -> [&str; 9] {
        [
            &self.photo,
            &self.longitude,
            &self.latitude,
            &self.elevation,
            "0",
            "0",
            "0",
            &self.accuracy,
            &self.accuracy,
        ]
    }
}

/// Why a (row, photo column) pair produced no manifest line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyCell,
    ColumnOutOfBounds { column: usize, width: usize },
}

/// A (row, photo column) pair left out of the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skip {
    /// 1-based data row, header excluded.
    pub row: usize,
    pub photo_column: usize,
    pub reason: SkipReason,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column {}: ", self.row, column_label(self.photo_column))?;
        match self.reason {
            SkipReason::EmptyCell => write!(f, "empty cell"),
            SkipReason::ColumnOutOfBounds { column, width } => write!(
                f,
                "column {} is past the end of a {}-field row",
                column_label(column),
                width
            ),
        }
    }
}

/// Built manifest: the projection line followed by photo rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    pub projection: String,
    pub rows: Vec<ManifestRow>,
    pub skips: Vec<Skip>,
}

impl Manifest {
    pub fn out_of_bounds(&self) -> impl Iterator<Item = &Skip> {
        self.skips
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::ColumnOutOfBounds { .. }))
    }
}
