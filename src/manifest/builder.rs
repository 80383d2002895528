use tracing::{debug, warn};

use crate::columns::ColumnRange;
use crate::manifest::types::{GeoColumns, Manifest, ManifestRow, Skip, SkipReason};
use crate::table::SurveyRow;

fn cell_at(row: &SurveyRow, column: usize) -> Result<&str, SkipReason> {
    row.cell(column).ok_or(SkipReason::ColumnOutOfBounds {
        column,
        width: row.width(),
    })
}

fn manifest_row(
    row: &SurveyRow,
    photo_column: usize,
    columns: &GeoColumns,
) -> Result<ManifestRow, SkipReason> {
    let photo = cell_at(row, photo_column)?;
    if photo.is_empty() {
        return Err(SkipReason::EmptyCell);
    }

    Ok(ManifestRow {
        photo: photo.to_string(),
        longitude: cell_at(row, columns.longitude)?.to_string(),
        latitude: cell_at(row, columns.latitude)?.to_string(),
        elevation: cell_at(row, columns.elevation)?.to_string(),
        accuracy: cell_at(row, columns.accuracy)?.to_string(),
    })
}

/// Builds the manifest for every (row, photo column) pair.
///
/// Rows are visited in table order and, within a row, photo columns in the
/// order of `photo_columns`. The photogrammetry pipeline matches lines to
/// photos in capture order, so this ordering must not change.
///
/// Empty photo cells and columns past the end of a row are skipped and
/// recorded in [`Manifest::skips`]; they never abort the build.
pub fn build(
    rows: &[SurveyRow],
    photo_columns: &ColumnRange,
    columns: &GeoColumns,
    projection: &str,
) -> Manifest {
    let mut manifest = Manifest {
        projection: projection.to_string(),
        rows: Vec::with_capacity(rows.len() * photo_columns.len()),
        skips: Vec::new(),
    };

    for (row_idx, row) in rows.iter().enumerate() {
        for &photo_column in photo_columns {
            match manifest_row(row, photo_column, columns) {
                Ok(manifest_row) => manifest.rows.push(manifest_row),
                Err(reason) => {
                    let skip = Skip {
                        row: row_idx + 1,
                        photo_column,
                        reason,
                    };
                    match reason {
                        SkipReason::EmptyCell => debug!("Skipping {}", skip),
                        SkipReason::ColumnOutOfBounds { .. } => warn!("Skipping {}", skip),
                    }
                    manifest.skips.push(skip);
                }
            }
        }
    }

    manifest
}
