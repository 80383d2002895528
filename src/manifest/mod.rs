mod builder;
mod types;
mod writer;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::columns::ColumnRange;
use crate::error::Result;
use crate::table::read_table;

pub use builder::build;
pub use types::{
    DEFAULT_PROJECTION, GeoColumns, Manifest, ManifestOptions, ManifestRow, Skip, SkipReason,
};
pub use writer::{GEO_TXT, geo_txt_path, write_manifest};

/// Outcome of a [`make_geo_txt`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoTxtSummary {
    pub output: PathBuf,
    pub rows_written: usize,
    pub skips: Vec<Skip>,
}

/// Reads `input`, builds the manifest and writes `geo.txt` beside it.
///
/// Column references are resolved by the caller, so a malformed range has
/// already failed before anything is read or written.
pub fn make_geo_txt(
    input: &Path,
    photo_columns: &ColumnRange,
    columns: &GeoColumns,
    options: &ManifestOptions,
) -> Result<GeoTxtSummary> {
    let rows = read_table(input, &options.table)?;
    let manifest = build(&rows, photo_columns, columns, &options.projection);

    let output = geo_txt_path(input);
    let file = std::fs::File::create(&output)?;
    write_manifest(std::io::BufWriter::new(file), &manifest)?;

    let skipped_out_of_bounds = manifest.out_of_bounds().count();
    info!(
        "Wrote {} photo locations to {} ({} empty cells, {} out-of-bounds columns skipped)",
        manifest.rows.len(),
        output.display(),
        manifest.skips.len() - skipped_out_of_bounds,
        skipped_out_of_bounds
    );

    Ok(GeoTxtSummary {
        output,
        rows_written: manifest.rows.len(),
        skips: manifest.skips,
    })
}
