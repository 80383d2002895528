use std::io::Write;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;

use crate::error::Result;
use crate::manifest::types::Manifest;

/// File name OpenDroneMap looks for next to the input images.
pub const GEO_TXT: &str = "geo.txt";

/// `geo.txt` in the same directory as `input`.
pub fn geo_txt_path(input: &Path) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(GEO_TXT)
}

/// Writes the projection line and then one space-separated line per row.
///
/// Fields that contain a space are quoted.
pub fn write_manifest<W: Write>(writer: W, manifest: &Manifest) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b' ')
        .flexible(true)
        .from_writer(writer);

    writer.write_record([manifest.projection.as_str()])?;
    for row in &manifest.rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;

    Ok(())
}
