use std::path::Path;

use csv::ReaderBuilder;

use crate::error::Result;
use crate::table::SurveyRow;

/// Reads a delimited text table. Rows may differ in length.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Vec<SurveyRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let mut rows: Vec<SurveyRow> = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().collect());
    }

    Ok(rows)
}
