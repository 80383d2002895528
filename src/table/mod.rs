mod delimited;
mod spreadsheet;

use std::path::Path;

use tracing::info;

use crate::error::{Odk2OdmError, Result};

pub use delimited::read_delimited;
pub use spreadsheet::read_spreadsheet;

/// One data row of a survey table, header excluded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurveyRow {
    fields: Vec<String>,
}

impl SurveyRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Cell at a 1-based column index, `None` when the row is too short.
    pub fn cell(&self, column: usize) -> Option<&str> {
        column
            .checked_sub(1)
            .and_then(|i| self.fields.get(i))
            .map(String::as_str)
    }

    pub fn width(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl<S: Into<String>> FromIterator<S> for SurveyRow {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// How to read an input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Field delimiter for text tables. Defaults to `,`, which is what ODK
    /// Central exports. Ignored for spreadsheet workbooks.
    pub delimiter: u8,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether the path names a workbook that should be read with calamine.
pub fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| SPREADSHEET_EXTENSIONS.contains(&ext.as_str()))
}

/// Reads every data row of a survey table, dropping the header row.
pub fn read_table(path: &Path, options: &TableOptions) -> Result<Vec<SurveyRow>> {
    let rows = if is_spreadsheet(path) {
        read_spreadsheet(path)?
    } else {
        read_delimited(path, options.delimiter)?
    };

    info!("Read {} survey rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parses a delimiter given on the command line.
///
/// Accepts a single ASCII character, plus `\t` and `tab` for tab-separated
/// exports.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "\\t" | "tab" | "TAB" => Ok(b'\t'),
        _ => match raw.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(Odk2OdmError::InvalidDelimiter(raw.to_string())),
        },
    }
}
