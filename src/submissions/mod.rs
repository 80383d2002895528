mod table;

use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::{Odk2OdmError, Result};

pub use table::{GEOPOINT_HEADERS, SubmissionTable, render_value, submission_table};

/// One submission as returned by the OData feed, keys in server order.
pub type Submission = IndexMap<String, Value>;

#[derive(Deserialize)]
#[serde(untagged)]
enum SubmissionDocument {
    OData { value: Vec<Submission> },
    Bare(Vec<Submission>),
}

/// Settings for flattening a submissions document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOptions {
    /// Output field delimiter, `;` unless set.
    pub delimiter: u8,
    /// 1-based column holding the geopoint. Latitude, longitude, elevation and
    /// accuracy columns are inserted right after it.
    pub geopoint_column: Option<usize>,
    /// Output file stem; the input file stem when unset.
    pub form: Option<String>,
    /// Output directory; the input's directory when unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for SubmissionOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            geopoint_column: None,
            form: None,
            output_dir: None,
        }
    }
}

/// Loads submissions from an OData document (`{"value": [...]}`) or a bare
/// JSON array of submission objects.
pub fn load_submissions(path: &Path) -> Result<Vec<Submission>> {
    let text = fs::read_to_string(path)?;
    let document: SubmissionDocument = serde_json::from_str(&text)?;
    let submissions = match document {
        SubmissionDocument::OData { value } => value,
        SubmissionDocument::Bare(submissions) => submissions,
    };

    if submissions.is_empty() {
        return Err(Odk2OdmError::NoSubmissions(path.display().to_string()));
    }

    Ok(submissions)
}

/// Where [`convert_submissions`] writes its output for `input`.
pub fn output_path(input: &Path, options: &SubmissionOptions) -> PathBuf {
    let form = options.form.clone().unwrap_or_else(|| {
        input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "submissions".to_string())
    });
    let dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| input.parent().unwrap_or_else(|| Path::new("")).to_path_buf());

    dir.join(format!("{form}.csv"))
}

/// Flattens a saved submissions document into `<form>.csv`.
pub fn convert_submissions(input: &Path, options: &SubmissionOptions) -> Result<PathBuf> {
    let submissions = load_submissions(input)?;
    let table = submission_table(&submissions, options.geopoint_column)?;

    let output = output_path(input, options);
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_path(&output)?;

    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    info!(
        "Wrote {} submissions with {} columns to {}",
        table.rows.len(),
        table.headers.len(),
        output.display()
    );
    Ok(output)
}
