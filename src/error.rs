use thiserror::Error;

/// Errors raised while resolving columns, reading tables and writing outputs.
#[derive(Error, Debug)]
pub enum Odk2OdmError {
    #[error("Invalid column range '{expression}': {reason}")]
    InvalidRange { expression: String, reason: String },

    #[error("Column {column} is out of bounds for a row with {width} fields")]
    ColumnOutOfBounds { column: usize, width: usize },

    #[error("Unreadable geopoint: {0}")]
    PointParse(String),

    #[error("Invalid delimiter '{0}': expected a single ASCII character")]
    InvalidDelimiter(String),

    #[error("No submissions found in {0}")]
    NoSubmissions(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Spreadsheet(#[from] calamine::Error),
}

impl Odk2OdmError {
    pub(crate) fn invalid_range(expression: &str, reason: impl Into<String>) -> Self {
        Odk2OdmError::InvalidRange {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Odk2OdmError>;
