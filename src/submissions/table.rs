use indexmap::IndexSet;
use serde_json::Value;
use tracing::debug;

use crate::error::{Odk2OdmError, Result};
use crate::geopoint::point_from_value;
use crate::submissions::Submission;

/// Columns added after the geopoint column.
pub const GEOPOINT_HEADERS: [&str; 4] = ["lat", "lon", "elevation", "accuracy"];

/// Submissions flattened into text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Cell text for a submission value.
///
/// Strings are written verbatim, `null` as an empty cell, and nested objects or
/// arrays as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds the output table.
///
/// Headers are every key seen across all submissions, in first-seen order;
/// a submission without a key gets an empty cell. With a geopoint column the
/// four [`GEOPOINT_HEADERS`] columns follow it, empty when the point cannot be
/// read.
pub fn submission_table(
    submissions: &[Submission],
    geopoint_column: Option<usize>,
) -> Result<SubmissionTable> {
    let keys: IndexSet<&str> = submissions
        .iter()
        .flat_map(|submission| submission.keys().map(String::as_str))
        .collect();

    if let Some(column) = geopoint_column {
        if column == 0 || column > keys.len() {
            return Err(Odk2OdmError::ColumnOutOfBounds {
                column,
                width: keys.len(),
            });
        }
    }

    let mut headers: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
    if let Some(column) = geopoint_column {
        for (offset, header) in GEOPOINT_HEADERS.iter().enumerate() {
            headers.insert(column + offset, header.to_string());
        }
    }

    let rows = submissions
        .iter()
        .map(|submission| {
            let mut row: Vec<String> = keys
                .iter()
                .map(|key| submission.get(*key).map(render_value).unwrap_or_default())
                .collect();

            if let Some(column) = geopoint_column {
                let fields = match submission.get(keys[column - 1]).and_then(point_from_value) {
                    Some(point) => point.to_fields(),
                    None => {
                        debug!("Submission has no readable geopoint in '{}'", keys[column - 1]);
                        Default::default()
                    }
                };
                for (offset, field) in fields.into_iter().enumerate() {
                    row.insert(column + offset, field);
                }
            }

            row
        })
        .collect();

    Ok(SubmissionTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(value: Value) -> Submission {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn renders_cells() {
        assert_eq!(render_value(&json!(null)), "");
        assert_eq!(render_value(&json!("it's")), "it's");
        assert_eq!(render_value(&json!(3.5)), "3.5");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn headers_are_the_union_in_first_seen_order() {
        let submissions = vec![
            submission(json!({"__id": "uuid:1", "name": "a"})),
            submission(json!({"__id": "uuid:2", "photo": "p.jpg", "name": "b"})),
        ];
        let table = submission_table(&submissions, None).unwrap();

        assert_eq!(table.headers, ["__id", "name", "photo"]);
        assert_eq!(table.rows[0], ["uuid:1", "a", ""]);
        assert_eq!(table.rows[1], ["uuid:2", "b", "p.jpg"]);
    }

    #[test]
    fn expands_geopoint_after_its_column() {
        let submissions = vec![
            submission(json!({
                "__id": "uuid:1",
                "location": "{'type':'Point','coordinates':[10.5,20.25,300],'properties':{'accuracy':4.2}}",
                "photo": "a.jpg"
            })),
            submission(json!({
                "__id": "uuid:2",
                "location": {"type": "Point", "coordinates": [1, 2, 3], "properties": {"accuracy": 5}},
                "photo": "b.jpg"
            })),
            submission(json!({"__id": "uuid:3", "location": null, "photo": "c.jpg"})),
        ];
        let table = submission_table(&submissions, Some(2)).unwrap();

        assert_eq!(
            table.headers,
            ["__id", "location", "lat", "lon", "elevation", "accuracy", "photo"]
        );
        assert_eq!(&table.rows[0][2..6], ["20.25", "10.5", "300", "4.2"]);
        assert_eq!(table.rows[0][6], "a.jpg");
        assert_eq!(&table.rows[1][2..6], ["2", "1", "3", "5"]);
        let nested: Value = serde_json::from_str(&table.rows[1][1]).unwrap();
        assert_eq!(nested["coordinates"], json!([1, 2, 3]));
        assert_eq!(&table.rows[2][1..6], ["", "", "", "", ""]);
    }

    #[test]
    fn geopoint_column_must_exist() {
        let submissions = vec![submission(json!({"a": 1, "b": 2}))];
        assert!(matches!(
            submission_table(&submissions, Some(3)),
            Err(Odk2OdmError::ColumnOutOfBounds { column: 3, width: 2 })
        ));
        assert!(submission_table(&submissions, Some(0)).is_err());
        assert_eq!(
            submission_table(&submissions, Some(2)).unwrap().headers.len(),
            6
        );
    }
}
