use serde_json::Value;
use tracing::debug;

use crate::error::{Odk2OdmError, Result};

/// Location recorded by a geopoint question.
///
/// A point is either fully known or absent; the parsers below never return a
/// partially filled value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
    pub accuracy: f64,
}

impl GeoPoint {
    /// Field values in `lat, lon, elevation, accuracy` order.
    pub fn to_fields(&self) -> [String; 4] {
        [
            self.latitude.to_string(),
            self.longitude.to_string(),
            self.elevation.to_string(),
            self.accuracy.to_string(),
        ]
    }
}

/// Parses the point string ODK Central returns for geopoint fields.
///
/// The string is JSON except that it is single-quoted, so every `'` is swapped
/// for `"` before parsing. A string field that contains an apostrophe therefore
/// breaks the parse and yields `None`.
pub fn parse_point(raw: &str) -> Option<GeoPoint> {
    match repair_and_parse(raw) {
        Ok(point) => Some(point),
        Err(e) => {
            debug!("No geopoint in {:?}: {}", raw, e);
            None
        }
    }
}

/// Reads a geopoint that may already be a JSON object rather than a string.
pub fn point_from_value(value: &Value) -> Option<GeoPoint> {
    match value {
        Value::String(raw) => parse_point(raw),
        Value::Object(_) => match read_point(value) {
            Ok(point) => Some(point),
            Err(e) => {
                debug!("No geopoint in {}: {}", value, e);
                None
            }
        },
        _ => None,
    }
}

fn repair_and_parse(raw: &str) -> Result<GeoPoint> {
    let double_quoted = raw.replace('\'', "\"");
    let value: Value = serde_json::from_str(&double_quoted)?;
    read_point(&value)
}

fn read_point(value: &Value) -> Result<GeoPoint> {
    let coordinate = |i: usize| {
        value
            .get("coordinates")
            .and_then(|c| c.get(i))
            .and_then(Value::as_f64)
            .ok_or_else(|| Odk2OdmError::PointParse(format!("missing coordinates[{i}]")))
    };

    let accuracy = value
        .get("properties")
        .and_then(|p| p.get("accuracy"))
        .and_then(Value::as_f64)
        .ok_or_else(|| Odk2OdmError::PointParse("missing properties.accuracy".to_string()))?;

    Ok(GeoPoint {
        latitude: coordinate(1)?,
        longitude: coordinate(0)?,
        elevation: coordinate(2)?,
        accuracy,
    })
}
