use crate::error::{Odk2OdmError, Result};

/// Highest column a reference may name: `XFD`, the last spreadsheet column.
pub const MAX_COLUMN: usize = 16384;

fn within_limit(token: &str, index: usize) -> Result<usize> {
    if index > MAX_COLUMN {
        return Err(Odk2OdmError::invalid_range(
            token,
            format!("column {index} is past the last column {MAX_COLUMN} (XFD)"),
        ));
    }
    Ok(index)
}

/// Spreadsheet column name for a 1-based index (1 -> "A", 27 -> "AA").
#[must_use]
pub fn column_name(index: usize) -> String {
    let mut col_name = String::new();
    let mut n = index;

    while n > 0 {
        let remainder = (n - 1) % 26;
        col_name.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }

    col_name
}

/// Column reference for log messages, e.g. `F (6)`.
#[must_use]
pub fn column_label(index: usize) -> String {
    format!("{} ({})", column_name(index), index)
}

/// Resolves a single column reference to a 1-based index.
///
/// All-digit tokens are decimal column numbers, anything else must be a run of
/// ASCII letters read as bijective base-26 (`A` = 1, `Z` = 26, `AA` = 27),
/// case-insensitively. References past [`MAX_COLUMN`] are rejected.
pub fn column_index(token: &str) -> Result<usize> {
    if token.is_empty() {
        return Err(Odk2OdmError::invalid_range(token, "empty column reference"));
    }

    if token.chars().all(|c| c.is_ascii_digit()) {
        let index = token
            .parse::<usize>()
            .map_err(|_| Odk2OdmError::invalid_range(token, "column number is too large"))?;
        if index == 0 {
            return Err(Odk2OdmError::invalid_range(
                token,
                "column numbers start at 1",
            ));
        }
        return within_limit(token, index);
    }

    let mut result: usize = 0;

    for c in token.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Odk2OdmError::invalid_range(
                token,
                format!("'{c}' is neither a digit nor a column letter"),
            ));
        }

        let val = (c.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        result = result
            .checked_mul(26)
            .and_then(|r| r.checked_add(val))
            .ok_or_else(|| Odk2OdmError::invalid_range(token, "column name is too long"))?;
    }

    within_limit(token, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_use_bijective_base_26() {
        assert_eq!(column_index("A").unwrap(), 1);
        assert_eq!(column_index("B").unwrap(), 2);
        assert_eq!(column_index("Z").unwrap(), 26);
        assert_eq!(column_index("AA").unwrap(), 27);
        assert_eq!(column_index("AZ").unwrap(), 52);
        assert_eq!(column_index("ZZ").unwrap(), 702);
        assert_eq!(column_index("AAA").unwrap(), 703);
    }

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(column_index("aj").unwrap(), column_index("AJ").unwrap());
        assert_eq!(column_index("aJ").unwrap(), 36);
    }

    #[test]
    fn digits_are_read_as_numbers() {
        assert_eq!(column_index("1").unwrap(), 1);
        assert_eq!(column_index("15").unwrap(), 15);
        assert_eq!(column_index("007").unwrap(), 7);
    }

    #[test]
    fn rejects_malformed_references() {
        for token in ["", "0", "A1", "1A", "-", "é", "A B"] {
            assert!(
                matches!(column_index(token), Err(Odk2OdmError::InvalidRange { .. })),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overflowing_references() {
        assert!(column_index(&"Z".repeat(40)).is_err());
        assert!(column_index(&"9".repeat(40)).is_err());
    }

    #[test]
    fn rejects_columns_past_xfd() {
        assert_eq!(column_index("XFD").unwrap(), MAX_COLUMN);
        assert_eq!(column_index("16384").unwrap(), MAX_COLUMN);
        assert!(matches!(column_index("XFE"), Err(Odk2OdmError::InvalidRange { .. })));
        assert!(matches!(column_index("16385"), Err(Odk2OdmError::InvalidRange { .. })));
        assert!(column_index("ZZZZZZZ").is_err());
    }

    #[test]
    fn names_invert_indices() {
        for index in [1, 2, 26, 27, 52, 702, 703, 16384] {
            assert_eq!(column_index(&column_name(index)).unwrap(), index);
        }
        assert_eq!(column_name(0), "");
        assert_eq!(column_label(6), "F (6)");
    }
}
