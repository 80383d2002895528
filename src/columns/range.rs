use std::fmt;
use std::str::FromStr;

use crate::columns::names::column_index;
use crate::error::{Odk2OdmError, Result};

/// Ordered 1-based column indices produced from a range expression.
///
/// Order follows the expression and duplicates are kept, so a caller can list
/// several photo blocks of equal width (`15-26,28-39,41-52`) and get them back
/// exactly as written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnRange {
    columns: Vec<usize>,
}

impl ColumnRange {
    pub fn as_slice(&self) -> &[usize] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.columns.iter()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.columns
    }
}

impl From<Vec<usize>> for ColumnRange {
    fn from(columns: Vec<usize>) -> Self {
        Self { columns }
    }
}

impl<'a> IntoIterator for &'a ColumnRange {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

impl FromStr for ColumnRange {
    type Err = Odk2OdmError;

    fn from_str(s: &str) -> Result<Self> {
        resolve(s)
    }
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.columns.iter().map(ToString::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

/// Resolves an expression such as `"3-5, 13, 36-38"` or `"c-e, m, aj-al"`.
///
/// Whitespace is ignored everywhere. Each comma-separated token is a single
/// column reference or an inclusive `start-end` span.
pub fn resolve(expression: &str) -> Result<ColumnRange> {
    let compact: String = expression.chars().filter(|c| !c.is_whitespace()).collect();
    let mut columns = Vec::new();

    for token in compact.split(',') {
        if token.is_empty() {
            return Err(Odk2OdmError::invalid_range(expression, "empty column token"));
        }

        let bounds: Vec<&str> = token.split('-').collect();
        let resolve_bound = |bound: &str| {
            column_index(bound).map_err(|e| match e {
                Odk2OdmError::InvalidRange { reason, .. } => Odk2OdmError::invalid_range(
                    expression,
                    format!("token '{token}': {reason}"),
                ),
                other => other,
            })
        };

        match *bounds.as_slice() {
            [single] => columns.push(resolve_bound(single)?),
            [start, end] => {
                let lo = resolve_bound(start)?;
                let hi = resolve_bound(end)?;
                if lo > hi {
                    return Err(Odk2OdmError::invalid_range(
                        expression,
                        format!("token '{token}' starts at column {lo} after its end {hi}"),
                    ));
                }
                columns.extend(lo..=hi);
            }
            _ => {
                return Err(Odk2OdmError::invalid_range(
                    expression,
                    format!("token '{token}' has more than one '-'"),
                ));
            }
        }
    }

    Ok(ColumnRange { columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(expression: &str) -> Vec<usize> {
        resolve(expression).unwrap().into_vec()
    }

    fn assert_invalid(expression: &str) {
        match resolve(expression) {
            Err(Odk2OdmError::InvalidRange { expression: e, .. }) => assert_eq!(e, expression),
            other => panic!("expected InvalidRange for {expression:?}, got {other:?}"),
        }
    }

    #[test]
    fn numeric_and_letter_ranges_agree() {
        assert_eq!(cols("3-5,9"), vec![3, 4, 5, 9]);
        assert_eq!(cols("c-e,i"), vec![3, 4, 5, 9]);
        assert_eq!(cols("C-E,I"), vec![3, 4, 5, 9]);
    }

    #[test]
    fn single_letters() {
        assert_eq!(cols("B"), vec![2]);
        assert_eq!(cols("Z"), vec![26]);
        assert_eq!(cols("AA"), vec![27]);
        assert_eq!(cols("AZ"), vec![52]);
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(cols(" 3 - 5 ,\t13, 36-38 "), vec![3, 4, 5, 13, 36, 37, 38]);
        assert_eq!(cols("c-e, m, aj-al"), vec![3, 4, 5, 13, 36, 37, 38]);
    }

    #[test]
    fn mixed_notation_within_a_span() {
        assert_eq!(cols("3-e"), vec![3, 4, 5]);
    }

    #[test]
    fn keeps_order_and_duplicates() {
        assert_eq!(cols("9,3-4,3"), vec![9, 3, 4, 3]);
        assert_eq!(cols("1-2,2-3"), vec![1, 2, 2, 3]);
    }

    #[test]
    fn equal_width_photo_blocks() {
        let range = resolve("15-26,28-39,41-52").unwrap();
        assert_eq!(range.len(), 36);
        assert_eq!(range, resolve("O-Z,AB-AM,AO-AZ").unwrap());
    }

    #[test]
    fn degenerate_span_is_one_column() {
        assert_eq!(cols("4-4"), vec![4]);
    }

    #[test]
    fn inverted_span_fails() {
        assert_invalid("5-3");
        assert_invalid("e-c");
    }

    #[test]
    fn empty_tokens_fail() {
        assert_invalid("");
        assert_invalid("   ");
        assert_invalid("1,,2");
        assert_invalid("1,2,");
        assert_invalid("-3");
        assert_invalid("3-");
    }

    #[test]
    fn malformed_tokens_fail() {
        assert_invalid("1-2-3");
        assert_invalid("A1");
        assert_invalid("3..5");
        assert_invalid("0-2");
    }

    #[test]
    fn oversized_spans_fail_instead_of_allocating() {
        assert_invalid("1-18446744073709551615");
        assert_invalid("A-ZZZZZZZ");
        assert_invalid("1-16385");
        assert_eq!(resolve("A-XFD").unwrap().len(), 16384);
    }

    #[test]
    fn error_names_the_bad_token() {
        let message = resolve("1-3,x?").unwrap_err().to_string();
        assert!(message.contains("1-3,x?"), "{message}");
        assert!(message.contains("x?"), "{message}");
    }

    #[test]
    fn parses_and_displays() {
        let range: ColumnRange = "b-d".parse().unwrap();
        assert_eq!(range.to_string(), "2,3,4");
        assert_eq!(range.iter().copied().sum::<usize>(), 9);
    }
}
