use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};

use crate::error::Result;
use crate::table::SurveyRow;

/// Reads the first worksheet of a workbook.
pub fn read_spreadsheet(path: &Path) -> Result<Vec<SurveyRow>> {
    let mut workbook = open_workbook_auto(path)?;

    match workbook.worksheet_range_at(0) {
        Some(range) => Ok(rows_from_range(&range?)),
        None => Ok(Vec::new()),
    }
}

/// Data rows of a worksheet range.
///
/// The header is the first row of the used range, so blank rows above the
/// table are ignored. Cells keep their sheet column, so column `A` is always
/// index 1 even when the used range starts further right.
fn rows_from_range(range: &Range<Data>) -> Vec<SurveyRow> {
    let (Some((start_row, start_col)), Some((end_row, end_col))) = (range.start(), range.end())
    else {
        return Vec::new();
    };

    let height = (end_row - start_row) as usize + 1;
    let mut data = vec![vec![String::new(); end_col as usize + 1]; height];

    for (row_idx, col_idx, cell) in range.used_cells() {
        data[row_idx][start_col as usize + col_idx] = cell_text(cell);
    }

    data.into_iter().skip(1).map(SurveyRow::new).collect()
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if *f == (*f as i64) as f64 && f.abs() < 1e10 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("Error: {:?}", e),
    }
}
