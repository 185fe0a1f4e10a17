//! CSV spreadsheet export

use super::{ExportRow, HEADERS};

/// Lets spreadsheet software detect UTF-8
const BOM: &str = "\u{feff}";

/// Quote a cell when it holds a separator, a quote or a line break.
fn cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn line<'a>(cells: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = cells.into_iter().map(cell).collect::<Vec<_>>().join(",");
    out.push_str("\r\n");
    out
}

/// Header line followed by one line per row
pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut csv = String::from(BOM);
    csv.push_str(&line(HEADERS));
    for row in rows {
        csv.push_str(&line(row.cells.iter().map(String::as_str)));
    }
    csv
}
