//! Tabular I/O: report workbooks or CSV exports in, the consolidated dataset out.

mod reader;
mod writer;

pub use reader::{SheetReader, read_all};
pub use writer::{HeaderStyle, SheetWriter};

use std::path::Path;

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Whether `path` names a spreadsheet workbook rather than a CSV export.
pub(crate) fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}
