use super::is_workbook;
use crate::core::IpoError;
use crate::listing::{Header, InputRow};
use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

/// Rows still to be yielded, by source format.
enum Rows {
    Csv(csv::StringRecordsIntoIter<File>),
    /// 1-based sheet row number and the row's cells.
    Workbook(std::vec::IntoIter<(u64, Vec<Data>)>),
}

/// Reads one report and yields its data rows in file order.
///
/// Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read from their
/// first sheet; any other file is read as a UTF-8 CSV export.
pub struct SheetReader {
    rows: Rows,
    header: Arc<Header>,
    source: Arc<str>,
}

impl SheetReader {
    /// Opens `path`, skipping `header_row` leading title rows before the
    /// header row.
    ///
    /// # Errors
    ///
    /// I/O, CSV and workbook errors, or `MissingColumn` when the file ends
    /// before its header.
    pub fn open(path: impl AsRef<Path>, header_row: usize) -> Result<Self, IpoError> {
        let path = path.as_ref();
        let source: Arc<str> = path.display().to_string().into();
        let missing_header = || IpoError::MissingColumn {
            column: "header".into(),
            source_label: source.to_string(),
            line: header_row as u64 + 1,
        };

        if is_workbook(path) {
            let mut rows = first_sheet_rows(path)?.into_iter();
            let (_, header_cells) = rows.nth(header_row).ok_or_else(missing_header)?;
            let labels = header_cells.iter().map(cell_text);
            return Ok(Self {
                rows: Rows::Workbook(rows),
                header: Arc::new(Header::new(labels)),
                source,
            });
        }

        let mut records = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?
            .into_records();

        let mut header_record: Option<StringRecord> = None;
        for _ in 0..=header_row {
            header_record = records.next().transpose()?;
        }
        let header_record = header_record.ok_or_else(missing_header)?;

        Ok(Self {
            rows: Rows::Csv(records),
            header: Arc::new(Header::new(header_record.iter())),
            source,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    fn row(&self, line: u64, cells: Vec<String>) -> InputRow {
        InputRow::new(
            Arc::clone(&self.header),
            Arc::clone(&self.source),
            line,
            cells,
        )
    }
}

impl Iterator for SheetReader {
    type Item = Result<InputRow, IpoError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.rows {
            Rows::Csv(records) => {
                let record = match records.next()? {
                    Ok(record) => record,
                    Err(e) => return Some(Err(e.into())),
                };
                let line = record.position().map_or(0, |p| p.line());
                let cells = record.iter().map(str::to_string).collect();
                Some(Ok(self.row(line, cells)))
            }
            Rows::Workbook(rows) => {
                let (line, data) = rows.next()?;
                let cells = data.iter().map(cell_text).collect();
                let dates = data.iter().map(cell_date).collect();
                Some(Ok(self.row(line, cells).with_dates(dates)))
            }
        }
    }
}

/// Every row of the workbook's first sheet, numbered as the sheet shows them.
fn first_sheet_rows(path: &Path) -> Result<Vec<(u64, Vec<Data>)>, IpoError> {
    let mut workbook = open_workbook_auto(path)?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(calamine::Error::Msg("workbook has no sheets"))?;
    let range = workbook.worksheet_range(&name)?;

    let first = range.start().map_or(0, |(row, _)| u64::from(row));
    Ok(range
        .rows()
        .enumerate()
        .map(|(i, cells)| (first + i as u64 + 1, cells.to_vec()))
        .collect())
}

/// Only cells the workbook typed as dates; plain numbers are never dates.
fn cell_date(cell: &Data) -> Option<NaiveDate> {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => cell.as_date(),
        _ => None,
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        _ => match cell_date(cell) {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => cell.to_string(),
        },
    }
}

/// Reads every file in order and concatenates their rows.
///
/// Blank lines are skipped by the CSV reader; fully empty rows (all cells
/// blank, as left behind by spreadsheet exports) are dropped here.
pub fn read_all<P: AsRef<Path>>(
    paths: &[P],
    header_row: usize,
) -> Result<Vec<InputRow>, IpoError> {
    let mut rows = Vec::new();
    for path in paths {
        for row in SheetReader::open(path, header_row)? {
            let row = row?;
            if row.cells().iter().any(|c| !c.trim().is_empty()) {
                rows.push(row);
            }
        }
    }
    Ok(rows)
}
