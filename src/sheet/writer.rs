use crate::core::IpoError;
use crate::pipeline::OutputRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::Workbook;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Language of the output header row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum HeaderStyle {
    /// Snake-case field names, e.g. `initial_hk_allocation_ratio`.
    #[default]
    English,
    /// The labels of the published Chinese dataset, e.g. `初始公配比例`.
    Chinese,
}

impl HeaderStyle {
    pub fn columns(self) -> &'static [&'static str; 19] {
        match self {
            HeaderStyle::English => &OutputRecord::COLUMNS,
            HeaderStyle::Chinese => &CHINESE_COLUMNS,
        }
    }
}

const CHINESE_COLUMNS: [&str; 19] = [
    "公司名称",
    "股份代号",
    "上市日期",
    "发行价区间",
    "最终定价",
    "初始公配比例",
    "初始国际配售比例",
    "甲组中签率",
    "乙组中签率",
    "公开申购倍数",
    "国际申购倍数",
    "是否触发回拨",
    "是否触发特别回拨",
    "是否使用绿鞋机制",
    "首日开盘价",
    "首日最高价",
    "首日收盘价",
    "招股书URL",
    "配售公告URL",
];

/// Writes the consolidated table in one go.
///
/// A `.xlsx` target gets a single-sheet workbook with numeric amount and
/// price cells; any other target gets a CSV file.
#[derive(Debug, Clone)]
pub struct SheetWriter {
    path: PathBuf,
    style: HeaderStyle,
}

impl SheetWriter {
    pub fn new(path: impl Into<PathBuf>, style: HeaderStyle) -> Self {
        Self {
            path: path.into(),
            style,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the header and every record.
    ///
    /// Rows go to a sibling `.partial` file that is renamed over the target
    /// once complete, so a failed write leaves no output behind.
    pub fn write(&self, records: &[OutputRecord]) -> Result<(), IpoError> {
        let mut partial = self.path.clone().into_os_string();
        partial.push(".partial");
        let partial = PathBuf::from(partial);

        let result = self.write_to(&partial, records);
        if result.is_err() {
            let _ = std::fs::remove_file(&partial);
            return result;
        }
        std::fs::rename(&partial, &self.path)?;
        Ok(())
    }

    fn write_to(&self, path: &Path, records: &[OutputRecord]) -> Result<(), IpoError> {
        let xlsx = self
            .path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
        if xlsx {
            self.write_xlsx(path, records)
        } else {
            self.write_csv(path, records)
        }
    }

    fn write_xlsx(&self, path: &Path, records: &[OutputRecord]) -> Result<(), IpoError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, label) in self.style.columns().iter().enumerate() {
            sheet.write_string(0, col as u16, *label)?;
        }
        for (i, record) in records.iter().enumerate() {
            let row = i as u32 + 1;
            for (col, text) in record.to_cells().into_iter().enumerate() {
                match numeric_cell(record, col) {
                    Some(value) => {
                        sheet.write_number(row, col as u16, value)?;
                    }
                    None if text.is_empty() => {}
                    None => {
                        sheet.write_string(row, col as u16, text)?;
                    }
                }
            }
        }
        workbook.save(path)?;
        Ok(())
    }

    fn write_csv(&self, path: &Path, records: &[OutputRecord]) -> Result<(), IpoError> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(self.style.columns())?;
        for record in records {
            wtr.write_record(record.to_cells())?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Amounts that parse as numbers and the three prices; text otherwise.
fn numeric_cell(record: &OutputRecord, column: usize) -> Option<f64> {
    match column {
        5 => record.initial_hk_allocation_ratio.amount()?.to_f64(),
        6 => record.initial_intl_allocation.amount()?.to_f64(),
        14 => record.open_price,
        15 => record.high_price,
        16 => record.close_price,
        _ => None,
    }
}
