// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Optional spreadsheet backends.
//!
//! The spreadsheet is an enhancement over the CSV report. A build without the
//! `xlsx` feature uses [`UnavailableSpreadsheet`], which always fails and lets
//! the sink degrade to CSV only.

use std::path::Path;

use super::error::SinkError;
use super::table::ReportTable;

/// Writes a results sheet and an errors sheet to one workbook.
pub trait SpreadsheetBackend: Send + Sync {
    fn name(&self) -> &str;

    fn write(
        &self,
        successes: &ReportTable,
        errors: &ReportTable,
        path: &Path,
    ) -> Result<(), SinkError>;
}

/// Backend for builds without spreadsheet support.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSpreadsheet;

impl SpreadsheetBackend for UnavailableSpreadsheet {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn write(&self, _: &ReportTable, _: &ReportTable, _: &Path) -> Result<(), SinkError> {
        Err(SinkError::BackendUnavailable(
            "built without the `xlsx` feature".to_string(),
        ))
    }
}

/// The best backend this build supports.
pub fn default_backend() -> Box<dyn SpreadsheetBackend> {
    #[cfg(feature = "xlsx")]
    {
        Box::new(xlsx::XlsxSpreadsheet)
    }
    #[cfg(not(feature = "xlsx"))]
    {
        Box::new(UnavailableSpreadsheet)
    }
}

#[cfg(feature = "xlsx")]
pub use xlsx::XlsxSpreadsheet;

#[cfg(feature = "xlsx")]
mod xlsx {
    use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
    use std::path::Path;

    use super::super::csv_writer::ensure_parent;
    use super::super::error::SinkError;
    use super::super::table::ReportTable;
    use super::SpreadsheetBackend;

    const RESULTS_SHEET: &str = "Results";
    const ERRORS_SHEET: &str = "Errors";

    /// `.xlsx` workbook via `rust_xlsxwriter`.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct XlsxSpreadsheet;

    impl SpreadsheetBackend for XlsxSpreadsheet {
        fn name(&self) -> &str {
            "xlsx"
        }

        fn write(
            &self,
            successes: &ReportTable,
            errors: &ReportTable,
            path: &Path,
        ) -> Result<(), SinkError> {
            ensure_parent(path)?;
            build_workbook(successes, errors, path).map_err(|e| SinkError::Spreadsheet {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }

    fn build_workbook(
        successes: &ReportTable,
        errors: &ReportTable,
        path: &Path,
    ) -> Result<(), XlsxError> {
        let header = Format::new().set_bold();
        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name(RESULTS_SHEET)?;
        fill_sheet(sheet, successes, &header)?;

        if !errors.is_empty() {
            let sheet = workbook.add_worksheet();
            sheet.set_name(ERRORS_SHEET)?;
            fill_sheet(sheet, errors, &header)?;
        }

        workbook.save(path)
    }

    fn fill_sheet(
        sheet: &mut Worksheet,
        table: &ReportTable,
        header: &Format,
    ) -> Result<(), XlsxError> {
        for (col, name) in table.columns.iter().enumerate() {
            sheet.write_string_with_format(0, column_index(col)?, name, header)?;
        }
        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_num = u32::try_from(row_idx + 1)
                .map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col, cell) in row.iter().enumerate() {
                sheet.write_string(row_num, column_index(col)?, cell)?;
            }
        }
        sheet.set_freeze_panes(1, 0)?;
        sheet.autofit();
        Ok(())
    }

    fn column_index(col: usize) -> Result<u16, XlsxError> {
        u16::try_from(col).map_err(|_| XlsxError::RowColumnLimitError)
    }
}
