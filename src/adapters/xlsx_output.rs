use crate::domain::model::{CellValue, OutputRecordSet};
use crate::domain::schema::SHEET_NAME;
use crate::utils::error::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};

/// Number format applied to date cells unless configured otherwise.
pub const DEFAULT_DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub datetime_format: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

/// Encodes the report as a single-sheet `.xlsx`: header row, then one row per claim, no index column.
pub fn write_workbook(output: &OutputRecordSet, options: &ExportOptions) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let date_format = Format::new().set_num_format(&options.datetime_format);

    for (col, header) in output.headers().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, row) in output.rows().iter().enumerate() {
        let excel_row = (idx + 1) as u32;
        worksheet.write_number(excel_row, 0, row.number as f64)?;
        for (offset, value) in row.values.iter().enumerate() {
            write_cell(worksheet, excel_row, (offset + 1) as u16, value, &date_format)?;
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofit();

    let buffer = workbook.save_to_buffer()?;
    tracing::debug!(
        "Encoded workbook with {} rows ({} bytes)",
        output.len(),
        buffer.len()
    );
    Ok(buffer)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    date_format: &Format,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Text(s) => worksheet.write_string(row, col, s).map(|_| ()),
        CellValue::Number(n) => worksheet.write_number(row, col, *n).map(|_| ()),
        CellValue::Date(dt) => worksheet
            .write_datetime_with_format(row, col, dt, date_format)
            .map(|_| ()),
        // absent values stay blank, like NaT in a spreadsheet export
        CellValue::Missing => Ok(()),
    }
}
