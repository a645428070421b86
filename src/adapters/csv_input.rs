use crate::domain::model::{CellValue, Record, RecordSet};
use crate::utils::error::{EtlError, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parses an uploaded claims export: comma separated, UTF-8, header row first.
pub fn read_record_set(bytes: &[u8]) -> Result<RecordSet> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .flexible(false)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_failure)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(EtlError::unexpected_input("the file has no header row"));
    }

    let mut records = RecordSet::new(headers);
    for result in reader.records() {
        let row = result.map_err(csv_failure)?;
        records.push(Record::new(row.iter().map(CellValue::from_raw).collect()))?;
    }
    records.infer_column_types();

    tracing::debug!(
        "Parsed {} rows with {} columns",
        records.len(),
        records.columns().len()
    );
    Ok(records)
}

fn csv_failure(err: csv::Error) -> EtlError {
    EtlError::unexpected_input(format!("could not read CSV: {}", err))
}
