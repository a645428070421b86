use crate::core::dates;
use crate::core::diagnostics::Diagnostics;
use crate::domain::model::{DiagnosticCategory, OutputRecordSet, OutputRow, RecordSet};
use crate::domain::schema::{ClaimField, DATE_COLUMNS};
use crate::utils::error::{EtlError, Result};

/// Reshapes the filtered claims into the benefit claim report.
///
/// Runs emptiness check, date normalization, required-column validation and
/// projection in that order. The first two failures stop the run with no rows.
pub fn transform(filtered: RecordSet, diagnostics: &mut Diagnostics) -> Result<OutputRecordSet> {
    if filtered.is_empty() {
        return Err(EtlError::EmptyResultError);
    }

    let mut records = filtered;
    normalize_dates(&mut records, diagnostics);

    let indices = resolve_columns(&records)?;
    let output = project(records, &indices);

    tracing::debug!("Projected {} rows into the report layout", output.len());
    Ok(output)
}

/// Coerces every date column present; warns once per column that ends up with missing dates.
pub fn normalize_dates(records: &mut RecordSet, diagnostics: &mut Diagnostics) {
    for column in DATE_COLUMNS {
        match dates::normalize_column(records, column) {
            None => tracing::debug!("Date column '{}' not present, skipping", column),
            Some(0) => {}
            Some(missing) => diagnostics.warning(
                DiagnosticCategory::DateCoercion,
                format!(
                    "Invalid date values detected in column '{}'. {} value(s) coerced to missing.",
                    column, missing
                ),
            ),
        }
    }
}

/// Column index of each report field, or a schema error naming every absent one.
fn resolve_columns(records: &RecordSet) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(ClaimField::ALL.len());
    let mut missing = Vec::new();

    for field in ClaimField::ALL {
        match records.column_index(field.source()) {
            Some(idx) => indices.push(idx),
            None => missing.push(field.source()),
        }
    }

    if !missing.is_empty() {
        return Err(EtlError::schema(missing));
    }
    Ok(indices)
}

fn project(records: RecordSet, indices: &[usize]) -> OutputRecordSet {
    let rows = records
        .into_records()
        .into_iter()
        .enumerate()
        .map(|(i, mut record)| OutputRow {
            number: i + 1,
            // indices are distinct, so each source cell is moved exactly once
            values: indices
                .iter()
                .map(|&idx| std::mem::take(&mut record.values[idx]))
                .collect(),
        })
        .collect();
    OutputRecordSet::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CellValue, DiagnosticLevel};
    use crate::domain::schema::STATUS_COLUMN;

    fn full_columns() -> Vec<&'static str> {
        let mut columns = vec![STATUS_COLUMN];
        columns.extend(ClaimField::ALL.iter().map(|f| f.source()));
        columns
    }

    fn row(claim_no: &str) -> Vec<String> {
        full_columns()
            .iter()
            .map(|c| match *c {
                "Status_Claim" => "R".to_string(),
                "ClaimNo" => claim_no.to_string(),
                "TreatmentStart" | "TreatmentFinish" | "PaymentDate" => "2024-02-01".to_string(),
                "Billed" => "150000".to_string(),
                other => format!("{}-value", other),
            })
            .collect()
    }

    #[test]
    fn test_empty_input_fails() {
        let set = RecordSet::new(full_columns().iter().map(|c| c.to_string()).collect());
        let mut diagnostics = Diagnostics::new();
        let err = transform(set, &mut diagnostics).unwrap_err();
        assert!(matches!(err, EtlError::EmptyResultError));
    }

    #[test]
    fn test_numbers_rows_from_one() {
        let set = RecordSet::from_rows(&full_columns(), vec![row("A1"), row("A2"), row("A3")]).unwrap();
        let mut diagnostics = Diagnostics::new();
        let output = transform(set, &mut diagnostics).unwrap();

        let numbers: Vec<usize> = output.rows().iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(output.rows()[1].get(ClaimField::ClaimNo), &CellValue::Text("A2".to_string()));
        assert_eq!(output.rows()[0].get(ClaimField::Billed), &CellValue::Number(150000.0));
        assert_eq!(
            output.rows()[0].get(ClaimField::Diagnosis),
            &CellValue::Text("PrimaryDiagnosis-value".to_string())
        );
        assert!(diagnostics.entries().is_empty());
    }

    #[test]
    fn test_lists_every_missing_column() {
        let columns: Vec<&str> = full_columns()
            .into_iter()
            .filter(|c| *c != "EmpID" && *c != "Unpaid")
            .collect();
        let values: Vec<String> = columns.iter().map(|c| format!("{}-v", c)).collect();
        let set = RecordSet::from_rows(&columns, vec![values]).unwrap();

        let mut diagnostics = Diagnostics::new();
        match transform(set, &mut diagnostics).unwrap_err() {
            EtlError::SchemaError { missing } => assert_eq!(missing, vec!["EmpID", "Unpaid"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_date_warning_per_column() {
        let mut columns = full_columns();
        columns.push("Date");
        let mut values = row("A1");
        let start = columns.iter().position(|c| *c == "TreatmentStart").unwrap();
        values[start] = "someday".to_string();
        values.push("also bad".to_string());

        let set = RecordSet::from_rows(&columns, vec![values]).unwrap();
        let mut diagnostics = Diagnostics::new();
        let output = transform(set, &mut diagnostics).unwrap();

        let warned: Vec<&str> = diagnostics
            .entries()
            .iter()
            .filter(|d| d.level == DiagnosticLevel::Warning)
            .map(|d| d.message.as_str())
            .collect();
        assert_eq!(warned.len(), 2);
        assert!(warned[0].contains("'TreatmentStart'"));
        assert!(warned[1].contains("'Date'"));
        assert_eq!(output.rows()[0].get(ClaimField::TreatmentStart), &CellValue::Missing);
    }

    #[test]
    fn test_date_warning_survives_schema_failure() {
        let set = RecordSet::from_rows(
            &[STATUS_COLUMN, "PaymentDate"],
            vec![vec!["R", "garbage"]],
        )
        .unwrap();
        let mut diagnostics = Diagnostics::new();
        assert!(transform(set, &mut diagnostics).is_err());
        assert_eq!(diagnostics.entries().len(), 1);
        assert_eq!(diagnostics.entries()[0].category, DiagnosticCategory::DateCoercion);
    }
}
