use crate::domain::schema::{self, ClaimField};
use crate::utils::error::{EtlError, Result};
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cell texts read as missing, the same set the claims export tooling treats as null.
const MISSING_MARKERS: [&str; 14] = [
    "", "#N/A", "#NA", "N/A", "n/a", "NA", "<NA>", "NULL", "null", "NaN", "nan", "-NaN", "None", "#N/A N/A",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Date(NaiveDateTime),
    #[default]
    Missing,
}

impl CellValue {
    /// Reads a raw CSV field as text, or `Missing` for the null markers.
    ///
    /// Numbers are decided per column afterwards, see [`RecordSet::infer_column_types`].
    pub fn from_raw(raw: &str) -> Self {
        if MISSING_MARKERS.contains(&raw) {
            CellValue::Missing
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Significant digits an `f64` holds exactly.
const MAX_EXACT_DIGITS: usize = 15;

// Plain decimal notation only: optional minus, digits, optional fraction.
// Exponents, a leading '+', leading zeros ("007") and values past f64 precision stay text.
fn parse_plain_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let unsigned = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }
    if unsigned.ends_with('.') {
        return None;
    }
    if int_part.len() > 1 && int_part.starts_with('0') {
        return None;
    }
    if int_part.len() + frac_part.len() > MAX_EXACT_DIGITS {
        return None;
    }

    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(dt) if dt.time() == NaiveTime::MIN => write!(f, "{}", dt.format("%Y-%m-%d")),
            CellValue::Date(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Missing => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub values: Vec<CellValue>,
}

impl Record {
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }
}

/// Claims table as uploaded: header names plus rows aligned to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            records: Vec::new(),
        }
    }

    /// Builds a record set from raw string rows; handy for callers that already split the file.
    pub fn from_rows<I, R, S>(columns: &[&str], rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            let values = row.into_iter().map(|v| CellValue::from_raw(v.as_ref())).collect();
            set.push(Record::new(values))?;
        }
        set.infer_column_types();
        Ok(set)
    }

    /// Turns a column into numbers when every non-missing cell is a plain decimal.
    /// One cell that is not keeps the whole column as text, untouched.
    pub fn infer_column_types(&mut self) {
        for idx in 0..self.columns.len() {
            let parsed: Option<Vec<Option<f64>>> = self
                .records
                .iter()
                .map(|r| match &r.values[idx] {
                    CellValue::Text(s) => parse_plain_number(s).map(Some),
                    _ => Some(None),
                })
                .collect();

            let Some(numbers) = parsed else { continue };
            for (record, number) in self.records.iter_mut().zip(numbers) {
                if let Some(n) = number {
                    record.values[idx] = CellValue::Number(n);
                }
            }
        }
    }

    pub fn push(&mut self, record: Record) -> Result<()> {
        if record.values.len() != self.columns.len() {
            return Err(EtlError::unexpected_input(format!(
                "row {} has {} fields but the header has {}",
                self.records.len() + 1,
                record.values.len(),
                self.columns.len()
            )));
        }
        self.records.push(record);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of the first column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [Record] {
        &mut self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn value(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.records.get(row).map(|r| &r.values[idx])
    }

    /// Keeps the records matching `keep`, in their original order.
    pub fn retain<F>(self, mut keep: F) -> Self
    where
        F: FnMut(&Record) -> bool,
    {
        let records = self.records.into_iter().filter(|r| keep(r)).collect();
        Self {
            columns: self.columns,
            records,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub number: usize,
    pub values: Vec<CellValue>,
}

impl OutputRow {
    pub fn get(&self, field: ClaimField) -> &CellValue {
        &self.values[field as usize]
    }
}

/// Rows of the benefit claim report, numbered from 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputRecordSet {
    rows: Vec<OutputRow>,
}

impl OutputRecordSet {
    pub fn new(rows: Vec<OutputRow>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> Vec<&'static str> {
        schema::output_headers()
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn head(&self, n: usize) -> &[OutputRow] {
        &self.rows[..n.min(self.rows.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticCategory {
    StatusDistribution,
    FilterResult,
    DateCoercion,
    Schema,
    EmptyResult,
    UnexpectedInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub category: DiagnosticCategory,
    pub message: String,
}

impl Diagnostic {
    pub fn info(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            category,
            message: message.into(),
        }
    }

    pub fn warning(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            category,
            message: message.into(),
        }
    }

    pub fn error(category: DiagnosticCategory, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            category,
            message: message.into(),
        }
    }

    pub fn from_error(err: &EtlError) -> Self {
        let category = match err {
            EtlError::SchemaError { .. } => DiagnosticCategory::Schema,
            EtlError::EmptyResultError => DiagnosticCategory::EmptyResult,
            _ => DiagnosticCategory::UnexpectedInput,
        };
        Self::error(category, err.user_friendly_message())
    }
}

/// What one run hands back to the caller: the report rows and everything worth telling the operator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutput {
    pub output: OutputRecordSet,
    pub diagnostics: Vec<Diagnostic>,
}

impl RunOutput {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }

    pub fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_cells() {
        assert_eq!(CellValue::from_raw(""), CellValue::Missing);
        assert_eq!(CellValue::from_raw("NA"), CellValue::Missing);
        assert_eq!(CellValue::from_raw("1500.50"), CellValue::Text("1500.50".to_string()));
        assert_eq!(CellValue::from_raw("R"), CellValue::Text("R".to_string()));
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_plain_number("1500.50"), Some(1500.5));
        assert_eq!(parse_plain_number("-3"), Some(-3.0));
        assert_eq!(parse_plain_number("0.75"), Some(0.75));
        assert_eq!(parse_plain_number("0"), Some(0.0));
        assert_eq!(parse_plain_number("007"), None);
        assert_eq!(parse_plain_number("+62"), None);
        assert_eq!(parse_plain_number("1234E5"), None);
        assert_eq!(parse_plain_number("inf"), None);
        assert_eq!(parse_plain_number("1,000"), None);
        assert_eq!(parse_plain_number("12."), None);
        assert_eq!(parse_plain_number("12345678901234567"), None);
    }

    #[test]
    fn test_column_types_decided_per_column() {
        let set = RecordSet::from_rows(
            &["Billed", "ClaimNo", "Blank"],
            vec![vec!["1500", "C001", ""], vec!["", "1234E5", "NA"], vec!["20.5", "42", ""]],
        )
        .unwrap();

        assert_eq!(set.value(0, "Billed"), Some(&CellValue::Number(1500.0)));
        assert_eq!(set.value(1, "Billed"), Some(&CellValue::Missing));
        assert_eq!(set.value(2, "Billed"), Some(&CellValue::Number(20.5)));
        assert_eq!(set.value(1, "ClaimNo"), Some(&CellValue::Text("1234E5".to_string())));
        assert_eq!(set.value(2, "ClaimNo"), Some(&CellValue::Text("42".to_string())));
        assert_eq!(set.value(0, "Blank"), Some(&CellValue::Missing));
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Number(42.0).to_string(), "42");
        assert_eq!(CellValue::Number(1.25).to_string(), "1.25");
        assert_eq!(CellValue::Missing.to_string(), "");
        let dt = chrono::NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(CellValue::Date(dt).to_string(), "2024-01-15");
    }

    #[test]
    fn test_record_set_rejects_ragged_rows() {
        let result = RecordSet::from_rows(&["a", "b"], vec![vec!["1", "2"], vec!["3"]]);
        assert!(matches!(result, Err(EtlError::UnexpectedInputError { .. })));
    }

    #[test]
    fn test_retain_preserves_order() {
        let set = RecordSet::from_rows(&["k"], vec![vec!["a"], vec!["b"], vec!["c"], vec!["d"]]).unwrap();
        let kept = set.retain(|r| r.values[0] != CellValue::Text("b".to_string()));
        let values: Vec<String> = kept.records().iter().map(|r| r.values[0].to_string()).collect();
        assert_eq!(values, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_diagnostic_json_tags() {
        let diag = Diagnostic::warning(DiagnosticCategory::DateCoercion, "bad date");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["level"], "warning");
        assert_eq!(json["category"], "date_coercion");
    }
}
