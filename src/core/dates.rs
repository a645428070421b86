use crate::domain::model::{CellValue, RecordSet};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const DATETIME_FORMATS: [&str; 9] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S",
];

// Month-first wins over day-first for ambiguous slashed dates.
const DATE_FORMATS: [&str; 10] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%Y.%m.%d",
];

/// Reads a calendar date (optionally with a time of day) from free text.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    parse_compact(s)
}

/// `YYYYMMDD`, as some exports write dates into numeric columns.
fn parse_compact(s: &str) -> Option<NaiveDateTime> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = s[0..4].parse().ok()?;
    let month: u32 = s[4..6].parse().ok()?;
    let day: u32 = s[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.and_time(NaiveTime::MIN))
}

/// Turns a cell into a date, or into `Missing` when it cannot be read as one.
pub fn coerce_cell(cell: CellValue) -> CellValue {
    match cell {
        CellValue::Date(_) | CellValue::Missing => cell,
        CellValue::Text(s) => parse_date(&s).map_or(CellValue::Missing, CellValue::Date),
        // Read through the decimal text: a compact YYYYMMDD number becomes a date,
        // which is an extension over plain numeric columns; any other number is missing.
        CellValue::Number(_) => parse_date(&cell.to_string()).map_or(CellValue::Missing, CellValue::Date),
    }
}

/// Coerces one column in place. Returns how many of its cells are missing afterwards,
/// or `None` when the column is not in the set.
pub fn normalize_column(records: &mut RecordSet, column: &str) -> Option<usize> {
    let idx = records.column_index(column)?;
    let mut missing = 0;
    for record in records.records_mut() {
        let cell = std::mem::take(&mut record.values[idx]);
        let coerced = coerce_cell(cell);
        if coerced.is_missing() {
            missing += 1;
        }
        record.values[idx] = coerced;
    }
    Some(missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN)
    }

    #[test]
    fn test_parse_common_shapes() {
        assert_eq!(parse_date("2024-01-15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("2024/01/15"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("01/15/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("15/01/2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("15-Jan-2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("Jan 15, 2024"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date("20240115"), Some(ymd(2024, 1, 15)));
        assert_eq!(parse_date(" 2024-01-15 "), Some(ymd(2024, 1, 15)));
    }

    #[test]
    fn test_parse_with_time() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 20)
            .unwrap()
            .and_hms_opt(14, 45, 0)
            .unwrap();
        assert_eq!(parse_date("2024-03-20 14:45:00"), Some(expected));
        assert_eq!(parse_date("2024-03-20T14:45:00"), Some(expected));
        assert_eq!(parse_date("2024-03-20T14:45:00Z"), Some(expected));
        assert_eq!(parse_date("2024-03-20 14:45"), Some(expected));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2024-13-01"), None);
        assert_eq!(parse_date("2024-02-30"), None);
        assert_eq!(parse_date("12345678"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_coerce_is_idempotent() {
        let once = coerce_cell(CellValue::Text("2024-01-15".to_string()));
        assert_eq!(once, CellValue::Date(ymd(2024, 1, 15)));
        assert_eq!(coerce_cell(once.clone()), once);

        let bad = coerce_cell(CellValue::Text("pending".to_string()));
        assert_eq!(bad, CellValue::Missing);
        assert_eq!(coerce_cell(bad), CellValue::Missing);
    }

    #[test]
    fn test_coerce_number_cells() {
        assert_eq!(coerce_cell(CellValue::Number(20240115.0)), CellValue::Date(ymd(2024, 1, 15)));
        assert_eq!(coerce_cell(CellValue::Number(12.5)), CellValue::Missing);
    }

    #[test]
    fn test_normalize_column_counts_missing() {
        let mut set = RecordSet::from_rows(
            &["PaymentDate", "Other"],
            vec![vec!["2024-01-15", "x"], vec!["soon", "y"], vec!["", "z"]],
        )
        .unwrap();
        assert_eq!(normalize_column(&mut set, "PaymentDate"), Some(2));
        assert_eq!(set.value(0, "PaymentDate"), Some(&CellValue::Date(ymd(2024, 1, 15))));
        assert_eq!(set.value(1, "PaymentDate"), Some(&CellValue::Missing));
        assert_eq!(set.value(0, "Other"), Some(&CellValue::Text("x".to_string())));
        assert_eq!(normalize_column(&mut set, "Date"), None);
    }
}
