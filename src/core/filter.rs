use crate::core::diagnostics::Diagnostics;
use crate::domain::model::{CellValue, DiagnosticCategory, RecordSet};
use crate::domain::schema::{READY_STATUS, STATUS_COLUMN};
use crate::utils::error::{EtlError, Result};
use std::collections::HashMap;

/// Keeps only the claims whose status is exactly `R`, in upload order.
///
/// Reports how often each status value occurs and how many rows matched.
/// An empty result is not an error here; the transform stage rejects it.
pub fn filter_ready(input: RecordSet, diagnostics: &mut Diagnostics) -> Result<RecordSet> {
    tracing::info!("Filtering data where '{}' is '{}'...", STATUS_COLUMN, READY_STATUS);

    let status_idx = input
        .column_index(STATUS_COLUMN)
        .ok_or_else(|| EtlError::schema([STATUS_COLUMN]))?;

    let distribution = status_distribution(&input, status_idx);
    diagnostics.info(
        DiagnosticCategory::StatusDistribution,
        format_distribution(&distribution),
    );

    let total = input.len();
    let filtered = input.retain(|record| is_ready(&record.values[status_idx]));

    diagnostics.info(
        DiagnosticCategory::FilterResult,
        format!(
            "{} of {} rows have {} '{}'",
            filtered.len(),
            total,
            STATUS_COLUMN,
            READY_STATUS
        ),
    );

    Ok(filtered)
}

fn is_ready(cell: &CellValue) -> bool {
    matches!(cell, CellValue::Text(s) if s == READY_STATUS)
}

/// Distinct non-missing status values with counts, most frequent first.
/// Ties keep the order in which the values first appear.
pub fn status_distribution(input: &RecordSet, status_idx: usize) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in input.records() {
        let cell = &record.values[status_idx];
        if cell.is_missing() {
            continue;
        }
        let key = cell.to_string();
        match positions.get(&key) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    // stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn format_distribution(distribution: &[(String, usize)]) -> String {
    if distribution.is_empty() {
        return format!("{} value counts: (no values)", STATUS_COLUMN);
    }
    let pairs: Vec<String> = distribution
        .iter()
        .map(|(value, count)| format!("{}: {}", value, count))
        .collect();
    format!("{} value counts: {}", STATUS_COLUMN, pairs.join(", "))
}
