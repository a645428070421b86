use crate::core::etl::RunSummary;
use crate::domain::model::{DiagnosticLevel, OutputRecordSet};
use crate::domain::schema::XLSX_CONTENT_TYPE;

/// Operator-facing text for a finished run: diagnostics in order, then a preview and the download details.
pub fn render_summary(summary: &RunSummary, preview_rows: usize) -> String {
    let mut lines = Vec::new();

    for diagnostic in &summary.run.diagnostics {
        let marker = match diagnostic.level {
            DiagnosticLevel::Info => "ℹ️",
            DiagnosticLevel::Warning => "⚠️",
            DiagnosticLevel::Error => "❌",
        };
        lines.push(format!("{} {}", marker, diagnostic.message));
    }

    if !summary.run.output.is_empty() {
        if preview_rows > 0 {
            lines.push(String::new());
            lines.push("Transformed Data Preview:".to_string());
            lines.push(render_preview(&summary.run.output, preview_rows));
        }
        lines.push(String::new());
        match &summary.output_path {
            Some(path) => {
                lines.push(format!("✅ {} rows written", summary.rows_written()));
                lines.push(format!("📁 Output saved to: {}", path));
                lines.push(format!("📄 Content type: {}", XLSX_CONTENT_TYPE));
            }
            None => lines.push(format!(
                "🔍 {} rows ready, workbook not written",
                summary.run.output.len()
            )),
        }
    } else if !summary.run.has_errors() {
        lines.push("❌ The transformed data is empty. Please check the input file.".to_string());
    }

    lines.join("\n")
}

/// Plain-text table of the first `rows` report rows, columns padded to their widest cell.
pub fn render_preview(output: &OutputRecordSet, rows: usize) -> String {
    let headers = output.headers();
    let body: Vec<Vec<String>> = output
        .head(rows)
        .iter()
        .map(|row| {
            std::iter::once(row.number.to_string())
                .chain(row.values.iter().map(|v| v.to_string()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            body.iter()
                .map(|cells| cells[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(pad_line(headers.iter().copied(), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for cells in &body {
        lines.push(pad_line(cells.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}
