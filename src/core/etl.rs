use crate::core::{Pipeline, RunOutput};
use crate::domain::model::{Diagnostic, DiagnosticLevel};
use crate::domain::schema::{SHEET_NAME, XLSX_CONTENT_TYPE};
use crate::utils::error::Result;
use serde::Serialize;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

/// Outcome of one upload: the transformed rows, diagnostics, and where the workbook went.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run: RunOutput,
    pub output_path: Option<String>,
}

#[derive(Debug, Serialize)]
struct RunReport<'a> {
    rows: usize,
    output_path: Option<&'a str>,
    sheet_name: &'static str,
    content_type: &'static str,
    diagnostics: &'a [Diagnostic],
}

impl RunSummary {
    pub fn rows_written(&self) -> usize {
        if self.output_path.is_some() {
            self.run.output.len()
        } else {
            0
        }
    }

    pub fn succeeded(&self) -> bool {
        !self.run.has_errors()
    }

    /// JSON document with the row count and every diagnostic, for callers that display them.
    pub fn report_json(&self) -> Result<String> {
        let report = RunReport {
            rows: self.run.output.len(),
            output_path: self.output_path.as_deref(),
            sheet_name: SHEET_NAME,
            content_type: XLSX_CONTENT_TYPE,
            diagnostics: &self.run.diagnostics,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting benefit claim transform");

        let run = self.extract_and_transform().await?;

        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(&run).await?;
        match &output_path {
            Some(path) => tracing::info!("Workbook saved to: {}", path),
            None => tracing::info!("No workbook written"),
        }

        Ok(RunSummary { run, output_path })
    }

    /// Extract and transform only; nothing is written.
    pub async fn dry_run(&self) -> Result<RunSummary> {
        tracing::info!("Starting benefit claim transform (dry run)");
        let run = self.extract_and_transform().await?;
        Ok(RunSummary {
            run,
            output_path: None,
        })
    }

    async fn extract_and_transform(&self) -> Result<RunOutput> {
        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} bytes", raw_data.len());

        tracing::info!("Transforming data...");
        let run = self.pipeline.transform(raw_data).await;
        tracing::info!(
            "Transformed {} records ({} warnings, {} errors)",
            run.output.len(),
            run.count(DiagnosticLevel::Warning),
            run.count(DiagnosticLevel::Error)
        );
        Ok(run)
    }
}
