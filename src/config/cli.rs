use crate::adapters::xlsx_output::DEFAULT_DATETIME_FORMAT;
use crate::core::ConfigProvider;
use crate::domain::schema::OUTPUT_FILE_NAME;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_run_settings, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "benefit-claim-etl")]
#[command(about = "Turns a claims export into the Benefit Claim spreadsheet")]
pub struct CliConfig {
    /// Claims export to process (CSV with a header row)
    #[arg(short, long)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = OUTPUT_FILE_NAME)]
    pub file_name: String,

    /// Excel number format for date cells
    #[arg(long, default_value = DEFAULT_DATETIME_FORMAT)]
    pub datetime_format: String,

    /// Number of transformed rows to print after the run
    #[arg(long, default_value = "5")]
    pub preview: usize,

    /// Write a JSON report of the diagnostics to this path
    #[arg(long)]
    pub report: Option<String>,

    /// Process the file and report, but do not write the workbook
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_file_name(&self) -> &str {
        &self.file_name
    }

    fn datetime_format(&self) -> &str {
        &self.datetime_format
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_run_settings(
            &self.input,
            &self.output_path,
            &self.file_name,
            &self.datetime_format,
        )?;
        validate_range("preview", self.preview, 0, 1000)?;
        if let Some(report) = &self.report {
            validate_path("report", report)?;
        }
        Ok(())
    }
}
