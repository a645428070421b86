pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use crate::core::{etl::EtlEngine, etl::RunSummary, pipeline::ClaimPipeline, run, run_csv};
pub use domain::model::{
    CellValue, Diagnostic, DiagnosticCategory, DiagnosticLevel, OutputRecordSet, RecordSet,
    RunOutput,
};
pub use utils::error::{EtlError, Result};
