use crate::adapters::xlsx_output::{self, ExportOptions};
use crate::core::{ConfigProvider, Pipeline, RunOutput, Storage};
use crate::utils::error::Result;

pub struct ClaimPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> ClaimPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn output_file_path(&self) -> String {
        let dir = self.config.output_path().trim_end_matches('/');
        if dir.is_empty() {
            self.config.output_file_name().to_string()
        } else {
            format!("{}/{}", dir, self.config.output_file_name())
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ClaimPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<u8>> {
        tracing::debug!("Reading claims file: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        tracing::debug!("Read {} bytes", data.len());
        Ok(data)
    }

    async fn transform(&self, data: Vec<u8>) -> RunOutput {
        crate::core::run_csv(&data)
    }

    async fn load(&self, result: &RunOutput) -> Result<Option<String>> {
        if result.output.is_empty() {
            tracing::debug!("Nothing to write, skipping workbook");
            return Ok(None);
        }

        let options = ExportOptions {
            datetime_format: self.config.datetime_format().to_string(),
        };
        let workbook = xlsx_output::write_workbook(&result.output, &options)?;

        let output_path = self.output_file_path();
        tracing::debug!("Writing workbook ({} bytes) to {}", workbook.len(), output_path);
        self.storage.write_file(&output_path, &workbook).await?;

        Ok(Some(output_path))
    }
}
