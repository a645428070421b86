use crate::domain::model::RunOutput;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_file_name(&self) -> &str;
    fn datetime_format(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Raw bytes of the uploaded claims file.
    async fn extract(&self) -> Result<Vec<u8>>;
    /// Never fails: problems with the data come back as diagnostics.
    async fn transform(&self, data: Vec<u8>) -> RunOutput;
    /// Writes the workbook; `None` when there were no rows to write.
    async fn load(&self, result: &RunOutput) -> Result<Option<String>>;
}
