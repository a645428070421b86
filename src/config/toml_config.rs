use crate::adapters::xlsx_output::DEFAULT_DATETIME_FORMAT;
use crate::core::ConfigProvider;
use crate::domain::schema::OUTPUT_FILE_NAME;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_run_settings, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub file_name: Option<String>,
    pub datetime_format: Option<String>,
    pub preview_rows: Option<usize>,
    pub report: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<String>,
    pub verbose: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CLAIMS_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn preview_rows(&self) -> usize {
        self.output.preview_rows.unwrap_or(5)
    }

    pub fn report_path(&self) -> Option<&str> {
        self.output.report.as_deref()
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_file_name(&self) -> &str {
        self.output.file_name.as_deref().unwrap_or(OUTPUT_FILE_NAME)
    }

    fn datetime_format(&self) -> &str {
        self.output
            .datetime_format
            .as_deref()
            .unwrap_or(DEFAULT_DATETIME_FORMAT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_run_settings(
            self.input_path(),
            self.output_path(),
            self.output_file_name(),
            self.datetime_format(),
        )?;
        validate_range("output.preview_rows", self.preview_rows(), 0, 1000)?;
        if let Some(report) = self.report_path() {
            validate_path("output.report", report)?;
        }
        if let Some(format) = self.log_format() {
            if !["compact", "json"].contains(&format) {
                return Err(EtlError::InvalidConfigValueError {
                    field: "logging.format".to_string(),
                    value: format.to_string(),
                    reason: "Valid formats: compact, json".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "benefit-claims"

[input]
path = "claims.csv"

[output]
path = "./reports"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "benefit-claims");
        assert_eq!(config.input_path(), "claims.csv");
        assert_eq!(config.output_file_name(), "Transformed_Benefit_Claim_Data.xlsx");
        assert_eq!(config.datetime_format(), "yyyy-mm-dd hh:mm:ss");
        assert_eq!(config.preview_rows(), 5);
        assert!(!config.verbose());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BENEFIT_CLAIM_TEST_DIR", "/data/claims");

        let toml_content = r#"
[pipeline]
name = "test"

[input]
path = "${BENEFIT_CLAIM_TEST_DIR}/march.csv"

[output]
path = "${BENEFIT_CLAIM_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.input.path, "/data/claims/march.csv");
        assert_eq!(config.output.path, "${BENEFIT_CLAIM_UNSET_VAR}");

        std::env::remove_var("BENEFIT_CLAIM_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[pipeline]
name = "test"

[input]
path = "claims.csv"

[output]
path = "./output"
file_name = "report.csv"

[logging]
format = "xml"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"
version = "1.0"

[input]
path = "claims.csv"

[output]
path = "./output"
datetime_format = "dd/mm/yyyy"
preview_rows = 10

[logging]
format = "json"
verbose = true
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
        assert_eq!(config.datetime_format(), "dd/mm/yyyy");
        assert_eq!(config.preview_rows(), 10);
        assert_eq!(config.log_format(), Some("json"));
        assert!(config.verbose());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[pipeline\nname=").unwrap_err();
        assert!(matches!(err, EtlError::ConfigError { .. }));
    }
}
