use super::{DEFAULT_BASE_PATH, DEFAULT_CONCURRENT_DOCUMENTS, MAX_CONCURRENT_DOCUMENTS};
use crate::adapters::export::OutputFormat;
use crate::adapters::xml::DEFAULT_ROOT_ELEMENT;
use crate::domain::ports::{ConfigProvider, ErrorPolicy};
use crate::utils::error::{EntryError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub loader: Option<LoaderConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_path: Option<String>,
    pub root_element: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub concurrent_documents: Option<usize>,
    pub on_error: Option<ErrorPolicy>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub path: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EntryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EntryError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PDB_DATA_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EntryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列參數優先於檔案設定
    #[cfg(feature = "cli")]
    pub fn with_overrides(mut self, cli: &super::CliConfig) -> Self {
        if !cli.documents.is_empty() {
            self.source.documents = cli.documents.clone();
        }
        if let Some(base_path) = &cli.base_path {
            self.source.base_path = Some(base_path.clone());
        }
        if let Some(root_element) = &cli.root_element {
            self.source.root_element = Some(root_element.clone());
        }

        let loader = self.loader.get_or_insert_with(LoaderConfig::default);
        if cli.concurrent_documents.is_some() {
            loader.concurrent_documents = cli.concurrent_documents;
        }
        if cli.on_error.is_some() {
            loader.on_error = cli.on_error;
        }

        let output = self.output.get_or_insert_with(OutputConfig::default);
        if cli.format.is_some() {
            output.format = cli.format;
        }
        if cli.output.is_some() {
            output.path = cli.output.clone();
        }
        if cli.search.is_some() {
            output.search = cli.search.clone();
        }

        let logging = self.logging.get_or_insert_with(LoggingConfig::default);
        if cli.verbose {
            logging.verbose = Some(true);
        }
        if cli.json_logs {
            logging.json = Some(true);
        }

        self
    }

    pub fn verbose_logging(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if self.source.documents.is_empty() {
            return Err(EntryError::MissingConfigError {
                field: "source.documents".to_string(),
            });
        }

        validation::validate_path("source.base_path", self.base_path())?;
        validation::validate_element_name("source.root_element", self.root_element())?;
        validation::validate_file_extensions("source.documents", &self.source.documents, &["xml"])?;
        validation::validate_range(
            "loader.concurrent_documents",
            self.concurrent_documents(),
            1,
            MAX_CONCURRENT_DOCUMENTS,
        )?;

        if let Some(path) = self.output_path() {
            validation::validate_path("output.path", path)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn base_path(&self) -> &str {
        self.source.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH)
    }

    fn documents(&self) -> &[String] {
        &self.source.documents
    }

    fn root_element(&self) -> &str {
        self.source
            .root_element
            .as_deref()
            .unwrap_or(DEFAULT_ROOT_ELEMENT)
    }

    fn concurrent_documents(&self) -> usize {
        self.loader
            .as_ref()
            .and_then(|l| l.concurrent_documents)
            .unwrap_or(DEFAULT_CONCURRENT_DOCUMENTS)
    }

    fn error_policy(&self) -> ErrorPolicy {
        self.loader
            .as_ref()
            .and_then(|l| l.on_error)
            .unwrap_or_default()
    }

    fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.format)
            .unwrap_or_default()
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.path.as_deref())
    }

    fn search_term(&self) -> Option<&str> {
        self.output.as_ref().and_then(|o| o.search.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
