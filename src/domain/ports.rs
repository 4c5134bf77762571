use crate::adapters::export::OutputFormat;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Settings the loader needs, regardless of where they come from (CLI or TOML).
pub trait ConfigProvider: Send + Sync {
    fn base_path(&self) -> &str;
    fn documents(&self) -> &[String];
    fn root_element(&self) -> &str;
    fn concurrent_documents(&self) -> usize;
    fn error_policy(&self) -> ErrorPolicy;
    fn output_format(&self) -> OutputFormat;
    /// Relative to the base path; `None` means standard output.
    fn output_path(&self) -> Option<&str>;
    fn search_term(&self) -> Option<&str>;
}

/// What to do when one record or document cannot be loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// 記錄失敗後繼續
    #[default]
    Skip,
    Abort,
}
