use crate::adapters::export::{self, OutputFormat};
use crate::core::catalog::{record_matches, RecordCatalog};
use crate::core::loader::{LoadFailure, LoaderSettings, RecordLoader};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;

/// Result of one engine run.
#[derive(Debug)]
pub struct RunSummary {
    pub documents: usize,
    pub records_loaded: usize,
    pub records_selected: usize,
    pub failures: Vec<LoadFailure>,
    pub catalog: RecordCatalog,
    pub rendered: String,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub format: OutputFormat,
    pub output_path: Option<String>,
    pub search: Option<String>,
}

impl EngineOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            format: config.output_format(),
            output_path: config.output_path().map(str::to_string),
            search: config.search_term().map(str::to_string),
        }
    }
}

/// Load, select, render.
pub struct EntryEngine<S: Storage + 'static> {
    loader: RecordLoader<S>,
    options: EngineOptions,
}

impl<S: Storage + 'static> EntryEngine<S> {
    pub fn new(storage: S, settings: LoaderSettings, options: EngineOptions) -> Self {
        Self {
            loader: RecordLoader::new(storage, settings),
            options,
        }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self::new(
            storage,
            LoaderSettings::from_config(config),
            EngineOptions::from_config(config),
        )
    }

    pub async fn run(&self, documents: &[String]) -> Result<RunSummary> {
        tracing::info!("🚀 Loading {} document(s)", documents.len());
        let report = self.loader.load_all(documents).await?;
        let records_loaded = report.records.len();

        // 重複 id 的紀錄照樣輸出，只有目錄查詢會去重
        let selected: Vec<_> = match self.options.search.as_deref() {
            Some(term) => {
                let matches: Vec<_> = report
                    .records
                    .iter()
                    .filter(|record| record_matches(record, term))
                    .cloned()
                    .collect();
                tracing::info!("🔍 '{}' matched {} record(s)", term, matches.len());
                matches
            }
            None => report.records.clone(),
        };

        let rendered = export::render(&selected, self.options.format)?;

        if let Some(path) = &self.options.output_path {
            self.loader.storage().write_file(path, rendered.as_bytes()).await?;
            tracing::info!("📁 Output saved to: {}", path);
        }

        let catalog = RecordCatalog::new(report.records);

        Ok(RunSummary {
            documents: report.documents,
            records_loaded,
            records_selected: selected.len(),
            failures: report.failures,
            catalog,
            rendered,
            output_path: self.options.output_path.clone(),
        })
    }
}
