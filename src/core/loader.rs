use crate::adapters::xml;
use crate::domain::model::StructureRecord;
use crate::domain::ports::{ConfigProvider, ErrorPolicy, Storage};
use crate::utils::error::{EntryError, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// One record or document that could not be loaded.
#[derive(Debug)]
pub struct LoadFailure {
    pub document: String,
    /// Position of the `<PDB>` element inside the document; `None` when the
    /// whole document failed.
    pub element_index: Option<usize>,
    pub error: EntryError,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub records: Vec<StructureRecord>,
    pub failures: Vec<LoadFailure>,
    pub documents: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    pub root_element: String,
    pub concurrent_documents: usize,
    pub error_policy: ErrorPolicy,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            root_element: xml::DEFAULT_ROOT_ELEMENT.to_string(),
            concurrent_documents: 4,
            error_policy: ErrorPolicy::Skip,
        }
    }
}

impl LoaderSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            root_element: config.root_element().to_string(),
            concurrent_documents: config.concurrent_documents(),
            error_policy: config.error_policy(),
        }
    }
}

type DocumentOutcome = Result<Vec<Result<StructureRecord>>>;

pub struct RecordLoader<S: Storage + 'static> {
    storage: Arc<S>,
    settings: LoaderSettings,
}

impl<S: Storage + 'static> RecordLoader<S> {
    pub fn new(storage: S, settings: LoaderSettings) -> Self {
        Self {
            storage: Arc::new(storage),
            settings,
        }
    }

    pub fn storage(&self) -> &S {
        self.storage.as_ref()
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Reads one document and returns all of its records, failing on the first bad one.
    pub async fn load_document(&self, document: &str) -> Result<Vec<StructureRecord>> {
        read_document(self.storage.as_ref(), document, &self.settings.root_element)
            .await?
            .into_iter()
            .collect()
    }

    /// Loads every document, at most `concurrent_documents` at a time.
    ///
    /// Records keep the order of `documents`, then element order. With
    /// [`ErrorPolicy::Abort`] the first failure in that order is returned as a
    /// [`EntryError::DocumentLoadError`].
    pub async fn load_all(&self, documents: &[String]) -> Result<LoadReport> {
        let permits = Arc::new(Semaphore::new(self.settings.concurrent_documents.max(1)));
        let mut tasks = JoinSet::new();

        for (index, document) in documents.iter().enumerate() {
            let storage = Arc::clone(&self.storage);
            let permits = Arc::clone(&permits);
            let document = document.clone();
            let element = self.settings.root_element.clone();

            tasks.spawn(async move {
                let outcome = match permits.acquire_owned().await {
                    Ok(_permit) => read_document(storage.as_ref(), &document, &element).await,
                    Err(e) => Err(EntryError::ProcessingError {
                        message: format!("Loader permit pool closed: {}", e),
                    }),
                };
                (index, document, outcome)
            });
        }

        let mut outcomes: Vec<(usize, String, DocumentOutcome)> = Vec::with_capacity(documents.len());
        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(|e| EntryError::ProcessingError {
                message: format!("Document task failed: {}", e),
            })?;
            outcomes.push(outcome);
        }
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut report = LoadReport {
            documents: documents.len(),
            ..LoadReport::default()
        };

        for (_, document, outcome) in outcomes {
            self.collect_document(&mut report, document, outcome)?;
        }

        tracing::info!(
            "📦 Loaded {} record(s) from {} document(s), {} failure(s)",
            report.records.len(),
            report.documents,
            report.failures.len()
        );

        Ok(report)
    }

    fn collect_document(
        &self,
        report: &mut LoadReport,
        document: String,
        outcome: DocumentOutcome,
    ) -> Result<()> {
        let results = match outcome {
            Ok(results) => results,
            Err(error) => {
                return self.record_failure(report, document, None, error);
            }
        };

        for (element_index, result) in results.into_iter().enumerate() {
            match result {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    self.record_failure(report, document.clone(), Some(element_index), error)?
                }
            }
        }
        Ok(())
    }

    fn record_failure(
        &self,
        report: &mut LoadReport,
        document: String,
        element_index: Option<usize>,
        error: EntryError,
    ) -> Result<()> {
        match self.settings.error_policy {
            ErrorPolicy::Abort => Err(EntryError::DocumentLoadError {
                document,
                source: Box::new(error),
            }),
            ErrorPolicy::Skip => {
                match element_index {
                    Some(index) => tracing::warn!(
                        "⚠️ Skipping element #{} in {}: {}",
                        index,
                        document,
                        error
                    ),
                    None => tracing::warn!("⚠️ Skipping document {}: {}", document, error),
                }
                report.failures.push(LoadFailure {
                    document,
                    element_index,
                    error,
                });
                Ok(())
            }
        }
    }
}

async fn read_document<S: Storage>(storage: &S, document: &str, element: &str) -> DocumentOutcome {
    tracing::debug!("Reading document {}", document);
    let bytes = storage.read_file(document).await?;
    let xml = xml::decode_document(document, &bytes)?;
    xml::parse_record_results(xml, element)
}
