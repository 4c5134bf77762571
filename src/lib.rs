pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::export::OutputFormat;
pub use adapters::xml::{parse_records, DEFAULT_ROOT_ELEMENT};
pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use crate::core::catalog::RecordCatalog;
pub use crate::core::engine::{EngineOptions, EntryEngine, RunSummary};
pub use crate::core::loader::{LoadFailure, LoadReport, LoaderSettings, RecordLoader};
pub use domain::model::{AttributeMap, StructureRecord, StructureRecordBuilder};
pub use domain::ports::{ConfigProvider, ErrorPolicy, Storage};
pub use domain::render::render_record;
pub use utils::error::{EntryError, Result};
