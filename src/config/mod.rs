pub mod cli;
pub mod toml_config;

pub const DEFAULT_BASE_PATH: &str = ".";
pub const DEFAULT_CONCURRENT_DOCUMENTS: usize = 4;
pub const MAX_CONCURRENT_DOCUMENTS: usize = 64;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::{DEFAULT_BASE_PATH, DEFAULT_CONCURRENT_DOCUMENTS, MAX_CONCURRENT_DOCUMENTS};
    use crate::adapters::export::OutputFormat;
    use crate::adapters::xml::DEFAULT_ROOT_ELEMENT;
    use crate::domain::ports::{ConfigProvider, ErrorPolicy};
    use crate::utils::error::Result;
    use crate::utils::validation::{self, Validate};
    use clap::Parser;

    /// Options left unset fall back to the TOML file (when given) and then to defaults.
    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "pdb-entry")]
    #[command(about = "Load PDB structure entries from describePDB XML documents")]
    pub struct CliConfig {
        /// XML documents to load, relative to the base path
        pub documents: Vec<String>,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long)]
        pub base_path: Option<String>,

        /// Element whose attributes form one entry
        #[arg(long)]
        pub root_element: Option<String>,

        #[arg(long)]
        pub concurrent_documents: Option<usize>,

        /// What to do with entries that cannot be loaded
        #[arg(long, value_enum)]
        pub on_error: Option<ErrorPolicy>,

        #[arg(long, value_enum)]
        pub format: Option<OutputFormat>,

        /// Write output to this file instead of stdout
        #[arg(short, long)]
        pub output: Option<String>,

        /// Only keep entries whose id, title or keywords contain this term
        #[arg(long)]
        pub search: Option<String>,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl ConfigProvider for CliConfig {
        fn base_path(&self) -> &str {
            self.base_path.as_deref().unwrap_or(DEFAULT_BASE_PATH)
        }

        fn documents(&self) -> &[String] {
            &self.documents
        }

        fn root_element(&self) -> &str {
            self.root_element.as_deref().unwrap_or(DEFAULT_ROOT_ELEMENT)
        }

        fn concurrent_documents(&self) -> usize {
            self.concurrent_documents
                .unwrap_or(DEFAULT_CONCURRENT_DOCUMENTS)
        }

        fn error_policy(&self) -> ErrorPolicy {
            self.on_error.unwrap_or_default()
        }

        fn output_format(&self) -> OutputFormat {
            self.format.unwrap_or_default()
        }

        fn output_path(&self) -> Option<&str> {
            self.output.as_deref()
        }

        fn search_term(&self) -> Option<&str> {
            self.search.as_deref()
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if self.documents.is_empty() {
                return Err(crate::utils::error::EntryError::MissingConfigError {
                    field: "documents".to_string(),
                });
            }
            validation::validate_path("base_path", self.base_path())?;
            validation::validate_element_name("root_element", self.root_element())?;
            validation::validate_range(
                "concurrent_documents",
                self.concurrent_documents(),
                1,
                MAX_CONCURRENT_DOCUMENTS,
            )?;
            validation::validate_file_extensions("documents", &self.documents, &["xml"])?;
            if let Some(output) = self.output_path() {
                validation::validate_path("output", output)?;
            }
            Ok(())
        }
    }

}
