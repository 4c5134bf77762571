use anyhow::Context;
use clap::Parser;
use pdb_entry::utils::error::ErrorSeverity;
use pdb_entry::utils::{logger, validation::Validate};
use pdb_entry::{CliConfig, ConfigProvider, EntryEngine, LocalStorage, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 有設定檔時以檔案為基礎，命令列參數覆蓋
    let config = match &cli.config {
        Some(path) => TomlConfig::from_file(path)
            .with_context(|| format!("Failed to load config file '{}'", path))?
            .with_overrides(&cli),
        None => TomlConfig::default().with_overrides(&cli),
    };

    if config.json_logging() {
        logger::init_json_logger(config.verbose_logging());
    } else {
        logger::init_cli_logger(config.verbose_logging());
    }

    tracing::info!("Starting pdb-entry");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(config.base_path().to_string());
    let engine = EntryEngine::from_config(storage, &config);

    match engine.run(config.documents()).await {
        Ok(summary) => {
            if summary.output_path.is_none() {
                println!("{}", summary.rendered);
            }

            tracing::info!(
                "✅ {} of {} record(s) selected from {} document(s)",
                summary.records_selected,
                summary.records_loaded,
                summary.documents
            );

            if !summary.failures.is_empty() {
                eprintln!("⚠️ {} entr(y/ies) could not be loaded:", summary.failures.len());
                for failure in &summary.failures {
                    eprintln!("  {}: {}", failure.document, failure.error.user_friendly_message());
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Loading failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            std::process::exit(exit_code);
        }
    }

    Ok(())
}
