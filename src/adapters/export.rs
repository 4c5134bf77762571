use crate::domain::model::StructureRecord;
use crate::domain::render::render_record;
use crate::domain::schema;
use crate::utils::error::{EntryError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

pub fn render(records: &[StructureRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(records)),
        OutputFormat::Json => render_json(records),
        OutputFormat::Csv => render_csv(records),
    }
}

pub fn render_text(records: &[StructureRecord]) -> String {
    records
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_json(records: &[StructureRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// CSV with the schema attribute names as header; absent optionals are empty cells.
pub fn render_csv(records: &[StructureRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    // serialize 只在第一筆紀錄時寫標頭
    if records.is_empty() {
        writer.write_record(schema::attribute_names())?;
    }
    for record in records {
        writer.serialize(record)?;
    }

    let bytes = writer.into_inner().map_err(|e| EntryError::ProcessingError {
        message: format!("Failed to flush CSV output: {}", e),
    })?;

    String::from_utf8(bytes).map_err(|e| EntryError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}
