//! Diagnostic text dump of a [`StructureRecord`].
//!
//! Output is for logs and humans only. It is stable in order and labels but
//! is not meant to be parsed back.

use crate::domain::model::StructureRecord;
use crate::domain::schema::{self, ATTRIBUTE_SCHEMA};
use std::fmt;

pub const ABSENT: &str = "<absent>";

/// `(label, value)` pairs in schema order.
pub fn labelled_values(record: &StructureRecord) -> Vec<(&'static str, String)> {
    ATTRIBUTE_SCHEMA
        .iter()
        .map(|spec| (spec.name, field_value(record, spec.name)))
        .collect()
}

fn field_value(record: &StructureRecord, name: &str) -> String {
    let optional = |value: Option<&str>| value.unwrap_or(ABSENT).to_string();

    match name {
        schema::STRUCTURE_ID => record.structure_id().to_string(),
        schema::TITLE => record.title().to_string(),
        schema::PUBMED_ID => optional(record.pubmed_id()),
        schema::EXP_METHOD => record.exp_method().to_string(),
        schema::RESOLUTION => record.resolution().to_string(),
        schema::REPLACES => optional(record.replaces()),
        schema::KEYWORDS => record.keywords().to_string(),
        schema::NR_ENTITIES => record.nr_entities().to_string(),
        schema::NR_RESIDUES => record.nr_residues().to_string(),
        schema::NR_ATOMS => record.nr_atoms().to_string(),
        schema::DEPOSITION_DATE => record.deposition_date().to_string(),
        schema::RELEASE_DATE => record.release_date().to_string(),
        schema::LAST_MODIFICATION_DATE => record.last_modification_date().to_string(),
        schema::STRUCTURE_AUTHORS => record.structure_authors().to_string(),
        schema::CITATION_AUTHORS => record.citation_authors().to_string(),
        schema::STATUS => record.status().to_string(),
        _ => ABSENT.to_string(),
    }
}

pub fn render_record(record: &StructureRecord) -> String {
    let mut lines = vec!["StructureRecord {".to_string()];
    for (label, value) in labelled_values(record) {
        lines.push(format!("  {}: {}", label, value));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

impl fmt::Display for StructureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_record(self))
    }
}
