use crate::domain::model::StructureRecord;
use std::collections::HashMap;

/// Loaded records with lookup by identifier and free text search.
#[derive(Debug, Clone, Default)]
pub struct RecordCatalog {
    records: Vec<StructureRecord>,
    by_id: HashMap<String, usize>,
}

fn normalize_id(id: &str) -> String {
    id.trim().to_ascii_uppercase()
}

/// Case-insensitive substring match over id, title and keywords; a blank term matches nothing.
pub fn record_matches(record: &StructureRecord, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }

    record.structure_id().to_lowercase().contains(&needle)
        || record.title().to_lowercase().contains(&needle)
        || record.keywords().to_lowercase().contains(&needle)
}

impl RecordCatalog {
    pub fn new(records: Vec<StructureRecord>) -> Self {
        let mut kept = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());

        for record in records {
            let key = normalize_id(record.structure_id());
            if by_id.contains_key(&key) {
                tracing::warn!(
                    "⚠️ Duplicate structure id {}, keeping the first record",
                    record.structure_id()
                );
                continue;
            }
            by_id.insert(key, kept.len());
            kept.push(record);
        }

        Self {
            records: kept,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StructureRecord] {
        &self.records
    }

    /// Case-insensitive identifier lookup (`4hhb` finds `4HHB`).
    pub fn get(&self, structure_id: &str) -> Option<&StructureRecord> {
        self.by_id
            .get(&normalize_id(structure_id))
            .map(|&index| &self.records[index])
    }

    /// Records whose id, title or keywords contain `term`, ignoring case.
    ///
    /// A blank term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&StructureRecord> {
        self.records
            .iter()
            .filter(|record| record_matches(record, term))
            .collect()
    }

    /// Records that declare they replace `structure_id`.
    pub fn superseding(&self, structure_id: &str) -> Vec<&StructureRecord> {
        let key = normalize_id(structure_id);
        self.records
            .iter()
            .filter(|record| record.replaces().map(normalize_id).as_deref() == Some(key.as_str()))
            .collect()
    }
}
