//! Attribute schema of a `<PDB>` element.
//!
//! The table order is the canonical field order used by every rendering
//! (diagnostic dump, CSV header, JSON keys).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Text,
    Float,
    Count,
}

impl AttributeKind {
    /// Human readable description used in type mismatch errors.
    pub fn expected(self) -> &'static str {
        match self {
            AttributeKind::Text => "text",
            AttributeKind::Float => "a finite non-negative decimal number",
            AttributeKind::Count => "a non-negative integer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    pub name: &'static str,
    pub kind: AttributeKind,
    pub required: bool,
}

const fn spec(name: &'static str, kind: AttributeKind, required: bool) -> AttributeSpec {
    AttributeSpec {
        name,
        kind,
        required,
    }
}

pub const STRUCTURE_ID: &str = "structureId";
pub const TITLE: &str = "title";
pub const PUBMED_ID: &str = "pubmedId";
pub const EXP_METHOD: &str = "expMethod";
pub const RESOLUTION: &str = "resolution";
pub const REPLACES: &str = "replaces";
pub const KEYWORDS: &str = "keywords";
pub const NR_ENTITIES: &str = "nr_entities";
pub const NR_RESIDUES: &str = "nr_residues";
pub const NR_ATOMS: &str = "nr_atoms";
pub const DEPOSITION_DATE: &str = "deposition_date";
pub const RELEASE_DATE: &str = "release_date";
pub const LAST_MODIFICATION_DATE: &str = "last_modification_date";
pub const STRUCTURE_AUTHORS: &str = "structure_authors";
pub const CITATION_AUTHORS: &str = "citation_authors";
pub const STATUS: &str = "status";

pub const ATTRIBUTE_SCHEMA: [AttributeSpec; 16] = [
    spec(STRUCTURE_ID, AttributeKind::Text, true),
    spec(TITLE, AttributeKind::Text, true),
    spec(PUBMED_ID, AttributeKind::Text, false),
    spec(EXP_METHOD, AttributeKind::Text, true),
    spec(RESOLUTION, AttributeKind::Float, false),
    spec(REPLACES, AttributeKind::Text, false),
    spec(KEYWORDS, AttributeKind::Text, true),
    spec(NR_ENTITIES, AttributeKind::Count, true),
    spec(NR_RESIDUES, AttributeKind::Count, true),
    spec(NR_ATOMS, AttributeKind::Count, true),
    spec(DEPOSITION_DATE, AttributeKind::Text, true),
    spec(RELEASE_DATE, AttributeKind::Text, true),
    spec(LAST_MODIFICATION_DATE, AttributeKind::Text, true),
    spec(STRUCTURE_AUTHORS, AttributeKind::Text, true),
    spec(CITATION_AUTHORS, AttributeKind::Text, true),
    spec(STATUS, AttributeKind::Text, true),
];

pub fn lookup(name: &str) -> Option<&'static AttributeSpec> {
    ATTRIBUTE_SCHEMA.iter().find(|spec| spec.name == name)
}

pub fn required_attributes() -> impl Iterator<Item = &'static str> {
    ATTRIBUTE_SCHEMA
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
}

pub fn attribute_names() -> impl Iterator<Item = &'static str> {
    ATTRIBUTE_SCHEMA.iter().map(|spec| spec.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_has_thirteen_required_attributes() {
        let required: Vec<_> = required_attributes().collect();
        assert_eq!(required.len(), 13);
        assert!(!required.contains(&PUBMED_ID));
        assert!(!required.contains(&RESOLUTION));
        assert!(!required.contains(&REPLACES));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(lookup("nr_atoms").map(|s| s.kind), Some(AttributeKind::Count));
        assert_eq!(lookup("resolution").map(|s| s.kind), Some(AttributeKind::Float));
        assert!(lookup("StructureId").is_none());
        assert!(lookup("nrAtoms").is_none());
    }

    #[test]
    fn test_schema_order_starts_with_identifier_and_ends_with_status() {
        let names: Vec<_> = attribute_names().collect();
        assert_eq!(names.first(), Some(&STRUCTURE_ID));
        assert_eq!(names.last(), Some(&STATUS));
        assert_eq!(names[4], RESOLUTION);
    }
}
