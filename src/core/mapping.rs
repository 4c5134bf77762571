use crate::domain::model::{AttributeMap, StructureRecord, StructureRecordBuilder};
use crate::domain::schema::{self, AttributeKind, ATTRIBUTE_SCHEMA};
use crate::utils::error::{EntryError, Result};

type Apply = fn(StructureRecordBuilder, &str) -> Result<StructureRecordBuilder>;

/// Attribute name to builder setter, in schema order.
const FIELD_MAPPING: [(&str, Apply); 16] = [
    (schema::STRUCTURE_ID, |b, v| Ok(b.structure_id(v))),
    (schema::TITLE, |b, v| Ok(b.title(v))),
    (schema::PUBMED_ID, |b, v| Ok(b.pubmed_id(v))),
    (schema::EXP_METHOD, |b, v| Ok(b.exp_method(v))),
    (schema::RESOLUTION, |b, v| {
        Ok(b.resolution(parse_float(schema::RESOLUTION, v)?))
    }),
    (schema::REPLACES, |b, v| Ok(b.replaces(v))),
    (schema::KEYWORDS, |b, v| Ok(b.keywords(v))),
    (schema::NR_ENTITIES, |b, v| {
        Ok(b.nr_entities(parse_count(schema::NR_ENTITIES, v)?))
    }),
    (schema::NR_RESIDUES, |b, v| {
        Ok(b.nr_residues(parse_count(schema::NR_RESIDUES, v)?))
    }),
    (schema::NR_ATOMS, |b, v| {
        Ok(b.nr_atoms(parse_count(schema::NR_ATOMS, v)?))
    }),
    (schema::DEPOSITION_DATE, |b, v| Ok(b.deposition_date(v))),
    (schema::RELEASE_DATE, |b, v| Ok(b.release_date(v))),
    (schema::LAST_MODIFICATION_DATE, |b, v| {
        Ok(b.last_modification_date(v))
    }),
    (schema::STRUCTURE_AUTHORS, |b, v| Ok(b.structure_authors(v))),
    (schema::CITATION_AUTHORS, |b, v| Ok(b.citation_authors(v))),
    (schema::STATUS, |b, v| Ok(b.status(v))),
];

fn parse_float(field: &'static str, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && *number >= 0.0)
        .ok_or_else(|| type_mismatch(field, value, AttributeKind::Float))
}

fn parse_count(field: &'static str, value: &str) -> Result<u32> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| type_mismatch(field, value, AttributeKind::Count))
}

fn type_mismatch(field: &'static str, value: &str, kind: AttributeKind) -> EntryError {
    EntryError::TypeMismatch {
        field,
        value: value.to_string(),
        expected: kind.expected(),
    }
}

impl StructureRecord {
    /// Builds a record from the attributes of one `<PDB>` element.
    ///
    /// Attribute names are matched case-sensitively. Attributes outside the
    /// schema are ignored; optional ones may be absent.
    pub fn from_attributes(attributes: &AttributeMap) -> Result<Self> {
        let mut builder = StructureRecord::builder();

        for (spec, (name, apply)) in ATTRIBUTE_SCHEMA.iter().zip(FIELD_MAPPING.iter()) {
            debug_assert_eq!(spec.name, *name);
            match attributes.get(*name) {
                Some(value) => builder = apply(builder, value.as_str())?,
                None if spec.required => {
                    return Err(EntryError::MissingRequiredField { field: spec.name })
                }
                None => {}
            }
        }

        for name in attributes.keys().filter(|name| schema::lookup(name).is_none()) {
            tracing::trace!("Ignoring unknown attribute '{}'", name);
        }

        builder.build()
    }
}
