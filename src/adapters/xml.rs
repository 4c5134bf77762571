//! Attribute extraction from `describePDB` style documents.
//!
//! A document may hold a single `<PDB .../>` element or many of them wrapped
//! in `<PDBdescription>`. Only the attributes of the matching elements are
//! read; child content is ignored.

use crate::domain::model::{AttributeMap, StructureRecord};
use crate::utils::error::{EntryError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

pub const DEFAULT_ROOT_ELEMENT: &str = "PDB";

/// Attribute maps of every `element` in document order.
pub fn extract_attribute_maps(xml: &str, element: &str) -> Result<Vec<AttributeMap>> {
    let mut reader = Reader::from_str(xml);
    let mut maps = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                if e.name().as_ref() == element.as_bytes() {
                    maps.push(collect_attributes(&e)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    tracing::debug!("Found {} <{}> element(s)", maps.len(), element);
    Ok(maps)
}

fn collect_attributes(element: &BytesStart<'_>) -> Result<AttributeMap> {
    let mut attributes = AttributeMap::new();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        attributes.insert(key, value);
    }
    Ok(attributes)
}

/// Per-element construction results; the outer error is a document level failure.
pub fn parse_record_results(xml: &str, element: &str) -> Result<Vec<Result<StructureRecord>>> {
    Ok(extract_attribute_maps(xml, element)?
        .iter()
        .map(StructureRecord::from_attributes)
        .collect())
}

/// Every record in the document, failing on the first bad element.
pub fn parse_records(xml: &str, element: &str) -> Result<Vec<StructureRecord>> {
    parse_record_results(xml, element)?.into_iter().collect()
}

pub fn decode_document<'a>(document: &str, bytes: &'a [u8]) -> Result<&'a str> {
    let text = std::str::from_utf8(bytes).map_err(|_| EntryError::InvalidEncoding {
        document: document.to_string(),
    })?;
    Ok(text.trim_start_matches('\u{feff}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIBE_PDB: &str = r#"<?xml version='1.0' standalone='no' ?>
<PDBdescription>
  <PDB structureId="4HHB" title="THE CRYSTAL STRUCTURE OF HUMAN DEOXYHAEMOGLOBIN AT 1.74 ANGSTROMS RESOLUTION" pubmedId="6726807" expMethod="X-RAY DIFFRACTION" resolution="1.74" keywords="OXYGEN TRANSPORT" nr_entities="4" nr_residues="574" nr_atoms="4384" deposition_date="1984-03-07" release_date="1984-07-17" last_modification_date="2011-07-13" structure_authors="Fermi, G., Perutz, M.F." citation_authors="Fermi, G., Perutz, M.F., Shaanan, B., Fourme, R." status="CURRENT" replaces="1HHB" />
  <PDB structureId="1CRN" title="WATER STRUCTURE OF A HYDROPHOBIC PROTEIN &amp; ITS SOLVENT" expMethod="X-RAY DIFFRACTION" resolution="1.5" keywords="PLANT PROTEIN" nr_entities="1" nr_residues="46" nr_atoms="327" deposition_date="1981-04-30" release_date="1981-07-28" last_modification_date="2011-07-13" structure_authors="Teeter, M.M., Hendrickson, W.A." citation_authors="Teeter, M.M." status="CURRENT"></PDB>
</PDBdescription>"#;

    #[test]
    fn test_extracts_every_pdb_element() {
        let maps = extract_attribute_maps(DESCRIBE_PDB, DEFAULT_ROOT_ELEMENT).unwrap();
        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0]["structureId"], "4HHB");
        assert_eq!(maps[1]["structureId"], "1CRN");
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let records = parse_records(DESCRIBE_PDB, DEFAULT_ROOT_ELEMENT).unwrap();
        assert_eq!(
            records[1].title(),
            "WATER STRUCTURE OF A HYDROPHOBIC PROTEIN & ITS SOLVENT"
        );
        assert_eq!(records[0].replaces(), Some("1HHB"));
        assert_eq!(records[1].pubmed_id(), None);
    }

    #[test]
    fn test_element_name_is_case_sensitive() {
        let maps = extract_attribute_maps(DESCRIBE_PDB, "pdb").unwrap();
        assert!(maps.is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_xml_error() {
        let err = extract_attribute_maps("<PDB structureId=\"1ABC\"></PDBx>", "PDB").unwrap_err();
        assert!(matches!(err, EntryError::XmlError(_)));
    }

    #[test]
    fn test_record_results_keep_good_elements() {
        let xml = DESCRIBE_PDB.replace("structureId=\"1CRN\" ", "");
        let results = parse_record_results(&xml, DEFAULT_ROOT_ELEMENT).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1].as_ref().unwrap_err().missing_field(),
            Some("structureId")
        );
        assert!(parse_records(&xml, DEFAULT_ROOT_ELEMENT).is_err());
    }

    #[test]
    fn test_decode_document_strips_bom_and_rejects_invalid_utf8() {
        let bytes = "\u{feff}<PDBdescription/>".as_bytes();
        assert_eq!(decode_document("a.xml", bytes).unwrap(), "<PDBdescription/>");

        let err = decode_document("b.xml", &[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, EntryError::InvalidEncoding { .. }));
    }
}
