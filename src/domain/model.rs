use crate::domain::schema::{self, AttributeKind};
use crate::utils::error::{EntryError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

pub const RCSB_STRUCTURE_PREFIX: &str = "https://www.rcsb.org/structure/";
pub const RCSB_DOWNLOAD_PREFIX: &str = "https://files.rcsb.org/download/";

/// Attribute name to raw attribute value, as read from one `<PDB>` element.
pub type AttributeMap = HashMap<String, String>;

/// One deposited structure.
///
/// Built once (through [`StructureRecordBuilder`] or
/// [`StructureRecord::from_attributes`]) and read-only afterwards. Field order
/// matches [`schema::ATTRIBUTE_SCHEMA`], which is also the JSON key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureRecord {
    #[serde(rename = "structureId")]
    structure_id: String,
    title: String,
    #[serde(rename = "pubmedId")]
    pubmed_id: Option<String>,
    #[serde(rename = "expMethod")]
    exp_method: String,
    resolution: f64,
    replaces: Option<String>,
    keywords: String,
    nr_entities: u32,
    nr_residues: u32,
    nr_atoms: u32,
    deposition_date: String,
    release_date: String,
    last_modification_date: String,
    structure_authors: String,
    citation_authors: String,
    status: String,
}

impl StructureRecord {
    pub fn builder() -> StructureRecordBuilder {
        StructureRecordBuilder::default()
    }

    pub fn structure_id(&self) -> &str {
        &self.structure_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pubmed_id(&self) -> Option<&str> {
        self.pubmed_id.as_deref()
    }

    pub fn exp_method(&self) -> &str {
        &self.exp_method
    }

    /// Resolution in angstroms, `0.0` when the entry has none.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn replaces(&self) -> Option<&str> {
        self.replaces.as_deref()
    }

    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    pub fn nr_entities(&self) -> u32 {
        self.nr_entities
    }

    pub fn nr_residues(&self) -> u32 {
        self.nr_residues
    }

    pub fn nr_atoms(&self) -> u32 {
        self.nr_atoms
    }

    pub fn deposition_date(&self) -> &str {
        &self.deposition_date
    }

    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    pub fn last_modification_date(&self) -> &str {
        &self.last_modification_date
    }

    pub fn structure_authors(&self) -> &str {
        &self.structure_authors
    }

    pub fn citation_authors(&self) -> &str {
        &self.citation_authors
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Resolution only when it was actually measured.
    ///
    /// Zero (the absent sentinel) and any non-positive value mean the method
    /// has no resolution concept.
    pub fn measured_resolution(&self) -> Option<f64> {
        (self.resolution > 0.0).then_some(self.resolution)
    }

    pub fn keyword_list(&self) -> Vec<&str> {
        split_list(&self.keywords, &[';', ','])
    }

    pub fn structure_author_list(&self) -> Vec<&str> {
        split_list(&self.structure_authors, &[';'])
    }

    pub fn citation_author_list(&self) -> Vec<&str> {
        split_list(&self.citation_authors, &[';'])
    }

    pub fn deposited_on(&self) -> Option<NaiveDate> {
        parse_date(&self.deposition_date)
    }

    pub fn released_on(&self) -> Option<NaiveDate> {
        parse_date(&self.release_date)
    }

    pub fn last_modified_on(&self) -> Option<NaiveDate> {
        parse_date(&self.last_modification_date)
    }

    pub fn is_current(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("current")
    }

    pub fn is_obsolete(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("obsolete")
    }

    pub fn info_url(&self) -> String {
        format!("{}{}", RCSB_STRUCTURE_PREFIX, self.structure_id)
    }

    pub fn download_url(&self) -> String {
        format!("{}{}.pdb", RCSB_DOWNLOAD_PREFIX, self.structure_id)
    }
}

fn split_list<'a>(text: &'a str, separators: &[char]) -> Vec<&'a str> {
    text.split(separators)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

// 只取開頭的 YYYY-MM-DD，容許後面帶時間
fn parse_date(text: &str) -> Option<NaiveDate> {
    let date = text.trim().get(..10)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Collects field values before producing an immutable [`StructureRecord`].
#[derive(Debug, Clone, Default)]
pub struct StructureRecordBuilder {
    structure_id: Option<String>,
    title: Option<String>,
    pubmed_id: Option<String>,
    exp_method: Option<String>,
    resolution: Option<f64>,
    replaces: Option<String>,
    keywords: Option<String>,
    nr_entities: Option<u32>,
    nr_residues: Option<u32>,
    nr_atoms: Option<u32>,
    deposition_date: Option<String>,
    release_date: Option<String>,
    last_modification_date: Option<String>,
    structure_authors: Option<String>,
    citation_authors: Option<String>,
    status: Option<String>,
}

impl StructureRecordBuilder {
    pub fn structure_id(mut self, value: impl Into<String>) -> Self {
        self.structure_id = Some(value.into());
        self
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn pubmed_id(mut self, value: impl Into<String>) -> Self {
        self.pubmed_id = Some(value.into());
        self
    }

    pub fn exp_method(mut self, value: impl Into<String>) -> Self {
        self.exp_method = Some(value.into());
        self
    }

    pub fn resolution(mut self, value: f64) -> Self {
        self.resolution = Some(value);
        self
    }

    pub fn replaces(mut self, value: impl Into<String>) -> Self {
        self.replaces = Some(value.into());
        self
    }

    pub fn keywords(mut self, value: impl Into<String>) -> Self {
        self.keywords = Some(value.into());
        self
    }

    pub fn nr_entities(mut self, value: u32) -> Self {
        self.nr_entities = Some(value);
        self
    }

    pub fn nr_residues(mut self, value: u32) -> Self {
        self.nr_residues = Some(value);
        self
    }

    pub fn nr_atoms(mut self, value: u32) -> Self {
        self.nr_atoms = Some(value);
        self
    }

    pub fn deposition_date(mut self, value: impl Into<String>) -> Self {
        self.deposition_date = Some(value.into());
        self
    }

    pub fn release_date(mut self, value: impl Into<String>) -> Self {
        self.release_date = Some(value.into());
        self
    }

    pub fn last_modification_date(mut self, value: impl Into<String>) -> Self {
        self.last_modification_date = Some(value.into());
        self
    }

    pub fn structure_authors(mut self, value: impl Into<String>) -> Self {
        self.structure_authors = Some(value.into());
        self
    }

    pub fn citation_authors(mut self, value: impl Into<String>) -> Self {
        self.citation_authors = Some(value.into());
        self
    }

    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }

    /// Fails on the first unset required field, in schema order.
    pub fn build(self) -> Result<StructureRecord> {
        Ok(StructureRecord {
            structure_id: require(self.structure_id, schema::STRUCTURE_ID)?,
            title: require(self.title, schema::TITLE)?,
            pubmed_id: self.pubmed_id,
            exp_method: require(self.exp_method, schema::EXP_METHOD)?,
            resolution: check_resolution(self.resolution)?,
            replaces: self.replaces,
            keywords: require(self.keywords, schema::KEYWORDS)?,
            nr_entities: require(self.nr_entities, schema::NR_ENTITIES)?,
            nr_residues: require(self.nr_residues, schema::NR_RESIDUES)?,
            nr_atoms: require(self.nr_atoms, schema::NR_ATOMS)?,
            deposition_date: require(self.deposition_date, schema::DEPOSITION_DATE)?,
            release_date: require(self.release_date, schema::RELEASE_DATE)?,
            last_modification_date: require(
                self.last_modification_date,
                schema::LAST_MODIFICATION_DATE,
            )?,
            structure_authors: require(self.structure_authors, schema::STRUCTURE_AUTHORS)?,
            citation_authors: require(self.citation_authors, schema::CITATION_AUTHORS)?,
            status: require(self.status, schema::STATUS)?,
        })
    }
}

fn require<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or(EntryError::MissingRequiredField { field })
}

/// 未設定時為 0.0；NaN、無限大與負值都不是有效的解析度
fn check_resolution(value: Option<f64>) -> Result<f64> {
    match value {
        None => Ok(0.0),
        Some(resolution) if resolution.is_finite() && resolution >= 0.0 => Ok(resolution),
        Some(resolution) => Err(EntryError::TypeMismatch {
            field: schema::RESOLUTION,
            value: resolution.to_string(),
            expected: AttributeKind::Float.expected(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_builder() -> StructureRecordBuilder {
        StructureRecord::builder()
            .structure_id("1ABC")
            .title("Test Structure")
            .exp_method("X-RAY DIFFRACTION")
            .keywords("enzyme")
            .nr_entities(2)
            .nr_residues(150)
            .nr_atoms(1200)
            .deposition_date("1999-01-01")
            .release_date("1999-06-01")
            .last_modification_date("2001-01-01")
            .structure_authors("Smith, J.")
            .citation_authors("Smith, J.")
            .status("current")
    }

    #[test]
    fn test_builder_defaults_optional_fields() {
        let record = sample_builder().build().unwrap();

        assert_eq!(record.structure_id(), "1ABC");
        assert_eq!(record.resolution(), 0.0);
        assert_eq!(record.measured_resolution(), None);
        assert_eq!(record.pubmed_id(), None);
        assert_eq!(record.replaces(), None);
    }

    #[test]
    fn test_builder_reports_missing_required_field() {
        let err = StructureRecord::builder()
            .structure_id("1ABC")
            .title("Missing everything else")
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            EntryError::MissingRequiredField { field: "expMethod" }
        ));
    }

    #[test]
    fn test_list_views_split_opaque_text() {
        let record = sample_builder()
            .keywords("HYDROLASE; enzyme, , metal binding")
            .structure_authors("Smith, J.;Doe, A.; ")
            .build()
            .unwrap();

        assert_eq!(record.keyword_list(), vec!["HYDROLASE", "enzyme", "metal binding"]);
        assert_eq!(record.structure_author_list(), vec!["Smith, J.", "Doe, A."]);
        assert_eq!(record.citation_author_list(), vec!["Smith, J."]);
        // 原始文字不變
        assert_eq!(record.keywords(), "HYDROLASE; enzyme, , metal binding");
    }

    #[test]
    fn test_date_views() {
        let record = sample_builder()
            .last_modification_date("2011-07-13T00:00:00")
            .release_date("not a date")
            .build()
            .unwrap();

        assert_eq!(record.deposited_on(), NaiveDate::from_ymd_opt(1999, 1, 1));
        assert_eq!(record.released_on(), None);
        assert_eq!(record.last_modified_on(), NaiveDate::from_ymd_opt(2011, 7, 13));
        assert_eq!(record.release_date(), "not a date");
    }

    #[test]
    fn test_status_and_links() {
        let record = sample_builder().status("CURRENT").build().unwrap();
        assert!(record.is_current());
        assert!(!record.is_obsolete());
        assert_eq!(record.info_url(), "https://www.rcsb.org/structure/1ABC");
        assert_eq!(record.download_url(), "https://files.rcsb.org/download/1ABC.pdb");
    }

    #[test]
    fn test_measured_resolution_for_diffraction_entry() {
        let record = sample_builder().resolution(1.74).build().unwrap();
        assert_eq!(record.measured_resolution(), Some(1.74));
    }

    #[test]
    fn test_builder_rejects_unusable_resolution() {
        for bad in [f64::NAN, f64::INFINITY, -2.0] {
            let err = sample_builder().resolution(bad).build().unwrap_err();
            assert!(
                matches!(err, EntryError::TypeMismatch { field: "resolution", .. }),
                "value {} gave {:?}",
                bad,
                err
            );
        }

        let record = sample_builder().resolution(0.0).build().unwrap();
        assert_eq!(record.resolution(), 0.0);
        assert_eq!(record.measured_resolution(), None);
    }

    #[test]
    fn test_record_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StructureRecord>();
    }
}
