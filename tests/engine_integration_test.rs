use anyhow::Result;
use pdb_entry::{
    EngineOptions, EntryEngine, EntryError, ErrorPolicy, LoaderSettings, LocalStorage,
    OutputFormat, TomlConfig,
};
use tempfile::TempDir;

const HAEMOGLOBIN: &str = r#"<?xml version='1.0' standalone='no' ?>
<PDBdescription>
  <PDB structureId="4HHB" title="THE CRYSTAL STRUCTURE OF HUMAN DEOXYHAEMOGLOBIN" pubmedId="6726807" expMethod="X-RAY DIFFRACTION" resolution="1.74" replaces="1HHB" keywords="OXYGEN TRANSPORT" nr_entities="4" nr_residues="574" nr_atoms="4384" deposition_date="1984-03-07" release_date="1984-07-17" last_modification_date="2011-07-13" structure_authors="Fermi, G.;Perutz, M.F." citation_authors="Fermi, G.;Perutz, M.F." status="CURRENT"/>
</PDBdescription>"#;

const MIXED: &str = r#"<PDBdescription>
  <PDB structureId="1CRN" title="Crambin" expMethod="X-RAY DIFFRACTION" resolution="1.5" keywords="PLANT PROTEIN" nr_entities="1" nr_residues="46" nr_atoms="327" deposition_date="1981-04-30" release_date="1981-07-28" last_modification_date="2011-07-13" structure_authors="Teeter, M.M." citation_authors="Teeter, M.M." status="CURRENT"/>
  <PDB structureId="2BAD" title="Broken" expMethod="SOLUTION NMR" keywords="none" nr_entities="one" nr_residues="1" nr_atoms="1" deposition_date="2000-01-01" release_date="2000-01-01" last_modification_date="2000-01-01" structure_authors="X" citation_authors="X" status="OBSOLETE"/>
</PDBdescription>"#;

async fn data_dir() -> Result<TempDir> {
    let temp_dir = TempDir::new()?;
    tokio::fs::write(temp_dir.path().join("4hhb.xml"), HAEMOGLOBIN).await?;
    tokio::fs::write(temp_dir.path().join("mixed.xml"), MIXED).await?;
    Ok(temp_dir)
}

fn storage(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_str().unwrap().to_string())
}

fn documents() -> Vec<String> {
    vec!["4hhb.xml".to_string(), "mixed.xml".to_string()]
}

#[tokio::test]
async fn test_skip_policy_loads_good_entries_and_reports_bad_ones() -> Result<()> {
    let temp_dir = data_dir().await?;
    let engine = EntryEngine::new(
        storage(&temp_dir),
        LoaderSettings::default(),
        EngineOptions::default(),
    );

    let summary = engine.run(&documents()).await?;

    assert_eq!(summary.documents, 2);
    assert_eq!(summary.records_loaded, 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].document, "mixed.xml");
    assert_eq!(summary.failures[0].element_index, Some(1));
    assert!(matches!(
        summary.failures[0].error,
        EntryError::TypeMismatch { field: "nr_entities", .. }
    ));

    assert!(summary.catalog.get("4hhb").is_some());
    assert!(summary.catalog.get("1crn").is_some());
    assert!(summary.rendered.contains("structureId: 4HHB"));
    assert!(summary.rendered.contains("structureId: 1CRN"));
    assert!(summary.rendered.find("4HHB") < summary.rendered.find("1CRN"));
    Ok(())
}

#[tokio::test]
async fn test_abort_policy_fails_the_batch() -> Result<()> {
    let temp_dir = data_dir().await?;
    let settings = LoaderSettings {
        error_policy: ErrorPolicy::Abort,
        ..LoaderSettings::default()
    };
    let engine = EntryEngine::new(storage(&temp_dir), settings, EngineOptions::default());

    let err = engine.run(&documents()).await.unwrap_err();
    assert!(err.to_string().contains("mixed.xml"));
    Ok(())
}

#[tokio::test]
async fn test_search_and_csv_output_written_to_file() -> Result<()> {
    let temp_dir = data_dir().await?;
    let options = EngineOptions {
        format: OutputFormat::Csv,
        output_path: Some("out/oxygen.csv".to_string()),
        search: Some("oxygen".to_string()),
    };
    let engine = EntryEngine::new(storage(&temp_dir), LoaderSettings::default(), options);

    let summary = engine.run(&documents()).await?;
    assert_eq!(summary.records_selected, 1);
    assert_eq!(summary.output_path.as_deref(), Some("out/oxygen.csv"));

    let written = tokio::fs::read_to_string(temp_dir.path().join("out/oxygen.csv")).await?;
    let mut lines = written.lines();
    assert!(lines.next().unwrap().starts_with("structureId,title,pubmedId,expMethod,resolution"));
    assert!(lines.next().unwrap().starts_with("4HHB,"));
    assert!(lines.next().is_none());
    Ok(())
}

#[tokio::test]
async fn test_engine_from_toml_config() -> Result<()> {
    let temp_dir = data_dir().await?;
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[source]
base_path = "{}"
documents = ["4hhb.xml"]

[output]
format = "json"
"#,
        temp_dir.path().to_str().unwrap().replace('\\', "/")
    ))?;

    let engine = EntryEngine::from_config(storage(&temp_dir), &config);
    let summary = engine.run(&["4hhb.xml".to_string()]).await?;

    let json: serde_json::Value = serde_json::from_str(&summary.rendered)?;
    assert_eq!(json[0]["structureId"], "4HHB");
    assert_eq!(json[0]["resolution"], 1.74);
    assert_eq!(json[0]["replaces"], "1HHB");
    Ok(())
}

#[tokio::test]
async fn test_missing_document_is_reported_not_fatal_under_skip() -> Result<()> {
    let temp_dir = data_dir().await?;
    let engine = EntryEngine::new(
        storage(&temp_dir),
        LoaderSettings::default(),
        EngineOptions::default(),
    );

    let summary = engine
        .run(&["absent.xml".to_string(), "4hhb.xml".to_string()])
        .await?;

    assert_eq!(summary.records_loaded, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].element_index, None);
    assert!(matches!(summary.failures[0].error, EntryError::IoError(_)));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_identifiers_are_all_rendered() -> Result<()> {
    let temp_dir = data_dir().await?;
    let engine = EntryEngine::new(
        storage(&temp_dir),
        LoaderSettings::default(),
        EngineOptions::default(),
    );
    let twice = vec!["4hhb.xml".to_string(), "4hhb.xml".to_string()];

    let summary = engine.run(&twice).await?;

    assert_eq!(summary.records_loaded, 2);
    assert_eq!(summary.records_selected, 2);
    assert_eq!(summary.rendered.matches("StructureRecord {").count(), 2);
    assert_eq!(summary.catalog.len(), 1);

    let searched = EntryEngine::new(
        storage(&temp_dir),
        LoaderSettings::default(),
        EngineOptions {
            search: Some("haemoglobin".to_string()),
            ..EngineOptions::default()
        },
    )
    .run(&twice)
    .await?;
    assert_eq!(searched.records_selected, 2);
    Ok(())
}
