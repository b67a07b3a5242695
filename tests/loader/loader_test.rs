use std::sync::Arc;

use crate::utils::{TEST_PREFIX, column, pids, put_object, seeded_loader};
use expected_counts::{ExpectedError, StorageConfig, StorageLocation, TableKind, TableLoader};
use object_store::memory::InMemory;

/// Every table kind is fetched under `<prefix><study>-<kind>.tsv`
#[tokio::test]
async fn test_loads_all_five_tables() -> expected_counts::Result<()> {
    let loader = seeded_loader(
        "OSA01",
        &[
            (TableKind::Case, "case_id\tbreed\nC1\tPug\n"),
            (TableKind::Demographic, "participant_id\tsex\nC1\tF\n"),
            (TableKind::Diagnosis, "case_record_id\tdisease_term\nC1\tOsteosarcoma\n"),
            (TableKind::Sample, "sample_id\tcase_submitter_id\nS1\tC1\n"),
            (TableKind::File, "file_id\tsample_id\nF1\tS1\n"),
        ],
    )
    .await;

    let tables = loader.load_tables("OSA01").await?;
    assert_eq!(tables.present_count(), 5);
    for kind in TableKind::ALL {
        let table = tables.get(kind);
        assert_eq!(table.num_rows(), 1, "{kind} rows");
    }

    assert_eq!(pids(tables.case.batch()), vec!["C1"]);
    assert_eq!(pids(tables.demographic.batch()), vec!["C1"]);
    assert_eq!(pids(tables.diagnosis.batch()), vec!["C1"]);
    assert_eq!(pids(tables.sample.batch()), vec!["C1"]);
    // no participant reference on the file table
    assert!(!tables.file.has_pid());
    Ok(())
}

/// Missing and undecodable objects become absent tables without failing the load
#[tokio::test]
async fn test_failures_are_isolated_per_table() -> expected_counts::Result<()> {
    let store = Arc::new(InMemory::new());
    put_object(&store, "tsv/OSA02-case.tsv", b"case_id\nC1\nC2\n").await;
    put_object(&store, "tsv/OSA02-diagnosis.tsv", &[0xff, 0xfe, b'\t', 0x00, b'\n', 0xc3]).await;
    put_object(&store, "tsv/OSA02-file.tsv", b"file_id\nF1\tEXTRA\n").await;
    let loader = TableLoader::new(store, TEST_PREFIX);

    let tables = loader.load_tables("OSA02").await?;
    assert!(tables.case.is_present());
    assert_eq!(tables.case.num_rows(), 2);
    assert!(!tables.demographic.is_present());
    assert!(!tables.diagnosis.is_present());
    assert!(!tables.sample.is_present());
    assert!(!tables.file.is_present());
    assert!(tables.file.is_empty());
    Ok(())
}

/// Another study's objects are never picked up
#[tokio::test]
async fn test_study_scoping() -> expected_counts::Result<()> {
    let loader = seeded_loader("OSA03", &[(TableKind::Case, "case_id\nC1\n")]).await;
    let tables = loader.load_tables("OSA04").await?;
    assert_eq!(tables.present_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_study_is_rejected() {
    let loader = seeded_loader("OSA05", &[]).await;
    let result = loader.load_tables("").await;
    assert!(matches!(result, Err(ExpectedError::InvalidRequest(_))));
}

/// Empty strings survive loading as values
#[tokio::test]
async fn test_empty_fields_are_values() -> expected_counts::Result<()> {
    let loader = seeded_loader(
        "OSA06",
        &[(TableKind::File, "uuid\tsample.sample_id\nU1\t\nU2\tS1\n")],
    )
    .await;
    let tables = loader.load_tables("OSA06").await?;
    assert_eq!(
        column(tables.file.batch(), "sample.sample_id"),
        vec![Some(String::new()), Some("S1".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn test_loader_from_memory_config() -> expected_counts::Result<()> {
    let config = StorageConfig {
        location: StorageLocation::Memory,
        prefix: "data/".to_string(),
    };
    let loader = TableLoader::from_config(&config)?;
    assert_eq!(loader.object_key("OSA07", TableKind::Sample), "data/OSA07-sample.tsv");
    let tables = loader.load_tables("OSA07").await?;
    assert_eq!(tables.present_count(), 0);
    Ok(())
}
