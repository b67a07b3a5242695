use crate::utils::table_set;
use expected_counts::aggregate::filtered_sample_count;
use expected_counts::models::{StatBar, Stats};
use expected_counts::{FilterName, FilterSet, Result, TableKind, apply_filters, build_expected_payload};
use rustc_hash::FxHashSet;

fn pid_set(values: &[&str]) -> FxHashSet<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Samples are counted by distinct sample id among kept participants
#[test]
fn test_sample_count_is_distinct() -> Result<()> {
    let tables = table_set(&[(
        TableKind::Sample,
        "case_id\tsample_id\nP1\tS1\nP1\tS2\nP2\tS3\nP1\tS1\n",
    )])?;
    assert_eq!(filtered_sample_count(&tables.sample, &pid_set(&["P1"]))?, 2);
    assert_eq!(filtered_sample_count(&tables.sample, &FxHashSet::default())?, 0);
    Ok(())
}

/// Files split into case files and study files through the sample table
#[test]
fn test_file_split_through_samples() -> Result<()> {
    let tables = table_set(&[
        (TableKind::Case, "case_id\nP1\nP2\n"),
        (TableKind::Sample, "case_id\tsample_id\nP1\tS1\nP2\tS2\n"),
        (TableKind::File, "file_id\tsample_id\nF1\tS1\nF2\t\nF3\tS9\n"),
    ])?;
    let filters = FilterSet::default();
    let filtered = apply_filters(&tables, &filters)?;
    let payload = build_expected_payload(&tables, &filtered)?;

    assert_eq!(payload.stats.case_files, 1);
    assert_eq!(payload.stats.study_files, 1);
    assert_eq!(payload.stats.files, payload.stats.case_files);
    Ok(())
}

/// Full payload for a filtered study
#[test]
fn test_payload_for_filtered_participants() -> Result<()> {
    let tables = table_set(&[
        (
            TableKind::Case,
            "case_record_id\tbreed\nDOG-2\tBoxer\nDOG-1\tBoxer\nDOG-3\tPug\n",
        ),
        (
            TableKind::Sample,
            "case.case_record_id\tsample_id\nDOG-1\tS1\nDOG-1\tS2\nDOG-2\tS3\nDOG-3\tS4\n",
        ),
        (
            TableKind::File,
            "uuid\tsample.sample_id\nU1\tS1\nU2\tS2\nU2\tS2\nU3\tS4\nU4\t\nU5\t\n",
        ),
    ])?;
    let filters = FilterSet::default().with(FilterName::Breed, ["Boxer"]);
    let filtered = apply_filters(&tables, &filters)?;
    let payload = build_expected_payload(&tables, &filtered)?;

    assert_eq!(payload.count, 2);
    assert_eq!(payload.ids, vec!["DOG-1", "DOG-2"]);
    assert_eq!(
        payload.stats,
        Stats {
            participants: 2,
            samples: 3,
            files: 2,
            case_files: 2,
            study_files: 2,
        }
    );
    assert_eq!(
        payload.stat_bar,
        StatBar {
            participants: 2,
            samples: 3,
            studies: 1,
        }
    );
    Ok(())
}

/// Identifiers fall back to `pid` when no display column exists
#[test]
fn test_ids_fall_back_to_pid() -> Result<()> {
    let tables = table_set(&[(TableKind::Case, "submitter_id\nB\nA\nB\n")])?;
    let filtered = apply_filters(&tables, &FilterSet::default())?;
    let payload = build_expected_payload(&tables, &filtered)?;
    assert_eq!(payload.ids, vec!["A", "B"]);
    assert_eq!(payload.count, 2);
    Ok(())
}

/// A study with no tables has all-zero counts
#[test]
fn test_empty_study_payload() -> Result<()> {
    let tables = table_set(&[])?;
    let filtered = apply_filters(&tables, &FilterSet::default())?;
    let payload = build_expected_payload(&tables, &filtered)?;

    assert_eq!(payload.count, 0);
    assert!(payload.ids.is_empty());
    assert_eq!(payload.stats, Stats::default());
    assert_eq!(payload.stat_bar.studies, 1);
    assert_eq!(payload.stat_bar.participants, 0);
    Ok(())
}

/// Without a sample link column neither file bucket is counted
#[test]
fn test_files_without_fk_column() -> Result<()> {
    let tables = table_set(&[
        (TableKind::Case, "case_id\nP1\n"),
        (TableKind::Sample, "case_id\tsample_id\nP1\tS1\n"),
        (TableKind::File, "file_id\tfile_name\nF1\ta.bam\nF2\tb.bam\n"),
    ])?;
    let filtered = apply_filters(&tables, &FilterSet::default())?;
    let payload = build_expected_payload(&tables, &filtered)?;
    assert_eq!(payload.stats.case_files, 0);
    assert_eq!(payload.stats.study_files, 0);
    assert_eq!(payload.stats.samples, 1);
    Ok(())
}
