//! Ordered column-name candidates, most specific first.

/// Participant/case identity across case, demographic and diagnosis tables
pub const PID_CANDIDATES: &[&str] = &[
    "case_record_id",
    "case.case_record_id",
    "participant_id",
    "case_id",
    "submitter_id",
    "id",
];

/// Participant reference carried on sample rows
pub const SAMPLE_PID_CANDIDATES: &[&str] = &[
    "case_record_id",
    "case.case_record_id",
    "participant_id",
    "case_id",
    "submitter_id",
    "id",
    "case_submitter_id",
    "case.submitter_id",
];

/// Participant reference carried on file rows
pub const FILE_PID_CANDIDATES: &[&str] = SAMPLE_PID_CANDIDATES;

/// Sample primary identifiers
pub const SAMPLE_ID_CANDIDATES: &[&str] = &["sample_id", "aliquot_id", "sample_submitter_id", "id"];

/// File primary identifiers
pub const FILE_ID_CANDIDATES: &[&str] = &[
    "uuid",
    "file_id",
    "object_id",
    "file_submitter_id",
    "file_name",
    "id",
];

/// Columns linking a file row to a sample
pub const FILE_SAMPLE_FK_CANDIDATES: &[&str] = &["sample.sample_id", "sample_id"];

/// Disease term on diagnosis rows
pub const DISEASE_TERM_CANDIDATES: &[&str] = &["disease_term", "primary_diagnosis", "diagnosis"];

/// Human-facing participant identifier, falling back to `pid`
pub const DISPLAY_ID_CANDIDATES: &[&str] = &[
    "case_record_id",
    "case.case_record_id",
    "participant_id",
    "pid",
];

/// Demographic attributes joined onto the base table when it lacks them
pub const DEMOGRAPHIC_ATTRIBUTES: &[&str] = &["breed", "sex"];

/// Maximum number of identifiers returned in a payload
pub const ID_LIST_CAP: usize = 2000;
