//! Participant-level filtering
//!
//! Starts from the case table (or the demographic table when the case table
//! is unusable), brings in demographic attributes, then narrows by breed,
//! sex and disease term, in that order.

pub mod core;
pub mod error;
pub mod join;

use std::fmt;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::schema::{DEMOGRAPHIC_ATTRIBUTES, DISEASE_TERM_CANDIDATES, PID_COLUMN, has_column, resolve_column};
use crate::table::{Table, TableSet};
use crate::utils::{empty_batch, membership_mask, string_column};

pub use self::core::{AndFilter, BatchFilter, PidSemiJoinFilter, ValueSetFilter, filter_record_batch};
pub use self::join::left_join_by_pid;

/// The recognized filter names of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterName {
    Breed,
    Sex,
    DiseaseTerm,
}

impl FilterName {
    /// Filters in application order
    pub const ALL: [Self; 3] = [Self::Breed, Self::Sex, Self::DiseaseTerm];

    /// Key used in request `filters` objects
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Breed => "Breed",
            Self::Sex => "Sex",
            Self::DiseaseTerm => "Diagnosis.disease_term",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.key() == key)
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Accepted values per filter; an absent entry means "do not filter"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    breed: Option<FxHashSet<String>>,
    sex: Option<FxHashSet<String>>,
    disease_term: Option<FxHashSet<String>>,
}

impl FilterSet {
    /// Parse a request `filters` object
    ///
    /// Unknown keys are ignored. Values are stringified: strings verbatim,
    /// numbers as their JSON text, booleans as `True` / `False`. A lone
    /// scalar counts as a one-element list.
    pub fn from_json(filters: &Map<String, Value>) -> Result<Self> {
        let mut set = Self::default();
        for (key, value) in filters {
            let Some(name) = FilterName::from_key(key) else {
                log::debug!("Ignoring unrecognized filter '{key}'");
                continue;
            };
            let values = match value {
                Value::Array(items) => items
                    .iter()
                    .map(|item| stringify(key, item))
                    .collect::<Result<FxHashSet<_>>>()?,
                scalar => FxHashSet::from_iter([stringify(key, scalar)?]),
            };
            *set.slot_mut(name) = Some(values);
        }
        Ok(set)
    }

    /// Add or replace the accepted values of one filter
    #[must_use]
    pub fn with<I, S>(mut self, name: FilterName, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.slot_mut(name) = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Accepted values of one filter, if it was requested
    #[must_use]
    pub const fn get(&self, name: FilterName) -> Option<&FxHashSet<String>> {
        match name {
            FilterName::Breed => self.breed.as_ref(),
            FilterName::Sex => self.sex.as_ref(),
            FilterName::DiseaseTerm => self.disease_term.as_ref(),
        }
    }

    /// Whether no filter was requested
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.breed.is_none() && self.sex.is_none() && self.disease_term.is_none()
    }

    fn slot_mut(&mut self, name: FilterName) -> &mut Option<FxHashSet<String>> {
        match name {
            FilterName::Breed => &mut self.breed,
            FilterName::Sex => &mut self.sex,
            FilterName::DiseaseTerm => &mut self.disease_term,
        }
    }
}

fn stringify(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(true) => Ok("True".to_string()),
        Value::Bool(false) => Ok("False".to_string()),
        other => error::invalid_filter_value(key, other),
    }
}

/// Pick the participant-level base table
///
/// The case table wins when it carries `pid` and has rows; otherwise the
/// demographic table under the same condition.
#[must_use]
pub fn select_base(tables: &TableSet) -> Option<&Table> {
    [&tables.case, &tables.demographic]
        .into_iter()
        .find(|table| table.has_pid() && !table.is_empty())
}

/// Compute the filtered participant table
///
/// Never fails for missing tables or columns: without a usable base table
/// the result is an empty batch, and a filter whose column or auxiliary
/// table is missing is skipped.
pub fn apply_filters(tables: &TableSet, filters: &FilterSet) -> Result<RecordBatch> {
    let Some(base) = select_base(tables) else {
        log::debug!("No participant-level base table; result is empty");
        return Ok(empty_batch());
    };
    log::debug!("Using {} table as base ({} rows)", base.kind(), base.num_rows());

    let enriched = enrich_with_demographics(base.batch(), &tables.demographic)?;
    let chain = build_chain(tables, filters)?;
    let filtered = chain.filter(&enriched)?;

    log::debug!(
        "Applied {} filters: {} of {} rows kept",
        chain.len(),
        filtered.num_rows(),
        enriched.num_rows()
    );
    Ok(filtered)
}

fn enrich_with_demographics(base: &RecordBatch, demographic: &Table) -> Result<RecordBatch> {
    if !demographic.has_pid() {
        return Ok(base.clone());
    }

    let to_bring: Vec<&str> = DEMOGRAPHIC_ATTRIBUTES
        .iter()
        .copied()
        .filter(|c| has_column(demographic.batch(), c) && !has_column(base, c))
        .collect();
    if to_bring.is_empty() {
        return Ok(base.clone());
    }

    log::debug!("Joining {to_bring:?} from demographic table");
    left_join_by_pid(base, demographic.batch(), &to_bring)
}

fn build_chain(tables: &TableSet, filters: &FilterSet) -> Result<AndFilter> {
    let mut chain: Vec<Arc<dyn BatchFilter + Send + Sync>> = Vec::new();

    if let Some(values) = filters.get(FilterName::Breed) {
        chain.push(Arc::new(ValueSetFilter::new("breed", values.clone())));
    }
    if let Some(values) = filters.get(FilterName::Sex) {
        chain.push(Arc::new(ValueSetFilter::new("sex", values.clone())));
    }
    if let Some(terms) = filters.get(FilterName::DiseaseTerm) {
        if let Some(keep_pids) = diagnosed_pids(&tables.diagnosis, terms)? {
            chain.push(Arc::new(PidSemiJoinFilter::new(keep_pids)));
        }
    }

    Ok(AndFilter::new(chain))
}

/// `pid`s of diagnosis rows whose disease term is one of `terms`
///
/// `None` when the diagnosis table has no `pid` or no disease-term column.
fn diagnosed_pids(diagnosis: &Table, terms: &FxHashSet<String>) -> Result<Option<FxHashSet<String>>> {
    if !diagnosis.has_pid() {
        log::debug!("Diagnosis table unusable; skipping disease-term filter");
        return Ok(None);
    }
    let batch = diagnosis.batch();
    let Some(term_column) = resolve_column(batch, DISEASE_TERM_CANDIDATES) else {
        log::debug!("No disease-term column in diagnosis table; skipping filter");
        return Ok(None);
    };

    let (Some(term), Some(pid)) = (string_column(batch, term_column)?, string_column(batch, PID_COLUMN)?)
    else {
        return Ok(None);
    };
    let mask = membership_mask(term, terms);
    let keep = pid
        .iter()
        .zip(mask.values().iter())
        .filter_map(|(pid, matched)| if matched { pid.map(str::to_string) } else { None })
        .collect();
    Ok(Some(keep))
}
