use super::composition::{Composition, chemical_system};
use super::entry::StructureEntry;
use super::ids::{EntryId, EntryIdError, numerically_smallest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Framework tag for entries whose composition is exhausted by the ignored
/// species. Such entries end up in a single catch-all group that never goes
/// through structure matching.
pub const IGNORED_FRAMEWORK: &str = "ignored";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GroupDocError {
    #[error("Cannot summarize an empty entry group")]
    EmptyGroup,

    #[error(transparent)]
    EntryId(#[from] EntryIdError),
}

/// Returns the framework formula of a composition: its reduced formula after
/// removing the ignored species, or [`IGNORED_FRAMEWORK`] when no element
/// survives the removal.
pub fn framework_formula(composition: &Composition, ignored_species: &[String]) -> String {
    let framework = composition.without(ignored_species);
    if framework.is_empty() {
        IGNORED_FRAMEWORK.to_string()
    } else {
        framework.reduced_formula()
    }
}

/// A deduplicated group of structure entries.
///
/// One document summarizes a set of entries judged equivalent, either by the
/// pairwise structure matcher or by falling into the all-ignored catch-all
/// bucket. The document carries enough derived chemistry (framework formula,
/// chemical system, composition diversity) to be queried without revisiting
/// the member entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureGroupDoc {
    /// Combined id of the group: the member id with the numerically smallest
    /// trailing integer.
    pub material_id: EntryId,

    /// Ids of all entries grouped into this document.
    pub grouped_ids: Vec<EntryId>,

    /// True when structure matching was performed to form this group. False
    /// only for the catch-all group of entries made entirely of ignored
    /// species.
    pub structure_matched: bool,

    /// True when the members span more than one reduced formula.
    pub has_distinct_compositions: bool,

    /// Reduced formula of the framework, the members' composition without
    /// the ignored species.
    pub framework_formula: String,

    /// The ignored species, sorted.
    pub ignored_species: Vec<String>,

    /// Chemical system of the group: every element seen in any member plus
    /// the ignored species, sorted and hyphen-joined.
    pub chemsys: String,

    /// Timestamp of when this document was built.
    pub last_updated: DateTime<Utc>,
}

impl StructureGroupDoc {
    /// Summarizes a slice of entries that is already known to belong
    /// together.
    ///
    /// The framework formula is derived from the first member, which is
    /// representative by construction since grouping never crosses framework
    /// boundaries.
    ///
    /// # Errors
    ///
    /// Fails on an empty slice or on a member id without a parseable
    /// trailing integer.
    pub fn from_grouped_entries<S>(
        entries: &[&StructureEntry<S>],
        ignored_species: &[String],
        structure_matched: bool,
    ) -> Result<Self, GroupDocError> {
        let first = *entries.first().ok_or(GroupDocError::EmptyGroup)?;

        let mut all_atoms: BTreeSet<String> = BTreeSet::new();
        let mut all_formulas: BTreeSet<String> = BTreeSet::new();
        for entry in entries {
            all_atoms.extend(entry.composition.elements().map(str::to_string));
            all_formulas.insert(entry.composition.reduced_formula());
        }

        let ids: Vec<EntryId> = entries.iter().map(|e| e.entry_id.clone()).collect();
        let lowest_id = numerically_smallest(&ids)
            .map_err(GroupDocError::from)?
            .ok_or(GroupDocError::EmptyGroup)?
            .clone();

        let mut sorted_ignored = ignored_species.to_vec();
        sorted_ignored.sort();

        Ok(Self {
            material_id: lowest_id,
            grouped_ids: ids,
            structure_matched,
            has_distinct_compositions: all_formulas.len() > 1,
            framework_formula: framework_formula(&first.composition, ignored_species),
            chemsys: chemical_system(all_atoms.iter().map(String::as_str).chain(
                sorted_ignored.iter().map(String::as_str),
            )),
            ignored_species: sorted_ignored,
            last_updated: Utc::now(),
        })
    }
}
