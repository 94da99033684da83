//! Deduplication of ungrouped structure entries into group documents.
//!
//! Entries are first partitioned by an exact key, the framework formula,
//! which needs no predicate calls and is transitive by construction. Only
//! within each framework bucket does the O(n²) pairwise fit test run, which
//! bounds the expensive comparisons to entries that could plausibly match.

use crate::core::grouping::group_by_scan;
use crate::core::matcher::StructureMatcher;
use crate::core::models::entry::StructureEntry;
use crate::core::models::structure_group::{
    GroupDocError, IGNORED_FRAMEWORK, StructureGroupDoc, framework_formula,
};
use crate::workflows::progress::{Progress, ProgressReporter};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum GroupingError {
    #[error(
        "Grouped documents cover {grouped} entries but {supplied} were supplied; \
         something is seriously wrong, rebuild the collection and check whether \
         the problem persists"
    )]
    CountMismatch { grouped: usize, supplied: usize },

    #[error(transparent)]
    Document(#[from] GroupDocError),
}

/// Groups ungrouped structure entries into deduplicated documents.
///
/// Entries are bucketed by framework formula (the composition minus the
/// ignored species), entries made entirely of ignored species fall into one
/// catch-all document without structure matching, and every other bucket is
/// sub-grouped with the supplied pairwise matcher. Input entries are never
/// mutated; the derived framework tags live in an auxiliary table for the
/// duration of the call.
///
/// Documents are returned in deterministic order: buckets sorted by
/// framework formula, sub-groups in first-appearance order.
///
/// # Errors
///
/// Fails on malformed entry ids, and with [`GroupingError::CountMismatch`]
/// when the grouped documents do not cover the input exactly. The latter
/// signals a logic error or data corruption and is not recoverable.
pub fn build_structure_groups<S, M>(
    entries: &[StructureEntry<S>],
    matcher: &M,
    ignored_species: &[String],
    reporter: &ProgressReporter,
) -> Result<Vec<StructureGroupDoc>, GroupingError>
where
    M: StructureMatcher<S>,
{
    reporter.report(Progress::PhaseStart { name: "Grouping" });

    let frameworks: Vec<String> = entries
        .iter()
        .map(|entry| framework_formula(&entry.composition, ignored_species))
        .collect();

    let mut buckets: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (index, framework) in frameworks.iter().enumerate() {
        buckets.entry(framework.as_str()).or_default().push(index);
    }

    let mut documents = Vec::new();
    let mut grouped_count = 0;
    for (framework, indices) in &buckets {
        let members: Vec<&StructureEntry<S>> = indices.iter().map(|&i| &entries[i]).collect();
        reporter.report(Progress::BucketStart {
            framework: framework.to_string(),
            entries: members.len(),
        });

        let mut bucket_docs = Vec::new();
        if *framework == IGNORED_FRAMEWORK {
            // Entries with nothing left after removing the ignored species
            // form one group; a structural fit between bare ion frameworks
            // would be meaningless.
            bucket_docs.push(StructureGroupDoc::from_grouped_entries(
                &members,
                ignored_species,
                false,
            )?);
        } else {
            debug!(
                "Performing structure matching for {} with {} entries",
                framework,
                members.len()
            );
            let labels = group_by_scan(&members, |a, b| matcher.fit(&a.structure, &b.structure));
            let mut by_label: BTreeMap<usize, Vec<&StructureEntry<S>>> = BTreeMap::new();
            for (member, label) in members.iter().zip(&labels) {
                by_label.entry(*label).or_default().push(*member);
            }
            for group in by_label.values() {
                bucket_docs.push(StructureGroupDoc::from_grouped_entries(
                    group,
                    ignored_species,
                    true,
                )?);
            }
        }

        grouped_count += bucket_docs
            .iter()
            .map(|doc| doc.grouped_ids.len())
            .sum::<usize>();
        reporter.report(Progress::BucketFinish {
            documents: bucket_docs.len(),
        });
        documents.extend(bucket_docs);
    }

    verify_member_counts(&documents, entries.len())?;
    reporter.report(Progress::PhaseFinish);
    Ok(documents)
}

/// Checks that the documents' member lists cover exactly `supplied` entries.
///
/// Run unconditionally at the end of [`build_structure_groups`]; exposed so
/// callers that post-process documents can re-validate them.
pub fn verify_member_counts(
    documents: &[StructureGroupDoc],
    supplied: usize,
) -> Result<(), GroupingError> {
    let grouped: usize = documents.iter().map(|doc| doc.grouped_ids.len()).sum();
    if grouped != supplied {
        return Err(GroupingError::CountMismatch { grouped, supplied });
    }
    Ok(())
}
