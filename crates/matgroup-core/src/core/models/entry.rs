use super::composition::Composition;
use super::ids::EntryId;
use serde::{Deserialize, Serialize};

/// An ungrouped structure entry as supplied by the caller.
///
/// The structure payload `S` is opaque to this crate: it is only ever handed
/// to the pairwise fit predicate, so it can be a full crystal structure from
/// an external backend, a composition, or anything else the configured
/// matcher understands. Entries are never mutated by the grouping machinery;
/// derived values such as framework tags are kept in auxiliary tables on the
/// side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureEntry<S> {
    /// Database identifier of this entry.
    pub entry_id: EntryId,
    /// Full elemental composition, including any ignorable species.
    pub composition: Composition,
    /// Opaque structural payload consumed by the fit predicate.
    pub structure: S,
}

impl<S> StructureEntry<S> {
    pub fn new(entry_id: impl Into<EntryId>, composition: Composition, structure: S) -> Self {
        Self {
            entry_id: entry_id.into(),
            composition,
            structure,
        }
    }
}
