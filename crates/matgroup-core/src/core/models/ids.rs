use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EntryIdError {
    #[error("Entry id '{0}' must be either a number or of the form prefix-<number>")]
    Malformed(String),
}

/// A materials-database entry identifier.
///
/// Identifiers arrive either as bare integers or as strings carrying a
/// database prefix and a trailing number, such as `"mp-149"`. The trailing
/// number is what makes ids comparable across the two shapes; everything
/// before the final hyphen is opaque.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Tagged(String),
}

impl EntryId {
    /// Returns the numeric key used to compare ids.
    ///
    /// # Errors
    ///
    /// Returns [`EntryIdError::Malformed`] when a tagged id does not end in
    /// an integer after its final hyphen.
    pub fn sort_key(&self) -> Result<i64, EntryIdError> {
        match self {
            EntryId::Number(n) => Ok(*n),
            EntryId::Tagged(s) => s
                .rsplit('-')
                .next()
                .and_then(|tail| tail.parse::<i64>().ok())
                .ok_or_else(|| EntryIdError::Malformed(s.clone())),
        }
    }
}

/// Picks the id with the numerically smallest trailing integer; the first
/// such id wins on ties. Returns `None` for an empty slice.
///
/// # Errors
///
/// Fails on the first malformed id encountered.
pub fn numerically_smallest(ids: &[EntryId]) -> Result<Option<&EntryId>, EntryIdError> {
    let mut best: Option<(&EntryId, i64)> = None;
    for id in ids {
        let key = id.sort_key()?;
        if best.is_none_or(|(_, best_key)| key < best_key) {
            best = Some((id, key));
        }
    }
    Ok(best.map(|(id, _)| id))
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryId::Number(n) => write!(f, "{}", n),
            EntryId::Tagged(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for EntryId {
    fn from(n: i64) -> Self {
        EntryId::Number(n)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        EntryId::Tagged(s.to_string())
    }
}
