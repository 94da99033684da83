//! Stateless data models shared across the library.
//!
//! - [`composition`] - Element-to-amount mappings and reduced formulas
//! - [`elements`] - Static per-element chemical data
//! - [`ids`] - Materials-database entry identifiers
//! - [`entry`] - Ungrouped structure entries as supplied by the caller
//! - [`structure_group`] - The deduplicated structure-group document
//! - [`simulation`] - Labeled all-atom simulation systems

pub mod composition;
pub mod elements;
pub mod entry;
pub mod ids;
pub mod simulation;
pub mod structure_group;
