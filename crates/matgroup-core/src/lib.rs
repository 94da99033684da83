//! # matgroup Core Library
//!
//! A library for condensing raw materials-database structure entries into
//! deduplicated structure-group documents, and for reconstructing fully
//! labeled classical-simulation systems for solvation-shell analysis.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict dependency direction,
//! so that the pure data handling stays independently testable:
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`Composition`, `StructureEntry`, `StructureGroupDoc`,
//!   `SimulationSystem`), the generic equivalence-class grouping algorithms,
//!   the pairwise structure-matching seam, and file I/O utilities.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties the models and algorithms together into complete procedures:
//!   building structure-group documents from ungrouped entries, and
//!   assembling solvation-analysis inputs from labeled simulation systems.
//!
//! Structure matching itself (geometric lattice/site alignment) is treated
//! as an external capability behind the [`core::matcher::StructureMatcher`]
//! trait; this crate orchestrates around it but never reimplements it.

pub mod core;
pub mod workflows;
