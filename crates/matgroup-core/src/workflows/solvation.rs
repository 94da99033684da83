//! Solvation-analysis input assembly over labeled simulation systems.
//!
//! The numerical solvation analysis itself (RDF integration, coordination,
//! speciation, networking statistics) is the business of an external engine.
//! What lives here is the orchestration around it: deciding which species is
//! the solute, which species count as networking counter-ions, and packaging
//! the atom selections and shell radii the engine needs.

use crate::core::models::simulation::SimulationSystem;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Net residue charge above which a species is considered cationic, and
/// below whose negation it is considered anionic. Intentionally loose so
/// rounding in stored partial charges does not misclassify neutral species.
pub const ION_CHARGE_THRESHOLD: f64 = 0.01;

/// Shell radius used when the RDF kernel cannot find a solvation cutoff.
pub const DEFAULT_FALLBACK_RADIUS: f64 = 3.0;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum SolvationError {
    #[error("Multiple cationic species detected ({0:?}), not yet supported")]
    AmbiguousSolute(Vec<String>),

    #[error("No cationic species detected, cannot identify a solute")]
    NoSolute,

    #[error("Residue name '{0}' selects no atoms in the system")]
    UnknownResidue(String),
}

/// Identifies the solute species: the single cationic residue name.
///
/// # Errors
///
/// Fails when no residue is cationic, and fails fast with
/// [`SolvationError::AmbiguousSolute`] when more than one distinct cationic
/// species is present rather than guessing between them.
pub fn identify_solute(system: &SimulationSystem) -> Result<String, SolvationError> {
    let names = charged_resnames(system, |charge| charge > ION_CHARGE_THRESHOLD);
    match names.len() {
        0 => Err(SolvationError::NoSolute),
        1 => Ok(names.into_iter().next().unwrap_or_default()),
        _ => Err(SolvationError::AmbiguousSolute(names)),
    }
}

/// Identifies the networking counter-ions: all distinct anionic residue
/// names, sorted.
pub fn identify_networking_solvents(system: &SimulationSystem) -> Vec<String> {
    charged_resnames(system, |charge| charge < -ION_CHARGE_THRESHOLD)
}

fn charged_resnames<F>(system: &SimulationSystem, is_charged: F) -> Vec<String>
where
    F: Fn(f64) -> bool,
{
    let names: std::collections::BTreeSet<&str> = system
        .residues()
        .iter()
        .filter(|residue| is_charged(system.residue_charge(residue)))
        .map(|residue| residue.name.as_str())
        .collect();
    names.into_iter().map(str::to_string).collect()
}

/// Resolves a solvation-shell cutoff radius from an RDF curve.
///
/// The kernel is the externally supplied peak detector; when it finds no
/// usable cutoff (or returns a non-finite one), the fallback radius is used
/// instead.
pub fn shell_cutoff<F>(bins: &[f64], rdf: &[f64], kernel: F, fallback_radius: f64) -> f64
where
    F: Fn(&[f64], &[f64]) -> Option<f64>,
{
    match kernel(bins, rdf).filter(|radius| radius.is_finite()) {
        Some(radius) => radius,
        None => {
            debug!(
                "RDF kernel found no cutoff, falling back to {} A",
                fallback_radius
            );
            fallback_radius
        }
    }
}

/// Assembled input for an external solvation-analysis engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Solute {
    /// Residue name of the solute species.
    pub solute_name: String,
    /// Flat indices of every solute atom.
    pub solute_atoms: Vec<usize>,
    /// Per-residue-name atom selections over the whole system. The solute's
    /// own selection is included, mirroring the upstream convention of
    /// treating every species as a potential solvent.
    pub solvents: BTreeMap<String, Vec<usize>>,
    /// Species whose shell occupancy defines ion pairing and networking.
    pub networking_solvents: Option<Vec<String>>,
    /// Radius used whenever the RDF kernel fails for a solute-solvent pair.
    pub fallback_radius: f64,
}

/// Builds the solvation-analysis input for the given solute species.
///
/// # Errors
///
/// Fails when the solute name, or any networking solvent name, selects no
/// atoms.
pub fn build_solute(
    system: &SimulationSystem,
    solute_name: &str,
    networking_solvents: Option<Vec<String>>,
    fallback_radius: Option<f64>,
) -> Result<Solute, SolvationError> {
    let solute_atoms = system.select_atoms_by_resname(solute_name);
    if solute_atoms.is_empty() {
        return Err(SolvationError::UnknownResidue(solute_name.to_string()));
    }
    if let Some(names) = &networking_solvents {
        for name in names {
            if system.select_atoms_by_resname(name).is_empty() {
                return Err(SolvationError::UnknownResidue(name.clone()));
            }
        }
    }

    let solvents: BTreeMap<String, Vec<usize>> = system
        .unique_resnames()
        .into_iter()
        .map(|name| {
            let atoms = system.select_atoms_by_resname(&name);
            (name, atoms)
        })
        .collect();

    Ok(Solute {
        solute_name: solute_name.to_string(),
        solute_atoms,
        solvents,
        networking_solvents,
        fallback_radius: fallback_radius.unwrap_or(DEFAULT_FALLBACK_RADIUS),
    })
}
