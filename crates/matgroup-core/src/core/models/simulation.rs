use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum SystemBuildError {
    #[error("Molecule spec '{0}' has no atoms")]
    EmptyMolecule(String),

    #[error("Molecule spec '{0}' has a non-positive charge scaling factor")]
    InvalidChargeScaling(String),

    #[error("Molecule spec '{0}' conflicts with an earlier spec of the same name")]
    ConflictingSpec(String),
}

/// One molecular species in a parameterized simulation, as produced by the
/// upstream parameterization step.
///
/// `partial_charges` are the per-atom charges as stored in the force field,
/// possibly scaled; `charge_scaling` is the factor they were scaled by, so
/// physical charges are recovered by division.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeSpec {
    /// Residue name this species is labeled with (e.g. "Li+", "EC").
    pub name: String,
    /// Number of copies of this molecule in the system.
    pub count: usize,
    /// Factor the stored partial charges were scaled by.
    pub charge_scaling: f64,
    /// Stored per-atom partial charges; the length defines the atom count.
    pub partial_charges: Vec<f64>,
}

impl MoleculeSpec {
    pub fn n_atoms(&self) -> usize {
        self.partial_charges.len()
    }
}

/// One molecule instance inside a [`SimulationSystem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Residue {
    /// Residue name, shared by every instance of the same species.
    pub name: String,
    /// Indices of this residue's atoms in the flat per-atom arrays.
    pub atoms: Range<usize>,
}

/// A fully labeled all-atom simulation system.
///
/// Rebuilt from molecule specs rather than parsed from a trajectory: the
/// per-atom arrays carry exactly the labels solvation analysis needs (atom
/// type ids, residue names, unscaled partial charges), in the atom order
/// implied by the spec sequence.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationSystem {
    atom_types: Vec<usize>,
    resnames: Vec<String>,
    charges: Vec<f64>,
    residues: Vec<Residue>,
}

impl SimulationSystem {
    /// Assembles the labeled system from an ordered list of molecule specs.
    ///
    /// Atom type ids are assigned per distinct species name in
    /// first-appearance order: each species claims a contiguous id range of
    /// its atom count, and every instance of the species reuses that range.
    /// Charges are unscaled by each spec's scaling factor during assembly.
    ///
    /// # Errors
    ///
    /// Rejects specs with no atoms, a non-positive charge scaling factor, or
    /// a name reused with a different atom count or charges.
    pub fn from_specs(specs: &[MoleculeSpec]) -> Result<Self, SystemBuildError> {
        let mut type_offsets: HashMap<&str, (usize, &MoleculeSpec)> = HashMap::new();
        let mut next_offset = 0;
        for spec in specs {
            if spec.partial_charges.is_empty() {
                return Err(SystemBuildError::EmptyMolecule(spec.name.clone()));
            }
            if spec.charge_scaling <= 0.0 {
                return Err(SystemBuildError::InvalidChargeScaling(spec.name.clone()));
            }
            match type_offsets.get(spec.name.as_str()) {
                None => {
                    type_offsets.insert(spec.name.as_str(), (next_offset, spec));
                    next_offset += spec.n_atoms();
                }
                Some((_, earlier)) => {
                    if earlier.partial_charges != spec.partial_charges
                        || earlier.charge_scaling != spec.charge_scaling
                    {
                        return Err(SystemBuildError::ConflictingSpec(spec.name.clone()));
                    }
                }
            }
        }

        let mut system = SimulationSystem::default();
        for spec in specs {
            let (offset, _) = type_offsets[spec.name.as_str()];
            for _ in 0..spec.count {
                let start = system.atom_types.len();
                system.atom_types.extend(offset..offset + spec.n_atoms());
                system
                    .resnames
                    .extend(std::iter::repeat_n(spec.name.clone(), spec.n_atoms()));
                system
                    .charges
                    .extend(spec.partial_charges.iter().map(|q| q / spec.charge_scaling));
                system.residues.push(Residue {
                    name: spec.name.clone(),
                    atoms: start..start + spec.n_atoms(),
                });
            }
        }
        Ok(system)
    }

    pub fn n_atoms(&self) -> usize {
        self.atom_types.len()
    }

    pub fn n_residues(&self) -> usize {
        self.residues.len()
    }

    pub fn atom_types(&self) -> &[usize] {
        &self.atom_types
    }

    pub fn resnames(&self) -> &[String] {
        &self.resnames
    }

    /// Unscaled per-atom partial charges, in elementary charge units.
    pub fn charges(&self) -> &[f64] {
        &self.charges
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    /// Net charge of a residue: the sum of its atoms' unscaled charges.
    pub fn residue_charge(&self, residue: &Residue) -> f64 {
        self.charges[residue.atoms.clone()].iter().sum()
    }

    /// Distinct residue names present in the system, sorted.
    pub fn unique_resnames(&self) -> Vec<String> {
        let set: std::collections::BTreeSet<&str> =
            self.residues.iter().map(|r| r.name.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Indices of every atom belonging to a residue with the given name.
    pub fn select_atoms_by_resname(&self, name: &str) -> Vec<usize> {
        self.residues
            .iter()
            .filter(|r| r.name == name)
            .flat_map(|r| r.atoms.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, count: usize, scaling: f64, charges: &[f64]) -> MoleculeSpec {
        MoleculeSpec {
            name: name.to_string(),
            count,
            charge_scaling: scaling,
            partial_charges: charges.to_vec(),
        }
    }

    fn electrolyte() -> Vec<MoleculeSpec> {
        vec![
            spec("Li+", 2, 0.8, &[0.8]),
            spec("PF6-", 2, 0.8, &[-0.2, -0.1, -0.1, -0.1, -0.1, -0.1, -0.1]),
            spec("EC", 1, 1.0, &[0.1, -0.1, 0.0]),
        ]
    }

    #[test]
    fn atom_types_assign_a_distinct_id_range_per_species() {
        let system = SimulationSystem::from_specs(&electrolyte()).unwrap();
        // Li+ claims [0, 1), PF6- claims [1, 8), EC claims [8, 11).
        assert_eq!(&system.atom_types()[..2], &[0, 0]);
        assert_eq!(&system.atom_types()[2..9], &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(&system.atom_types()[16..], &[8, 9, 10]);
        assert_eq!(system.n_atoms(), 2 + 14 + 3);
    }

    #[test]
    fn resnames_repeat_per_instance() {
        let system = SimulationSystem::from_specs(&electrolyte()).unwrap();
        assert_eq!(system.resnames()[0], "Li+");
        assert_eq!(system.resnames()[1], "Li+");
        assert_eq!(system.resnames()[2], "PF6-");
        assert_eq!(system.resnames()[16], "EC");
        assert_eq!(system.n_residues(), 5);
    }

    #[test]
    fn charges_are_unscaled_during_assembly() {
        let system = SimulationSystem::from_specs(&electrolyte()).unwrap();
        assert!((system.charges()[0] - 1.0).abs() < 1e-12);
        assert!((system.charges()[2] - (-0.25)).abs() < 1e-12);
        // EC was not scaled.
        assert!((system.charges()[16] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn residue_charge_sums_member_atoms() {
        let system = SimulationSystem::from_specs(&electrolyte()).unwrap();
        let residues = system.residues();
        assert!((system.residue_charge(&residues[0]) - 1.0).abs() < 1e-12);
        assert!((system.residue_charge(&residues[2]) - (-1.0)).abs() < 1e-9);
        assert!(system.residue_charge(&residues[4]).abs() < 1e-12);
    }

    #[test]
    fn unique_resnames_and_selection_cover_all_instances() {
        let system = SimulationSystem::from_specs(&electrolyte()).unwrap();
        assert_eq!(system.unique_resnames(), vec!["EC", "Li+", "PF6-"]);
        assert_eq!(system.select_atoms_by_resname("Li+"), vec![0, 1]);
        assert_eq!(system.select_atoms_by_resname("EC"), vec![16, 17, 18]);
        assert!(system.select_atoms_by_resname("H2O").is_empty());
    }

    #[test]
    fn repeated_spec_of_the_same_species_reuses_the_type_range() {
        let specs = vec![
            spec("Li+", 1, 1.0, &[1.0]),
            spec("EC", 1, 1.0, &[0.0, 0.0]),
            spec("Li+", 1, 1.0, &[1.0]),
        ];
        let system = SimulationSystem::from_specs(&specs).unwrap();
        assert_eq!(system.atom_types(), &[0, 1, 2, 0]);
    }

    #[test]
    fn conflicting_respecification_is_rejected() {
        let specs = vec![spec("Li+", 1, 1.0, &[1.0]), spec("Li+", 1, 1.0, &[0.9])];
        assert_eq!(
            SimulationSystem::from_specs(&specs),
            Err(SystemBuildError::ConflictingSpec("Li+".to_string()))
        );
    }

    #[test]
    fn degenerate_specs_are_rejected() {
        assert_eq!(
            SimulationSystem::from_specs(&[spec("X", 1, 1.0, &[])]),
            Err(SystemBuildError::EmptyMolecule("X".to_string()))
        );
        assert_eq!(
            SimulationSystem::from_specs(&[spec("X", 1, 0.0, &[0.1])]),
            Err(SystemBuildError::InvalidChargeScaling("X".to_string()))
        );
    }

    #[test]
    fn zero_count_species_contribute_nothing() {
        let specs = vec![spec("Li+", 0, 1.0, &[1.0]), spec("EC", 1, 1.0, &[0.0])];
        let system = SimulationSystem::from_specs(&specs).unwrap();
        assert_eq!(system.n_residues(), 1);
        // The absent species still reserved its type id range.
        assert_eq!(system.atom_types(), &[1]);
    }
}
