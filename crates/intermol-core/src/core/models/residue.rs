use super::ids::{AtomIndex, ChainIndex};
use crate::core::utils::identifiers::classify_residue;
use std::collections::HashMap;

/// Coarse residue classification that drives residue-specific perception rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueClass {
    AminoAcid,  // Standard amino acid
    Nucleotide, // Standard DNA/RNA nucleotide
    Water,      // Solvent water
    Other,      // Ligands, ions and anything non-standard
}

impl ResidueClass {
    pub fn is_polymer(&self) -> bool {
        matches!(self, ResidueClass::AminoAcid | ResidueClass::Nucleotide)
    }
}

/// A ring reported by ring perception for one residue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    pub atoms: Vec<AtomIndex>, // Ring members in ring order
    pub aromatic: bool,        // Planar aromatic ring
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                           // Residue sequence number from source
    pub name: String,                            // Name of the residue (e.g., "ARG", "HEM")
    pub class: ResidueClass,                     // Classification derived from the name
    pub chain_index: ChainIndex,                 // Index of the parent chain
    pub(crate) atoms: Vec<AtomIndex>,            // Atoms belonging to this residue
    pub(crate) rings: Vec<Ring>,                 // Perceived rings
    atom_name_map: HashMap<String, AtomIndex>,   // Atom name to index
}

impl Residue {
    pub(crate) fn new(number: isize, name: &str, chain_index: ChainIndex) -> Self {
        Self {
            number,
            name: name.to_string(),
            class: classify_residue(name),
            chain_index,
            atoms: Vec::new(),
            rings: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_index: AtomIndex) {
        self.atoms.push(atom_index);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_insert(atom_index);
    }

    pub fn atoms(&self) -> &[AtomIndex] {
        &self.atoms
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn aromatic_rings(&self) -> impl Iterator<Item = &Ring> {
        self.rings.iter().filter(|ring| ring.aromatic)
    }

    /// Returns the first atom added under `name`.
    pub fn atom_index_by_name(&self, name: &str) -> Option<AtomIndex> {
        self.atom_name_map.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_residue_initializes_fields_correctly() {
        let residue = Residue::new(10, "GLY", 3);
        assert_eq!(residue.number, 10);
        assert_eq!(residue.name, "GLY");
        assert_eq!(residue.class, ResidueClass::AminoAcid);
        assert_eq!(residue.chain_index, 3);
        assert!(residue.atoms().is_empty());
        assert!(residue.rings().is_empty());
        assert!(residue.atom_index_by_name("CA").is_none());
    }

    #[test]
    fn class_follows_residue_name() {
        assert_eq!(Residue::new(1, "DT", 0).class, ResidueClass::Nucleotide);
        assert_eq!(Residue::new(1, "HOH", 0).class, ResidueClass::Water);
        assert_eq!(Residue::new(1, "NAG", 0).class, ResidueClass::Other);
        assert!(ResidueClass::Nucleotide.is_polymer());
        assert!(!ResidueClass::Other.is_polymer());
    }

    #[test]
    fn add_atom_keeps_first_index_for_duplicate_names() {
        let mut residue = Residue::new(5, "SER", 0);
        residue.add_atom("OG", 7);
        residue.add_atom("OG", 9);
        assert_eq!(residue.atoms(), &[7, 9]);
        assert_eq!(residue.atom_index_by_name("OG"), Some(7));
    }

    #[test]
    fn aromatic_rings_filters_non_aromatic_rings() {
        let mut residue = Residue::new(1, "LIG", 0);
        residue.rings.push(Ring {
            atoms: vec![0, 1, 2, 3, 4, 5],
            aromatic: true,
        });
        residue.rings.push(Ring {
            atoms: vec![6, 7, 8, 9, 10],
            aromatic: false,
        });
        assert_eq!(residue.aromatic_rings().count(), 1);
    }
}
