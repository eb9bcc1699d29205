use super::atom::{Atom, AtomRole};
use super::chain::{Chain, ChainType};
use super::ids::{AtomIndex, ChainIndex, ResidueIndex};
use super::residue::{Residue, ResidueClass, Ring};
use super::topology::{Bond, BondOrder};
use crate::core::chemistry::elements::Element;
use crate::core::utils::identifiers::infer_atom_role;
use nalgebra::Point3;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SYSTEM_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of one state of a [`MolecularSystem`].
///
/// Two keys compare equal only if they come from the same system object and no
/// mutation happened in between, which makes the key safe to use for caching
/// derived data such as the valence model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemKey {
    pub id: u64,
    pub generation: u64,
}

/// Represents a complete molecular system with atoms, residues, chains, bonds
/// and perceived rings, spread over one or more models.
///
/// Atoms, residues and chains live in dense vectors so their indices are plain
/// `usize` values. The contact engine only ever reads a system.
#[derive(Debug)]
pub struct MolecularSystem {
    id: u64,
    generation: u64,
    atoms: Vec<Atom>,
    residues: Vec<Residue>,
    chains: Vec<Chain>,
    bonds: Vec<Bond>,
    /// Lookup map for chains by model index and chain identifier.
    chain_index_map: HashMap<(usize, char), ChainIndex>,
    /// Lookup map for residues by chain index and residue number.
    residue_index_map: HashMap<(ChainIndex, isize), ResidueIndex>,
    /// Bonded neighbours with bond order, indexed by atom.
    bond_adjacency: Vec<Vec<(AtomIndex, BondOrder)>>,
}

impl Default for MolecularSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MolecularSystem {
    /// Clones the contents under a fresh identity, so caches never confuse the
    /// copy with the original once either side is mutated.
    fn clone(&self) -> Self {
        Self {
            id: NEXT_SYSTEM_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            atoms: self.atoms.clone(),
            residues: self.residues.clone(),
            chains: self.chains.clone(),
            bonds: self.bonds.clone(),
            chain_index_map: self.chain_index_map.clone(),
            residue_index_map: self.residue_index_map.clone(),
            bond_adjacency: self.bond_adjacency.clone(),
        }
    }
}

impl MolecularSystem {
    /// Creates a new, empty molecular system with a unique identity.
    pub fn new() -> Self {
        Self {
            id: NEXT_SYSTEM_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            atoms: Vec::new(),
            residues: Vec::new(),
            chains: Vec::new(),
            bonds: Vec::new(),
            chain_index_map: HashMap::new(),
            residue_index_map: HashMap::new(),
            bond_adjacency: Vec::new(),
        }
    }

    pub fn key(&self) -> SystemKey {
        SystemKey {
            id: self.id,
            generation: self.generation,
        }
    }

    fn touch(&mut self) {
        self.generation += 1;
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn atom(&self, index: AtomIndex) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Mutable access to an atom. Invalidates the current [`SystemKey`].
    pub fn atom_mut(&mut self, index: AtomIndex) -> Option<&mut Atom> {
        if index < self.atoms.len() {
            self.touch();
        }
        self.atoms.get_mut(index)
    }

    pub fn residues(&self) -> &[Residue] {
        &self.residues
    }

    pub fn residue(&self, index: ResidueIndex) -> Option<&Residue> {
        self.residues.get(index)
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn chain(&self, index: ChainIndex) -> Option<&Chain> {
        self.chains.get(index)
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn find_chain(&self, model_index: usize, id: char) -> Option<ChainIndex> {
        self.chain_index_map.get(&(model_index, id)).copied()
    }

    pub fn find_residue(&self, chain_index: ChainIndex, number: isize) -> Option<ResidueIndex> {
        self.residue_index_map.get(&(chain_index, number)).copied()
    }

    /// Adds a new chain to a model or returns the existing one.
    ///
    /// This method is idempotent; a chain with the same model index and
    /// identifier is returned without creating a duplicate.
    pub fn add_chain(&mut self, model_index: usize, id: char, chain_type: ChainType) -> ChainIndex {
        if let Some(&existing) = self.chain_index_map.get(&(model_index, id)) {
            return existing;
        }
        let index = self.chains.len();
        self.chains.push(Chain::new(id, chain_type, model_index));
        self.chain_index_map.insert((model_index, id), index);
        self.touch();
        index
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// Returns `None` if the chain does not exist.
    pub fn add_residue(
        &mut self,
        chain_index: ChainIndex,
        number: isize,
        name: &str,
    ) -> Option<ResidueIndex> {
        if chain_index >= self.chains.len() {
            return None;
        }
        if let Some(&existing) = self.residue_index_map.get(&(chain_index, number)) {
            return Some(existing);
        }

        let index = self.residues.len();
        self.residues.push(Residue::new(number, name, chain_index));
        self.residue_index_map.insert((chain_index, number), index);
        self.chains[chain_index].residues.push(index);
        self.touch();
        Some(index)
    }

    /// Adds an atom to a residue, overwriting its `residue_index`. An atom
    /// still carrying [`AtomRole::Other`] gets a role inferred from the residue
    /// and atom names.
    ///
    /// Returns `None` if the residue does not exist.
    pub fn add_atom_to_residue(
        &mut self,
        residue_index: ResidueIndex,
        mut atom: Atom,
    ) -> Option<AtomIndex> {
        let residue = self.residues.get_mut(residue_index)?;
        let index = self.atoms.len();
        atom.residue_index = residue_index;
        if atom.role == AtomRole::Other {
            atom.role = infer_atom_role(&residue.name, &atom.name);
        }
        residue.add_atom(&atom.name, index);
        self.atoms.push(atom);
        self.bond_adjacency.push(Vec::new());
        self.touch();
        Some(index)
    }

    /// Adds a bond between two atoms.
    ///
    /// Idempotent for an existing bond. Returns `None` if either atom does not
    /// exist or both indices are the same.
    pub fn add_bond(&mut self, atom1: AtomIndex, atom2: AtomIndex, order: BondOrder) -> Option<()> {
        if atom1 >= self.atoms.len() || atom2 >= self.atoms.len() || atom1 == atom2 {
            return None;
        }
        if self.connected(atom1, atom2) {
            return Some(());
        }

        self.bonds.push(Bond::new(atom1, atom2, order));
        self.bond_adjacency[atom1].push((atom2, order));
        self.bond_adjacency[atom2].push((atom1, order));
        self.touch();
        Some(())
    }

    /// Registers a ring perceived on a residue. Aromatic rings flag their member
    /// atoms as aromatic.
    ///
    /// Returns `None` if the residue does not exist, the ring is empty, or any
    /// member atom belongs to another residue.
    pub fn add_ring(
        &mut self,
        residue_index: ResidueIndex,
        atoms: &[AtomIndex],
        aromatic: bool,
    ) -> Option<()> {
        if atoms.is_empty() {
            return None;
        }
        for &atom in atoms {
            if self.atoms.get(atom)?.residue_index != residue_index {
                return None;
            }
        }
        let residue = self.residues.get_mut(residue_index)?;
        residue.rings.push(Ring {
            atoms: atoms.to_vec(),
            aromatic,
        });
        if aromatic {
            for &atom in atoms {
                self.atoms[atom].aromatic = true;
            }
        }
        self.touch();
        Some(())
    }

    /// Bonded neighbours of an atom together with the bond order. Empty for an
    /// unknown index.
    pub fn bonded(&self, atom: AtomIndex) -> &[(AtomIndex, BondOrder)] {
        self.bond_adjacency
            .get(atom)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn neighbors(&self, atom: AtomIndex) -> impl Iterator<Item = AtomIndex> + '_ {
        self.bonded(atom).iter().map(|&(n, _)| n)
    }

    pub fn heavy_neighbors(&self, atom: AtomIndex) -> impl Iterator<Item = AtomIndex> + '_ {
        self.neighbors(atom).filter(|&n| !self.atoms[n].is_hydrogen())
    }

    pub fn bond_count(&self, atom: AtomIndex) -> usize {
        self.bonded(atom).len()
    }

    /// Number of bonded neighbours of the given element.
    pub fn bond_to_element_count(&self, atom: AtomIndex, element: Element) -> usize {
        self.neighbors(atom)
            .filter(|&n| self.atoms[n].element == element)
            .count()
    }

    pub fn connected(&self, atom1: AtomIndex, atom2: AtomIndex) -> bool {
        self.bonded(atom1).iter().any(|&(n, _)| n == atom2)
    }

    pub fn element(&self, atom: AtomIndex) -> Element {
        self.atoms[atom].element
    }

    pub fn position(&self, atom: AtomIndex) -> Point3<f64> {
        self.atoms[atom].position
    }

    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    pub fn residue_of(&self, atom: AtomIndex) -> &Residue {
        &self.residues[self.atoms[atom].residue_index]
    }

    pub fn residue_index_of(&self, atom: AtomIndex) -> ResidueIndex {
        self.atoms[atom].residue_index
    }

    pub fn residue_name(&self, atom: AtomIndex) -> &str {
        &self.residue_of(atom).name
    }

    pub fn residue_class(&self, atom: AtomIndex) -> ResidueClass {
        self.residue_of(atom).class
    }

    pub fn model_index(&self, atom: AtomIndex) -> usize {
        self.chains[self.residue_of(atom).chain_index].model_index
    }

    pub fn altloc(&self, atom: AtomIndex) -> Option<char> {
        self.atoms[atom].altloc
    }

    pub fn is_metal(&self, atom: AtomIndex) -> bool {
        self.atoms[atom].element.is_metal()
    }

    pub fn is_halogen(&self, atom: AtomIndex) -> bool {
        self.atoms[atom].element.is_halogen()
    }

    pub fn is_hydrogen(&self, atom: AtomIndex) -> bool {
        self.atoms[atom].is_hydrogen()
    }

    pub fn is_aromatic(&self, atom: AtomIndex) -> bool {
        self.atoms[atom].aromatic
    }

    pub fn is_backbone(&self, atom: AtomIndex) -> bool {
        self.atoms[atom].role == AtomRole::Backbone
    }

    pub fn is_sidechain(&self, atom: AtomIndex) -> bool {
        self.atoms[atom].role == AtomRole::Sidechain
    }

    pub fn is_water(&self, atom: AtomIndex) -> bool {
        self.atoms[atom].role == AtomRole::Water || self.residue_class(atom) == ResidueClass::Water
    }

    /// True if any ring of the atom's residue contains the atom.
    pub fn in_ring(&self, atom: AtomIndex) -> bool {
        self.residue_of(atom)
            .rings
            .iter()
            .any(|ring| ring.atoms.contains(&atom))
    }

    /// Human readable atom label, e.g. `[LYS]12:A.NZ`.
    pub fn qualified_name(&self, atom: AtomIndex) -> String {
        let a = &self.atoms[atom];
        let residue = &self.residues[a.residue_index];
        let chain = &self.chains[residue.chain_index];
        match a.altloc {
            Some(alt) => format!(
                "[{}]{}:{}.{}%{}",
                residue.name, residue.number, chain.id, a.name, alt
            ),
            None => format!("[{}]{}:{}.{}", residue.name, residue.number, chain.id, a.name),
        }
    }
}
