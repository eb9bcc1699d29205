use super::ids::ResidueIndex;
use crate::core::chemistry::elements::Element;
use nalgebra::Point3;
use std::str::FromStr;

/// Represents the role or classification of an atom within a molecular structure.
///
/// Contact detection uses the role to tell backbone hydrogen bonds and water
/// bridges apart from ordinary ones, and to decide which atoms of a standard
/// residue may coordinate a metal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum AtomRole {
    /// Backbone atom of a polymer (e.g., N, CA, C, O of a protein; phosphate and sugar of a nucleotide).
    Backbone,
    /// Sidechain or nucleobase atom attached to the backbone.
    Sidechain,
    /// Atom of a small molecule bound to the structure.
    Ligand,
    /// Atom of a solvent water molecule.
    Water,
    /// Unknown or unclassified atom role.
    #[default]
    Other,
}

/// An atom of a [`MolecularSystem`](super::system::MolecularSystem).
///
/// Only the attributes that chemical perception and contact detection read are
/// stored: identity, element, coordinates, formal charge and the alternate
/// location indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "NZ", "O2").
    pub name: String,
    /// The chemical element.
    pub element: Element,
    /// Index of the parent residue.
    pub residue_index: ResidueIndex,
    /// The role of the atom in the molecular structure.
    pub role: AtomRole,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Formal charge as recorded in the input structure.
    pub formal_charge: i8,
    /// Alternate location code, `None` when the atom has a single conformation.
    pub altloc: Option<char>,
    /// Set when the atom belongs to an aromatic ring.
    pub aromatic: bool,
}

impl Atom {
    /// Creates a new `Atom` with neutral charge, no alternate location and the
    /// default role.
    ///
    /// The residue index is overwritten when the atom is added to a system.
    pub fn new(name: &str, element: Element, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            element,
            residue_index: 0,
            role: AtomRole::default(),
            position,
            formal_charge: 0,
            altloc: None,
            aromatic: false,
        }
    }

    pub fn with_role(mut self, role: AtomRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_formal_charge(mut self, charge: i8) -> Self {
        self.formal_charge = charge;
        self
    }

    pub fn with_altloc(mut self, altloc: char) -> Self {
        self.altloc = Some(altloc);
        self
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        self.element.is_hydrogen()
    }
}

impl FromStr for AtomRole {
    type Err = ();

    /// Parses a string into an `AtomRole`, case-insensitively. Accepts the common
    /// spellings "side-chain" and "side_chain".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backbone" => Ok(AtomRole::Backbone),
            "sidechain" | "side-chain" | "side_chain" => Ok(AtomRole::Sidechain),
            "ligand" => Ok(AtomRole::Ligand),
            "water" => Ok(AtomRole::Water),
            "other" | "unknown" => Ok(AtomRole::Other),
            _ => Err(()),
        }
    }
}
