//! Typed interaction participants ("features") perceived from a structure.
//!
//! A feature is a group of one or more atoms acting as a single partner in a
//! non-covalent interaction: a carboxylate, an aromatic ring, a lone donor
//! atom. Features are stored column-wise in [`Features`] and addressed by a
//! dense [`FeatureIndex`]. The first atom of a feature is its representative,
//! used for identity and validity checks.

mod charged;
mod halogen;
mod hbond;
mod hydrophobic;
mod metal;

pub use hbond::is_histidine_nitrogen;
pub use metal::IONIC_TYPE_METALS;

use crate::core::chemistry::valence::ValenceModel;
use crate::core::models::ids::{AtomIndex, FeatureIndex};
use crate::core::models::system::MolecularSystem;
use nalgebra::{Point3, Vector3};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureType {
    PositiveCharge,
    NegativeCharge,
    AromaticRing,
    HydrogenDonor,
    HydrogenAcceptor,
    HalogenDonor,
    HalogenAcceptor,
    Hydrophobic,
    WeakHydrogenDonor,
    IonicTypePartner,
    DativeBondPartner,
    TransitionMetal,
    IonicTypeMetal,
}

/// Functional group a feature was derived from, when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FeatureGroup {
    #[default]
    Unknown,
    QuaternaryAmine,
    TertiaryAmine,
    Sulfonium,
    SulfonicAcid,
    Sulfate,
    Phosphate,
    Halocarbon,
    Guanidine,
    Acetamidine,
    Carboxylate,
}

/// Scratch value collecting the atoms of one feature before it is pushed.
#[derive(Debug, Clone)]
pub struct FeatureBuilder {
    feature_type: FeatureType,
    group: FeatureGroup,
    sum: Vector3<f64>,
    atoms: Vec<AtomIndex>,
}

impl FeatureBuilder {
    pub fn new(feature_type: FeatureType) -> Self {
        Self {
            feature_type,
            group: FeatureGroup::Unknown,
            sum: Vector3::zeros(),
            atoms: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: FeatureGroup) -> Self {
        self.group = group;
        self
    }

    pub fn add_atom(&mut self, system: &MolecularSystem, atom: AtomIndex) {
        self.sum += system.position(atom).coords;
        self.atoms.push(atom);
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

/// Column-wise feature storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Features {
    types: Vec<FeatureType>,
    groups: Vec<FeatureGroup>,
    centers: Vec<Point3<f64>>,
    atom_sets: Vec<Vec<AtomIndex>>,
}

impl Features {
    pub fn new() -> Self {
        Self::default()
    }

    /// Perceives all features of `system` in a fixed family order, which fixes
    /// the feature indices for a given structure.
    #[instrument(skip_all, name = "feature_extraction")]
    pub fn extract(system: &MolecularSystem, valence: &ValenceModel) -> Self {
        let mut features = Self::new();
        charged::add_positive_charges(&mut features, system, valence);
        charged::add_negative_charges(&mut features, system, valence);
        charged::add_aromatic_rings(&mut features, system);
        hbond::add_hydrogen_acceptors(&mut features, system, valence);
        hbond::add_hydrogen_donors(&mut features, system, valence);
        hbond::add_weak_hydrogen_donors(&mut features, system, valence);
        metal::add_metal_binding(&mut features, system);
        metal::add_metals(&mut features, system);
        hydrophobic::add_hydrophobic(&mut features, system);
        halogen::add_halogen_acceptors(&mut features, system);
        halogen::add_halogen_donors(&mut features, system);
        debug!(features = features.len(), "Feature extraction complete.");
        features
    }

    /// Finalizes a builder. Builders without atoms are dropped and yield `None`.
    pub fn push(&mut self, builder: FeatureBuilder) -> Option<FeatureIndex> {
        if builder.is_empty() {
            return None;
        }
        let index = self.types.len();
        let n = builder.atoms.len() as f64;
        self.types.push(builder.feature_type);
        self.groups.push(builder.group);
        self.centers.push(Point3::from(builder.sum / n));
        self.atom_sets.push(builder.atoms);
        Some(index)
    }

    /// Pushes a feature consisting of a single atom.
    pub fn push_atom(&mut self, system: &MolecularSystem, feature_type: FeatureType, atom: AtomIndex) -> FeatureIndex {
        let mut builder = FeatureBuilder::new(feature_type);
        builder.add_atom(system, atom);
        let index = self.types.len();
        self.push(builder);
        index
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn feature_type(&self, index: FeatureIndex) -> FeatureType {
        self.types[index]
    }

    pub fn group(&self, index: FeatureIndex) -> FeatureGroup {
        self.groups[index]
    }

    pub fn center(&self, index: FeatureIndex) -> &Point3<f64> {
        &self.centers[index]
    }

    pub fn atoms(&self, index: FeatureIndex) -> &[AtomIndex] {
        &self.atom_sets[index]
    }

    /// First member atom of the feature.
    pub fn representative(&self, index: FeatureIndex) -> AtomIndex {
        self.atom_sets[index][0]
    }

    pub fn types(&self) -> &[FeatureType] {
        &self.types
    }

    pub fn centers(&self) -> &[Point3<f64>] {
        &self.centers
    }

    /// Indices of all features of the given type, ascending.
    pub fn indices_of(&self, feature_type: FeatureType) -> impl Iterator<Item = FeatureIndex> + '_ {
        self.types
            .iter()
            .enumerate()
            .filter(move |(_, t)| **t == feature_type)
            .map(|(i, _)| i)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Mol;
    use super::*;
    use crate::core::chemistry::elements::Element;

    #[test]
    fn push_drops_empty_builders_and_averages_centers() {
        let mut mol = Mol::new();
        let res = mol.residue("LIG");
        let a = mol.atom(res, "O1", Element::O, [0.0, 0.0, 0.0]);
        let b = mol.atom(res, "O2", Element::O, [2.0, 4.0, -2.0]);

        let mut features = Features::new();
        assert_eq!(features.push(FeatureBuilder::new(FeatureType::NegativeCharge)), None);
        assert!(features.is_empty());

        let mut builder = FeatureBuilder::new(FeatureType::NegativeCharge).with_group(FeatureGroup::Carboxylate);
        builder.add_atom(&mol.system, a);
        builder.add_atom(&mol.system, b);
        assert_eq!(features.push(builder), Some(0));
        assert_eq!(features.center(0), &Point3::new(1.0, 2.0, -1.0));
        assert_eq!(features.atoms(0), &[a, b]);
        assert_eq!(features.representative(0), a);
        assert_eq!(features.group(0), FeatureGroup::Carboxylate);

        let single = features.push_atom(&mol.system, FeatureType::HydrogenAcceptor, b);
        assert_eq!(single, 1);
        assert_eq!(features.group(1), FeatureGroup::Unknown);
        assert_eq!(features.indices_of(FeatureType::HydrogenAcceptor).collect::<Vec<_>>(), vec![1]);
    }
}
