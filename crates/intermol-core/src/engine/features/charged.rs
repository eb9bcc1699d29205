use super::{FeatureBuilder, FeatureGroup, FeatureType, Features};
use crate::core::chemistry::elements::Element;
use crate::core::chemistry::functional_groups::{
    is_acetamidine, is_carboxylate, is_guanidine, is_phosphate, is_quaternary_amine, is_sulfate, is_sulfonic_acid,
    is_sulfonium,
};
use crate::core::chemistry::valence::ValenceModel;
use crate::core::models::ids::AtomIndex;
use crate::core::models::residue::ResidueClass;
use crate::core::models::system::MolecularSystem;
use std::collections::HashSet;

const POSITIVELY_CHARGED: [&str; 3] = ["ARG", "HIS", "LYS"];
const NEGATIVELY_CHARGED: [&str; 2] = ["GLU", "ASP"];

/// Adds one feature from the `member` atoms bonded to `center` and marks them
/// as claimed.
fn add_group(
    features: &mut Features,
    system: &MolecularSystem,
    mut builder: FeatureBuilder,
    center: AtomIndex,
    member: Element,
    claimed: &mut HashSet<AtomIndex>,
) {
    for n in system.neighbors(center) {
        if system.element(n) == member {
            claimed.insert(n);
            builder.add_atom(system, n);
        }
    }
    features.push(builder);
}

fn add_sidechain_feature(
    features: &mut Features,
    system: &MolecularSystem,
    atoms: &[AtomIndex],
    feature_type: FeatureType,
    element: Element,
) {
    let mut builder = FeatureBuilder::new(feature_type);
    for &a in atoms {
        if system.element(a) == element && system.is_sidechain(a) {
            builder.add_atom(system, a);
        }
    }
    features.push(builder);
}

pub(super) fn add_positive_charges(features: &mut Features, system: &MolecularSystem, valence: &ValenceModel) {
    let mut claimed = HashSet::new();
    for residue in system.residues() {
        if POSITIVELY_CHARGED.contains(&residue.name.as_str()) {
            add_sidechain_feature(features, system, residue.atoms(), FeatureType::PositiveCharge, Element::N);
        } else if !residue.class.is_polymer() {
            for &a in residue.atoms() {
                let group = if is_guanidine(system, a) {
                    FeatureGroup::Guanidine
                } else if is_acetamidine(system, a) {
                    FeatureGroup::Acetamidine
                } else {
                    continue;
                };
                let builder = FeatureBuilder::new(FeatureType::PositiveCharge).with_group(group);
                add_group(features, system, builder, a, Element::N, &mut claimed);
            }
            for &a in residue.atoms() {
                if valence.charge[a] > 0 && !claimed.contains(&a) {
                    let group = if is_quaternary_amine(system, a) {
                        FeatureGroup::QuaternaryAmine
                    } else if is_sulfonium(system, a) {
                        FeatureGroup::Sulfonium
                    } else {
                        FeatureGroup::Unknown
                    };
                    let mut builder = FeatureBuilder::new(FeatureType::PositiveCharge).with_group(group);
                    builder.add_atom(system, a);
                    features.push(builder);
                }
            }
        }
    }
}

pub(super) fn add_negative_charges(features: &mut Features, system: &MolecularSystem, valence: &ValenceModel) {
    let mut claimed = HashSet::new();
    for residue in system.residues() {
        if NEGATIVELY_CHARGED.contains(&residue.name.as_str()) {
            add_sidechain_feature(features, system, residue.atoms(), FeatureType::NegativeCharge, Element::O);
        } else if residue.class == ResidueClass::Nucleotide {
            for &a in residue.atoms() {
                if is_phosphate(system, a) {
                    let builder = FeatureBuilder::new(FeatureType::NegativeCharge).with_group(FeatureGroup::Phosphate);
                    add_group(features, system, builder, a, Element::O, &mut claimed);
                }
            }
        } else if residue.class != ResidueClass::AminoAcid {
            for &a in residue.atoms() {
                let group = if is_sulfonic_acid(system, a) {
                    FeatureGroup::SulfonicAcid
                } else if is_phosphate(system, a) {
                    FeatureGroup::Phosphate
                } else if is_sulfate(system, a) {
                    FeatureGroup::Sulfate
                } else if is_carboxylate(system, a) {
                    FeatureGroup::Carboxylate
                } else {
                    continue;
                };
                let builder = FeatureBuilder::new(FeatureType::NegativeCharge).with_group(group);
                add_group(features, system, builder, a, Element::O, &mut claimed);
            }
            for &a in residue.atoms() {
                if valence.charge[a] < 0 && !claimed.contains(&a) {
                    features.push_atom(system, FeatureType::NegativeCharge, a);
                }
            }
        }
    }
}

pub(super) fn add_aromatic_rings(features: &mut Features, system: &MolecularSystem) {
    for residue in system.residues() {
        for ring in residue.aromatic_rings() {
            let mut builder = FeatureBuilder::new(FeatureType::AromaticRing);
            for &a in &ring.atoms {
                builder.add_atom(system, a);
            }
            features.push(builder);
        }
    }
}
