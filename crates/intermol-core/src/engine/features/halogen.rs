use super::{FeatureBuilder, FeatureGroup, FeatureType, Features};
use crate::core::chemistry::elements::Element;
use crate::core::chemistry::functional_groups::is_halocarbon;
use crate::core::models::system::MolecularSystem;

/// Halogens heavy enough to show a sigma hole. Fluorine never donates.
const HALOGEN_BOND_ELEMENTS: [Element; 4] = [Element::CL, Element::BR, Element::I, Element::AT];

/// N, O or S bonded to C, N, P or S.
pub(super) fn add_halogen_acceptors(features: &mut Features, system: &MolecularSystem) {
    for (atom, a) in system.atoms().iter().enumerate() {
        if !matches!(a.element, Element::N | Element::O | Element::S) {
            continue;
        }
        let anchored = system
            .neighbors(atom)
            .any(|n| matches!(system.element(n), Element::C | Element::N | Element::P | Element::S));
        if anchored {
            features.push_atom(system, FeatureType::HalogenAcceptor, atom);
        }
    }
}

/// Cl, Br, I or At bonded to exactly one carbon.
pub(super) fn add_halogen_donors(features: &mut Features, system: &MolecularSystem) {
    for (atom, a) in system.atoms().iter().enumerate() {
        if HALOGEN_BOND_ELEMENTS.contains(&a.element) && system.bond_to_element_count(atom, Element::C) == 1 {
            let group = if is_halocarbon(system, atom) {
                FeatureGroup::Halocarbon
            } else {
                FeatureGroup::Unknown
            };
            let mut builder = FeatureBuilder::new(FeatureType::HalogenDonor).with_group(group);
            builder.add_atom(system, atom);
            features.push(builder);
        }
    }
}
