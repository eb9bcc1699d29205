use super::{FeatureType, Features};
use crate::core::chemistry::elements::Element;
use crate::core::models::system::MolecularSystem;

/// Carbon bonded only to carbon or hydrogen, and any fluorine.
pub(super) fn add_hydrophobic(features: &mut Features, system: &MolecularSystem) {
    for (atom, a) in system.atoms().iter().enumerate() {
        let hydrophobic = match a.element {
            Element::C => system
                .neighbors(atom)
                .all(|n| matches!(system.element(n), Element::C | Element::H)),
            Element::F => true,
            _ => false,
        };
        if hydrophobic {
            features.push_atom(system, FeatureType::Hydrophobic, atom);
        }
    }
}
