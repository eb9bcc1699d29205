use super::{FeatureType, Features};
use crate::core::chemistry::elements::Element;
use crate::core::chemistry::valence::ValenceModel;
use crate::core::models::ids::AtomIndex;
use crate::core::models::system::MolecularSystem;

/// Ring nitrogen of a histidine. Both imidazole nitrogens count as donor and
/// acceptor because their protonation is ambiguous.
pub fn is_histidine_nitrogen(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.element(atom) == Element::N && system.residue_name(atom) == "HIS" && system.in_ring(atom)
}

pub(super) fn add_hydrogen_acceptors(features: &mut Features, system: &MolecularSystem, valence: &ValenceModel) {
    for (a, atom) in system.atoms().iter().enumerate() {
        let accepts = match atom.element {
            Element::O => true,
            Element::N if is_histidine_nitrogen(system, a) => true,
            Element::N if valence.charge[a] < 1 => {
                // needs a lone pair that is not used for bonding
                let total_bonds = system.bond_count(a) + valence.implicit_h[a].max(0) as usize;
                valence.ideal_geometry[a]
                    .coordination()
                    .filter(|&full| full <= 4)
                    .is_some_and(|full| total_bonds < full)
            }
            Element::S => {
                matches!(system.residue_name(a), "CYS" | "MET") || atom.formal_charge == -1
            }
            _ => false,
        };
        if accepts {
            features.push_atom(system, FeatureType::HydrogenAcceptor, a);
        }
    }
}

pub(super) fn add_hydrogen_donors(features: &mut Features, system: &MolecularSystem, valence: &ValenceModel) {
    for (a, atom) in system.atoms().iter().enumerate() {
        let donates = is_histidine_nitrogen(system, a)
            || (valence.total_h[a] > 0 && matches!(atom.element, Element::N | Element::O | Element::S));
        if donates {
            features.push_atom(system, FeatureType::HydrogenDonor, a);
        }
    }
}

/// Aromatic atom sitting in a ring of its residue that contains N or O.
fn in_aromatic_ring_with_electronegative_element(system: &MolecularSystem, atom: AtomIndex) -> bool {
    if !system.is_aromatic(atom) {
        return false;
    }
    system
        .residue_of(atom)
        .rings()
        .iter()
        .filter(|ring| ring.atoms.contains(&atom))
        .any(|ring| {
            ring.atoms
                .iter()
                .any(|&r| matches!(system.element(r), Element::N | Element::O))
        })
}

pub(super) fn add_weak_hydrogen_donors(features: &mut Features, system: &MolecularSystem, valence: &ValenceModel) {
    for (a, atom) in system.atoms().iter().enumerate() {
        if atom.element == Element::C
            && valence.total_h[a] > 0
            && (system.bond_to_element_count(a, Element::N) > 0
                || system.bond_to_element_count(a, Element::O) > 0
                || in_aromatic_ring_with_electronegative_element(system, a))
        {
            features.push_atom(system, FeatureType::WeakHydrogenDonor, a);
        }
    }
}
