use super::{FeatureType, Features};
use crate::core::chemistry::elements::Element;
use crate::core::models::ids::AtomIndex;
use crate::core::models::residue::ResidueClass;
use crate::core::models::system::MolecularSystem;

/// Atomic numbers of metals that bind through ionic-type interactions only.
pub const IONIC_TYPE_METALS: [u8; 19] = [
    3, 11, 19, 37, 55, // alkali
    12, 20, 38, 56, // alkaline earth
    13, 31, 49, 81, 21, 50, 82, 83, 51, 80,
];

const COORDINATING_SIDECHAINS: [&str; 7] = ["ASP", "GLU", "SER", "THR", "TYR", "ASN", "GLN"];

/// Returns `(dative, ionic)` partner capability of a single atom.
fn binding_modes(system: &MolecularSystem, atom: AtomIndex) -> (bool, bool) {
    let element = system.element(atom);
    let name = system.atoms()[atom].name.trim();
    match system.residue_class(atom) {
        ResidueClass::AminoAcid => match element {
            Element::O => {
                let sidechain = COORDINATING_SIDECHAINS.contains(&system.residue_name(atom))
                    && system.is_sidechain(atom);
                let both = sidechain || system.is_backbone(atom);
                (both, both)
            }
            Element::S if system.residue_name(atom) == "CYS" => (true, true),
            Element::N if system.residue_name(atom) == "HIS" && system.is_sidechain(atom) => (true, false),
            _ => (false, false),
        },
        ResidueClass::Nucleotide => {
            if element == Element::O && system.is_backbone(atom) {
                (true, true)
            } else if matches!(name, "N3" | "N4" | "N7") {
                (true, false)
            } else if matches!(name, "O2" | "O4" | "O6") {
                (true, true)
            } else {
                (false, false)
            }
        }
        ResidueClass::Water | ResidueClass::Other => {
            if element.is_halogen() || element == Element::O || element == Element::S {
                (true, true)
            } else if element == Element::N {
                (true, false)
            } else {
                (false, false)
            }
        }
    }
}

/// Metal binding partners, one dative and/or one ionic-type feature per atom.
pub(super) fn add_metal_binding(features: &mut Features, system: &MolecularSystem) {
    for atom in 0..system.atom_count() {
        let (dative, ionic) = binding_modes(system, atom);
        if dative {
            features.push_atom(system, FeatureType::DativeBondPartner, atom);
        }
        if ionic {
            features.push_atom(system, FeatureType::IonicTypePartner, atom);
        }
    }
}

pub(super) fn add_metals(features: &mut Features, system: &MolecularSystem) {
    for (atom, a) in system.atoms().iter().enumerate() {
        let element = a.element;
        if element.is_transition_metal() || element == Element::ZN || element == Element::CD {
            features.push_atom(system, FeatureType::TransitionMetal, atom);
        } else if IONIC_TYPE_METALS.contains(&element.atomic_number()) {
            features.push_atom(system, FeatureType::IonicTypeMetal, atom);
        }
    }
}
