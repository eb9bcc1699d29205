//! Predicates that recognise functional groups from an atom's element, bond
//! count and bonded-neighbour pattern.
//!
//! Every predicate is a pure function of the connectivity stored in a
//! [`MolecularSystem`] and never looks at coordinates.

use crate::core::chemistry::elements::Element;
use crate::core::models::ids::AtomIndex;
use crate::core::models::system::MolecularSystem;

/// Heavy-atom degree: bonds that do not lead to hydrogen.
fn heavy_degree(system: &MolecularSystem, atom: AtomIndex) -> usize {
    system.bond_count(atom) - system.bond_to_element_count(atom, Element::H)
}

/// Nitrogen with four bonds, none to hydrogen.
pub fn is_quaternary_amine(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.element(atom) == Element::N
        && system.bond_count(atom) == 4
        && system.bond_to_element_count(atom, Element::H) == 0
}

/// Sulfur with three bonds, none to hydrogen.
pub fn is_sulfonium(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.element(atom) == Element::S
        && system.bond_count(atom) == 3
        && system.bond_to_element_count(atom, Element::H) == 0
}

/// Sulfur of a sulfonic acid or sulfonate.
pub fn is_sulfonic_acid(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.element(atom) == Element::S && system.bond_to_element_count(atom, Element::O) == 3
}

pub fn is_sulfate(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.element(atom) == Element::S && system.bond_to_element_count(atom, Element::O) == 4
}

/// Phosphorus bonded only to oxygen.
pub fn is_phosphate(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.element(atom) == Element::P
        && system.bond_to_element_count(atom, Element::O) == system.bond_count(atom)
}

/// Halogen with a single bond, to carbon.
pub fn is_halocarbon(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.is_halogen(atom)
        && system.bond_count(atom) == 1
        && system.bond_to_element_count(atom, Element::C) == 1
}

/// Carbon of a carboxylate: one carbon neighbour and two terminal oxygens.
pub fn is_carboxylate(system: &MolecularSystem, atom: AtomIndex) -> bool {
    if system.element(atom) != Element::C
        || system.bond_to_element_count(atom, Element::O) != 2
        || system.bond_to_element_count(atom, Element::C) != 1
    {
        return false;
    }
    let terminal_oxygens = system
        .neighbors(atom)
        .filter(|&n| system.element(n) == Element::O && heavy_degree(system, n) == 1)
        .count();
    terminal_oxygens == 2
}

fn terminal_neighbour_count(system: &MolecularSystem, atom: AtomIndex) -> usize {
    system
        .neighbors(atom)
        .filter(|&n| heavy_degree(system, n) == 1)
        .count()
}

/// Central carbon of a guanidine: three nitrogens, two of them terminal.
pub fn is_guanidine(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.element(atom) == Element::C
        && system.bond_count(atom) == 3
        && system.bond_to_element_count(atom, Element::N) == 3
        && terminal_neighbour_count(system, atom) == 2
}

/// Central carbon of an acetamidine: two terminal nitrogens and one carbon.
pub fn is_acetamidine(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.element(atom) == Element::C
        && system.bond_count(atom) == 3
        && system.bond_to_element_count(atom, Element::N) == 2
        && system.bond_to_element_count(atom, Element::C) == 1
        && terminal_neighbour_count(system, atom) == 2
}
