use super::elements::Element;
use super::geometry::{Geometry, assign_geometry};
use crate::core::models::ids::AtomIndex;
use crate::core::models::system::MolecularSystem;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// When the valence model may overwrite an input value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignPolicy {
    /// Always recompute.
    Always,
    /// Recompute only when the input carries no information (zero formal
    /// charge, or no bonded hydrogens).
    #[default]
    Auto,
    /// Trust the input.
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValenceParams {
    pub assign_charge: AssignPolicy,
    pub assign_h: AssignPolicy,
}

/// Perceived protonation state of a single atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomValence {
    pub charge: i32,
    pub implicit_h: i32,
    pub total_h: i32,
    pub geometry: Geometry,
}

/// Per-atom formal charge, hydrogen counts and ideal geometry inferred from
/// bond topology alone.
///
/// All vectors have one entry per atom of the system the model was computed
/// for, and the model never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValenceModel {
    pub charge: Vec<i8>,
    pub implicit_h: Vec<i8>,
    pub total_h: Vec<i8>,
    pub ideal_geometry: Vec<Geometry>,
}

impl ValenceModel {
    #[instrument(skip_all, name = "valence_model")]
    pub fn compute(system: &MolecularSystem, params: &ValenceParams) -> Self {
        let n = system.atom_count();
        let mut model = Self {
            charge: Vec::with_capacity(n),
            implicit_h: Vec::with_capacity(n),
            total_h: Vec::with_capacity(n),
            ideal_geometry: Vec::with_capacity(n),
        };
        for atom in 0..n {
            let v = calculate_hydrogens_charge(system, atom, params);
            model.charge.push(saturate(v.charge));
            model.implicit_h.push(saturate(v.implicit_h));
            model.total_h.push(saturate(v.total_h));
            model.ideal_geometry.push(v.geometry);
        }
        model
    }

    pub fn len(&self) -> usize {
        self.charge.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charge.is_empty()
    }
}

fn saturate(value: i32) -> i8 {
    value.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

/// Sum of bond orders, aromatic bonds counting as one.
pub fn explicit_valence(system: &MolecularSystem, atom: AtomIndex) -> i32 {
    system
        .bonded(atom)
        .iter()
        .map(|(_, order)| order.valence() as i32)
        .sum()
}

/// Whether the atom takes part in a pi system: it carries a multiple bond, or it
/// is N/O next to one. Four-coordinate N/O never qualify, and neither do N/O
/// next to P=O or S=O, so sulfonamide nitrogens stay tetrahedral.
fn is_conjugated(system: &MolecularSystem, atom: AtomIndex) -> bool {
    let element = system.element(atom);
    let hetero = element == Element::O || element == Element::N;
    if hetero && system.bond_count(atom) == 4 {
        return false;
    }

    system.bonded(atom).iter().any(|&(neighbor, order)| {
        if order.valence() > 1 {
            return true;
        }
        if !hetero {
            return false;
        }
        let neighbor_element = system.element(neighbor);
        let oxo_acid_center = neighbor_element == Element::P || neighbor_element == Element::S;
        system.bonded(neighbor).iter().any(|&(other, order2)| {
            order2.valence() > 1 && !(oxo_acid_center && system.element(other) == Element::O)
        })
    })
}

/// Derives charge, implicit hydrogen count and geometry for one atom.
///
/// With both policies active this approximates the OpenEye hydrogen count
/// model; with only one active the other quantity is deduced from the input.
pub fn calculate_hydrogens_charge(
    system: &MolecularSystem,
    atom: AtomIndex,
    params: &ValenceParams,
) -> AtomValence {
    let element = system.element(atom);
    let hydrogen_count = system.bond_to_element_count(atom, Element::H) as i32;
    let mut charge = system.atoms()[atom].formal_charge as i32;

    let assign_charge = match params.assign_charge {
        AssignPolicy::Always => true,
        AssignPolicy::Auto => charge == 0,
        AssignPolicy::Never => false,
    };
    let assign_h = match params.assign_h {
        AssignPolicy::Always => true,
        AssignPolicy::Auto => hydrogen_count == 0,
        AssignPolicy::Never => false,
    };

    let degree = system.bond_count(atom) as i32;
    let valence = explicit_valence(system, atom);
    let conjugated = is_conjugated(system, atom);
    let multi_bond = valence - degree > 0;

    let mut implicit_h = 0;
    let mut geometry = Geometry::Unknown;

    match element.atomic_number() {
        1 => {
            if assign_charge {
                if degree == 0 {
                    charge = 1;
                    geometry = Geometry::Spherical;
                } else if degree == 1 {
                    charge = 0;
                    geometry = Geometry::Terminal;
                }
            }
        }
        6 => {
            if assign_charge {
                charge = 0;
            }
            if assign_h {
                // Carbocations and carbanions are trivalent
                implicit_h = (4 - valence - charge.abs()).max(0);
            }
            geometry = assign_geometry(degree + implicit_h + (-charge).max(0));
        }
        7 => {
            if assign_charge {
                if !assign_h {
                    charge = valence - 3;
                } else if conjugated && valence < 4 {
                    // Neutral unless the double-bonded N of an amidine or guanidine
                    let amidinium = degree - hydrogen_count == 1 && valence - hydrogen_count == 2;
                    charge = if amidinium { 1 } else { 0 };
                } else {
                    let bound_to_s_or_metal = system
                        .neighbors(atom)
                        .any(|n| system.element(n) == Element::S || system.is_metal(n));
                    charge = if bound_to_s_or_metal { 0 } else { 1 };
                }
            }
            if assign_h {
                implicit_h = (3 - valence + charge).max(0);
            }
            geometry = if conjugated && !multi_bond {
                // Lone pair is delocalised; amides and anilines are planar
                assign_geometry(degree + implicit_h - charge)
            } else {
                assign_geometry(degree + implicit_h + 1 - charge)
            };
        }
        8 => {
            if assign_charge {
                if !assign_h {
                    charge = valence - 2;
                }
                if valence == 1 && is_oxo_anion_oxygen(system, atom) {
                    charge = -1;
                }
            }
            if assign_h {
                implicit_h = (2 - valence + charge).max(0);
            }
            geometry = if conjugated && !multi_bond {
                assign_geometry(degree + implicit_h - charge + 1)
            } else {
                assign_geometry(degree + implicit_h - charge + 2)
            };
        }
        16 => {
            // Thiols, thiolates, thioethers and sulfonium only. Higher oxidation
            // states are neutral with any charge carried by oxygen.
            if assign_charge && !assign_h {
                charge = if valence <= 3 && system.bond_to_element_count(atom, Element::O) == 0 {
                    valence - 2
                } else {
                    0
                };
            }
            if assign_h && valence < 2 {
                implicit_h = (2 - valence + charge).max(0);
            }
            if valence <= 3 {
                geometry = assign_geometry(degree + implicit_h - charge + 2);
            }
        }
        9 | 17 | 35 | 53 | 85 => {
            // Halides are never protonated
            if assign_charge {
                charge = valence - 1;
            }
        }
        3 | 11 | 19 | 37 | 55 | 87 => {
            if assign_charge {
                charge = 1 - valence;
            }
        }
        4 | 12 | 20 | 38 | 56 | 88 => {
            if assign_charge {
                charge = 2 - valence;
            }
        }
        _ => {
            warn!(
                atom = atom,
                element = %element,
                "No valence rule for element; leaving charge and hydrogens unassigned"
            );
            return AtomValence {
                charge: 0,
                implicit_h: 0,
                total_h: hydrogen_count,
                geometry: Geometry::Unknown,
            };
        }
    }

    AtomValence {
        charge,
        implicit_h,
        total_h: implicit_h + hydrogen_count,
        geometry,
    }
}

/// Singly bonded oxygen whose neighbour is double-bonded to another oxygen, as
/// in carboxylates, nitro groups and phosphates.
fn is_oxo_anion_oxygen(system: &MolecularSystem, atom: AtomIndex) -> bool {
    system.neighbors(atom).any(|n| {
        system.bonded(n).iter().any(|&(other, order)| {
            other != atom && system.element(other) == Element::O && order.valence() == 2
        })
    })
}
