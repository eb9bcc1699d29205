//! # Core Models Module
//!
//! In-memory representation of the molecular structures that contact detection
//! reads: atoms, residues, chains, models, bonds and perceived rings.
//!
//! ## Key Components
//!
//! - [`atom`] - Atom identity, element, coordinates, charge and role
//! - [`residue`] - Residues, their classification and their rings
//! - [`chain`] - Chains and the model they belong to
//! - [`system`] - The complete [`MolecularSystem`](system::MolecularSystem) container
//! - [`topology`] - Bonds and bond orders
//! - [`ids`] - Dense index aliases
//!
//! ## Usage
//!
//! A system is a plain container filled by the caller; file parsing is left
//! to other crates.
//!
//! ```
//! use intermol::core::chemistry::elements::Element;
//! use intermol::core::models::{atom::Atom, chain::ChainType, system::MolecularSystem};
//! use nalgebra::Point3;
//!
//! let mut system = MolecularSystem::new();
//! let chain = system.add_chain(0, 'A', ChainType::Protein);
//! let residue = system.add_residue(chain, 1, "ALA").unwrap();
//! let atom = Atom::new("CA", Element::C, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue, atom).unwrap();
//! assert_eq!(system.atom_count(), 1);
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
pub mod topology;
