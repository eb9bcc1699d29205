//! # Core Module
//!
//! The stateless foundation of the contact engine: the molecular structure
//! model, chemical perception and the geometric utilities everything else is
//! built on.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains, models, bonds and rings
//! - **Chemical Perception** ([`chemistry`]) - Elements, functional groups, ideal geometries and the valence model
//! - **Utilities** ([`utils`]) - Vector geometry, residue identifiers, bit sets and the spatial hash
//! - **Export** ([`io`]) - Tabular output of detected contacts
//!
//! Nothing in this module knows about contacts or features; it only answers
//! questions about a structure.

pub mod chemistry;
pub mod io;
pub mod models;
pub mod utils;
