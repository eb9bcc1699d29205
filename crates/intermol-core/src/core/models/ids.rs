//! Dense index types shared by the structure model and the contact engine.
//!
//! Atoms, residues and chains live in contiguous vectors, so their identities are
//! plain positions. The aliases keep signatures readable about which table an index
//! points into.

pub type AtomIndex = usize;
pub type ResidueIndex = usize;
pub type ChainIndex = usize;
pub type FeatureIndex = usize;
pub type ContactIndex = usize;
