//! # Chemistry Module
//!
//! Chemical perception from connectivity: element data, ideal geometries,
//! functional-group predicates and the valence model that assigns formal
//! charges and hydrogen counts.

pub mod elements;
pub mod functional_groups;
pub mod geometry;
pub mod valence;
