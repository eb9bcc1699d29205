//! Computational steps of a contact run.
//!
//! - [`detection`] runs every detector family over the feature spatial hash.
//! - [`refinement`] applies the ordered post-detection passes to the frozen
//!   contacts.

pub mod detection;
pub mod refinement;
