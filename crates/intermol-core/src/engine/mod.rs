//! # Engine Module
//!
//! Contact perception proper: from a [`MolecularSystem`](crate::core::models::system::MolecularSystem)
//! to typed features, detected contacts and their refined subset.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - `ContactParams` with distance and angle gates
//! - **Caching** ([`cache`]) - per-structure valence models and atom spatial hashes
//! - **Features** ([`features`]) - typed interaction participants extracted from atoms
//! - **Contacts** ([`contacts`]) - contact store, contact set and adjacency list
//! - **Detectors** ([`detectors`]) - one strategy per interaction family over a shared scan
//! - **Tasks** - detection and refinement steps driven by the workflows
//! - **Progress Monitoring** ([`progress`]) - phase and task events for callers
//! - **Error Handling** ([`error`]) - engine-level failures

pub mod cache;
pub mod config;
pub mod contacts;
pub mod detectors;
pub mod error;
pub mod features;
pub mod progress;
pub(crate) mod tasks;
