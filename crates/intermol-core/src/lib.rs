//! # intermol
//!
//! Detection of non-covalent contacts in molecular structures: hydrogen bonds,
//! ionic interactions, pi-stacking, cation-pi, hydrophobic contacts, halogen
//! bonds and metal coordination.
//!
//! ## Architecture
//!
//! The library keeps the same three layers throughout.
//!
//! - **[`core`]: The Foundation.** The in-memory structure model
//!   (`MolecularSystem`), chemistry perception (elements, functional groups,
//!   the valence model), geometry helpers, the spatial hash and CSV output.
//!
//! - **[`engine`]: The Logic Core.** Feature extraction, the contact store and
//!   adjacency list, one detector per interaction family, the refinement
//!   passes and the per-structure cache.
//!
//! - **[`workflows`]: The Public API.** `workflows::contacts::run` computes
//!   the contacts of a structure; `workflows::query` turns the result into
//!   renderer arrays, labels and tables.
//!
//! ## Example
//!
//! ```no_run
//! use intermol::core::models::system::MolecularSystem;
//! use intermol::engine::cache::StructureCache;
//! use intermol::engine::config::ContactParams;
//! use intermol::engine::progress::ProgressReporter;
//! use intermol::workflows::{contacts, query};
//!
//! # fn main() -> Result<(), intermol::engine::error::EngineError> {
//! let system: MolecularSystem = todo!("filled by the caller");
//! let mut cache = StructureCache::new();
//! let result = contacts::run(&system, &ContactParams::default(), &mut cache, &ProgressReporter::new())?;
//! let data = query::contact_data(&result, &system, &query::ContactDataParams::default())?;
//! for pick in &data.picking {
//!     println!("{}", pick.describe(&system));
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
