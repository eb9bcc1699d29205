//! # Workflows Module
//!
//! Top-level entry points. A workflow ties the [`core`](crate::core) structure
//! model and the [`engine`](crate::engine) together into one complete
//! procedure with progress reporting and a single error type.
//!
//! - **Contacts Workflow** ([`contacts`]) - valence model, features, detection
//!   and refinement for one structure.
//! - **Queries** ([`query`]) - renderer arrays, distance labels, picking
//!   handles and CSV export over a finished run.

pub mod contacts;
pub mod query;
