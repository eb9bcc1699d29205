use thiserror::Error;

use crate::core::io::contacts_csv::ExportError;
use crate::core::models::system::SystemKey;
use crate::core::utils::spatial_hash::SpatialHashError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Cannot detect contacts in a structure with zero atoms")]
    EmptyStructure,

    #[error("Spatial index construction failed: {source}")]
    SpatialHash {
        #[from]
        source: SpatialHashError,
    },

    #[error("Contact export failed: {source}")]
    Export {
        #[from]
        source: ExportError,
    },

    #[error("Contacts were computed for structure {expected:?} but queried with {found:?}")]
    StructureMismatch {
        expected: SystemKey,
        found: SystemKey,
    },
}
