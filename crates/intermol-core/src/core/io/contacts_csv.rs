use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV writing error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

/// One row of a contact table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub contact_index: usize,
    #[serde(rename = "type")]
    pub contact_type: String,
    pub feature1: usize,
    pub feature2: usize,
    pub atom1: String,
    pub atom2: String,
    pub distance: f64,
}

/// Writes records as CSV with a header row.
pub fn write_contacts_csv<W: Write>(writer: W, records: &[ContactRecord]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush().map_err(|e| ExportError::Io {
        path: "<writer>".to_string(),
        source: e,
    })
}

pub fn write_contacts_csv_to_path(path: &Path, records: &[ContactRecord]) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    write_contacts_csv(file, records)
}
