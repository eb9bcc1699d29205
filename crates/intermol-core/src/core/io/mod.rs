//! Output of detected contacts in tabular form.

pub mod contacts_csv;
