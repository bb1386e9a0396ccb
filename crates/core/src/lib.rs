//! Domain building blocks shared by the lab administration client and
//! console crates: identifiers, error taxonomy, code enumerations,
//! display formatting, form normalization, validation reports, and the
//! read-only session context.

pub mod authors;
pub mod codes;
pub mod error;
pub mod form;
pub mod format;
pub mod session;
pub mod types;
pub mod validation;
