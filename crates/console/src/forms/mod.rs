//! Dialog forms with their client-side rules.
//!
//! Rules mirror the backend's own constraints so most mistakes are caught
//! before a request is made; the backend stays authoritative.

pub mod author;
pub mod category;
pub mod news;
pub mod paper;
pub mod project;
pub mod user;

pub use author::AuthorForm;
pub use category::CategoryForm;
pub use news::NewsForm;
pub use paper::PaperForm;
pub use project::ProjectForm;
pub use user::{UserForm, UserPayload};

use labadmin_core::validation::{FieldViolation, ValidationReport};

use crate::error::{ControllerError, ControllerResult};

/// Unwrap a field the rules already marked required.
pub(crate) fn required<T>(value: Option<T>, field: &str) -> ControllerResult<T> {
    value.ok_or_else(|| {
        ControllerError::Validation(ValidationReport {
            violations: vec![FieldViolation {
                field: field.to_string(),
                rule: "required".to_string(),
                message: format!("{field} is required"),
            }],
        })
    })
}
