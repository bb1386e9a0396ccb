use labadmin_client::ClientError;
use labadmin_core::error::CoreError;
use labadmin_core::types::DbId;
use labadmin_core::validation::ValidationReport;

use crate::resource::Flag;

/// Errors surfaced by pagers and list controllers.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// Client-side rules rejected the form; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("No dialog is open")]
    NoDialog,

    #[error("Record {0} is not on the current page")]
    RecordNotFound(DbId),

    #[error("Flag '{0}' is not supported by this resource")]
    UnsupportedFlag(Flag),

    /// The user declined a confirmation prompt.
    #[error("Cancelled")]
    Cancelled,
}

pub type ControllerResult<T> = Result<T, ControllerError>;

impl ControllerError {
    /// Text for a user-facing notification.
    pub fn message(&self) -> String {
        match self {
            Self::Client(e) => e.message(),
            Self::Validation(report) => report.summary(),
            other => other.to_string(),
        }
    }
}

impl From<ValidationReport> for ControllerError {
    fn from(report: ValidationReport) -> Self {
        Self::Validation(report)
    }
}
