//! Seams between the generic controllers and concrete resources.

use async_trait::async_trait;
use labadmin_client::{Page, PageRequest};
use labadmin_core::error::CoreError;
use labadmin_core::session::SessionContext;
use labadmin_core::types::DbId;
use labadmin_core::validation::ValidationReport;
use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

use crate::error::ControllerResult;

/// Boolean display flags that list screens toggle in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Published,
    Verified,
    /// Shown on the owner's public page.
    Visibility,
    /// Account or category enabled.
    Active,
}

impl Flag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Verified => "verified",
            Self::Visibility => "visibility",
            Self::Active => "active",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a dialog creates a record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(DbId),
}

impl DialogMode {
    pub fn is_create(&self) -> bool {
        matches!(self, Self::Create)
    }
}

/// A paginated, filterable remote listing.
#[async_trait]
pub trait ListSource: Send + Sync + 'static {
    type Item: Clone + Send + Sync + 'static;
    type Filters: Clone + Default + Send + Sync + 'static;

    /// Resource name for logs and messages.
    fn name(&self) -> &'static str;

    fn id_of(item: &Self::Item) -> DbId;

    async fn fetch(
        &self,
        filters: &Self::Filters,
        page: PageRequest,
    ) -> ControllerResult<Page<Self::Item>>;
}

/// A listing whose rows carry server-backed boolean flags.
#[async_trait]
pub trait FlagSource: ListSource {
    /// Current value, or `None` when the resource has no such flag.
    fn flag(item: &Self::Item, flag: Flag) -> Option<bool>;

    fn set_flag_local(item: &mut Self::Item, flag: Flag, value: bool);

    /// Whether `session` may toggle `flag` at all.
    fn authorize(&self, _flag: Flag, _session: &SessionContext) -> Result<(), CoreError> {
        Ok(())
    }

    async fn set_flag(&self, id: DbId, flag: Flag, value: bool) -> ControllerResult<()>;
}

/// A listing with create/update/delete through a dialog form.
#[async_trait]
pub trait ResourceApi: ListSource {
    type Form: DialogForm<Record = Self::Item>;

    /// Short human label for prompts and notices.
    fn describe(item: &Self::Item) -> String;

    /// Whether `session` may save changes to record `id`.
    fn authorize_edit(&self, _id: DbId, _session: &SessionContext) -> Result<(), CoreError> {
        Ok(())
    }

    async fn create(&self, payload: <Self::Form as DialogForm>::Payload) -> ControllerResult<()>;

    async fn update(
        &self,
        id: DbId,
        payload: <Self::Form as DialogForm>::Payload,
    ) -> ControllerResult<()>;

    /// Soft delete.
    async fn delete(&self, id: DbId) -> ControllerResult<()>;
}

/// State of a create/edit dialog form.
///
/// Every text field is `Option<String>` so the empty-to-null
/// normalization can round-trip the form.
pub trait DialogForm:
    Clone + Default + Serialize + DeserializeOwned + Validate + Send + Sync + 'static
{
    type Record;
    type Payload: Send + 'static;

    /// Initial state of a create dialog.
    fn for_create(_session: &SessionContext) -> Self {
        Self::default()
    }

    /// Pre-filled edit state. Nested collections are copied so dialog
    /// edits never reach the listed record.
    fn from_record(record: &Self::Record) -> Self;

    /// Clean-up applied after normalization and before validation.
    fn prepare(self) -> Self {
        self
    }

    /// Client-side rules for the given mode.
    fn check(&self, _mode: DialogMode) -> ValidationReport {
        match self.validate() {
            Ok(()) => ValidationReport::default(),
            Err(errors) => errors.into(),
        }
    }

    fn into_payload(self, mode: DialogMode) -> ControllerResult<Self::Payload>;
}
