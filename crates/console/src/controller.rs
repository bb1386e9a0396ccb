//! The list controller: a [`Pager`] plus a create/edit dialog and the
//! mutations every management screen offers.

use std::sync::Arc;

use labadmin_core::form;
use labadmin_core::session::SessionContext;
use labadmin_core::types::DbId;
use labadmin_core::validation::ValidationReport;
use tokio::sync::RwLock;

use crate::error::{ControllerError, ControllerResult};
use crate::notify::{Confirmer, Notice, Notifier};
use crate::pager::{Pager, PagerSnapshot};
use crate::resource::{DialogForm, DialogMode, Flag, FlagSource, ResourceApi};

/// An open create/edit dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct Dialog<F> {
    pub mode: DialogMode,
    /// Current form state. Editing it never touches the listed records.
    pub form: F,
    /// Violations from the last rejected submit.
    pub violations: ValidationReport,
    /// Server error from the last failed submit.
    pub error: Option<String>,
    pub submitting: bool,
}

impl<F> Dialog<F> {
    fn new(mode: DialogMode, form: F) -> Self {
        Self {
            mode,
            form,
            violations: ValidationReport::default(),
            error: None,
            submitting: false,
        }
    }
}

pub struct ListController<R: ResourceApi> {
    api: Arc<R>,
    pager: Pager<R>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    session: SessionContext,
    dialog: RwLock<Option<Dialog<R::Form>>>,
}

impl<R: ResourceApi> ListController<R> {
    pub fn new(
        api: R,
        session: SessionContext,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        let api = Arc::new(api);
        let pager = Pager::new(api.clone(), notifier.clone()).with_session(session.clone());
        Self {
            api,
            pager,
            notifier,
            confirmer,
            session,
            dialog: RwLock::new(None),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.pager = self.pager.with_page_size(page_size);
        self
    }

    pub fn api(&self) -> &R {
        &self.api
    }

    pub fn pager(&self) -> &Pager<R> {
        &self.pager
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub async fn search(&self) -> ControllerResult<()> {
        self.pager.search().await
    }

    pub async fn refresh(&self) -> ControllerResult<()> {
        self.pager.refresh().await
    }

    pub async fn snapshot(&self) -> PagerSnapshot<R::Filters, R::Item> {
        self.pager.snapshot().await
    }

    // -- dialog ---------------------------------------------------------------

    pub async fn open_create(&self) {
        let form = R::Form::for_create(&self.session);
        *self.dialog.write().await = Some(Dialog::new(DialogMode::Create, form));
    }

    pub async fn open_edit(&self, record: &R::Item) {
        let mode = DialogMode::Edit(R::id_of(record));
        let form = R::Form::from_record(record);
        *self.dialog.write().await = Some(Dialog::new(mode, form));
    }

    /// Edit the open dialog's form in place.
    pub async fn edit_form(&self, edit: impl FnOnce(&mut R::Form)) -> ControllerResult<()> {
        let mut dialog = self.dialog.write().await;
        let dialog = dialog.as_mut().ok_or(ControllerError::NoDialog)?;
        edit(&mut dialog.form);
        Ok(())
    }

    pub async fn dialog(&self) -> Option<Dialog<R::Form>> {
        self.dialog.read().await.clone()
    }

    pub async fn close_dialog(&self) {
        *self.dialog.write().await = None;
    }

    /// Submit the open dialog with its current form.
    pub async fn submit_dialog(&self) -> ControllerResult<()> {
        let form = self
            .dialog
            .read()
            .await
            .as_ref()
            .map(|d| d.form.clone())
            .ok_or(ControllerError::NoDialog)?;
        self.submit(form).await
    }

    /// Validate, normalize and send `form` as a create or update,
    /// depending on the open dialog's mode.
    ///
    /// Nothing is sent when validation fails. On success the dialog
    /// closes and the list reloads; on a server failure the dialog stays
    /// open with the error.
    pub async fn submit(&self, form: R::Form) -> ControllerResult<()> {
        let mode = self
            .dialog
            .read()
            .await
            .as_ref()
            .map(|d| d.mode)
            .ok_or(ControllerError::NoDialog)?;
        if let DialogMode::Edit(id) = mode {
            self.api.authorize_edit(id, &self.session)?;
        }

        let prepared = form::normalize(&form)?.prepare();
        let report = prepared.check(mode);
        if !report.is_valid() {
            tracing::debug!(resource = self.api.name(), violations = report.violations.len(), "Form rejected");
            if let Some(dialog) = self.dialog.write().await.as_mut() {
                dialog.form = form;
                dialog.violations = report.clone();
                dialog.error = None;
            }
            return Err(ControllerError::Validation(report));
        }

        let payload = prepared.into_payload(mode)?;
        if let Some(dialog) = self.dialog.write().await.as_mut() {
            dialog.form = form;
            dialog.violations = ValidationReport::default();
            dialog.submitting = true;
        }

        let result = match mode {
            DialogMode::Create => self.api.create(payload).await,
            DialogMode::Edit(id) => self.api.update(id, payload).await,
        };

        match result {
            Ok(()) => {
                let verb = if mode.is_create() { "Created" } else { "Updated" };
                tracing::info!(resource = self.api.name(), ?mode, "Record saved");
                *self.dialog.write().await = None;
                self.notifier
                    .notify(Notice::success(format!("{verb} {}", self.api.name())));
                if let Err(e) = self.pager.refresh().await {
                    tracing::debug!(error = %e, "Reload after save failed");
                }
                Ok(())
            }
            Err(e) => {
                let message = e.message();
                tracing::warn!(resource = self.api.name(), ?mode, error = %e, "Save failed");
                if let Some(dialog) = self.dialog.write().await.as_mut() {
                    dialog.submitting = false;
                    dialog.error = Some(message.clone());
                }
                self.notifier.notify(Notice::error(message));
                Err(e)
            }
        }
    }

    // -- mutations ------------------------------------------------------------

    /// Ask for confirmation, soft-delete `record` and reload.
    pub async fn remove(&self, record: &R::Item) -> ControllerResult<()> {
        let id = R::id_of(record);
        let label = R::describe(record);
        if !self.confirmer.confirm(&format!("Delete \"{label}\"?")).await {
            return Err(ControllerError::Cancelled);
        }
        self.remove_confirmed(id, &label).await
    }

    /// Delete by id, looking the row up on the current page for the
    /// confirmation prompt.
    pub async fn remove_by_id(&self, id: DbId) -> ControllerResult<()> {
        let record = self
            .pager
            .find(id)
            .await
            .ok_or(ControllerError::RecordNotFound(id))?;
        self.remove(&record).await
    }

    async fn remove_confirmed(&self, id: DbId, label: &str) -> ControllerResult<()> {
        match self.api.delete(id).await {
            Ok(()) => {
                tracing::info!(resource = self.api.name(), id, "Record deleted");
                self.notifier.notify(Notice::success(format!("Deleted \"{label}\"")));
                if let Err(e) = self.pager.refresh().await {
                    tracing::debug!(error = %e, "Reload after delete failed");
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(resource = self.api.name(), id, error = %e, "Delete failed");
                self.notifier.notify(Notice::error(e.message()));
                Err(e)
            }
        }
    }
}

impl<R: ResourceApi + FlagSource> ListController<R> {
    /// Optimistically flip a flag on one row; see [`Pager::toggle_flag`].
    pub async fn toggle_flag(&self, id: DbId, flag: Flag) -> ControllerResult<bool> {
        self.pager.toggle_flag(id, flag).await
    }
}
