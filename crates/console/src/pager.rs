//! Filter + pagination state over a [`ListSource`].
//!
//! Overlapping refreshes are allowed. Each refresh takes a ticket when
//! issued and only the most recently issued one may write its result;
//! responses that come back for an older ticket are dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use labadmin_client::pagination::DEFAULT_PAGE_SIZE;
use labadmin_client::PageRequest;
use labadmin_core::session::SessionContext;
use labadmin_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::{ControllerError, ControllerResult};
use crate::notify::{Notice, Notifier};
use crate::resource::{Flag, FlagSource, ListSource};

/// Progress of the latest load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Point-in-time copy of a pager's state.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerSnapshot<F, T> {
    pub filters: F,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
    /// Server-reported count across all pages.
    pub total: u64,
    pub items: Vec<T>,
    pub is_loading: bool,
    pub load_state: LoadState,
    pub last_error: Option<String>,
}

struct PagerState<F, T> {
    filters: F,
    page: u32,
    page_size: u32,
    total: u64,
    items: Vec<T>,
    is_loading: bool,
    load_state: LoadState,
    last_error: Option<String>,
}

pub struct Pager<S: ListSource> {
    source: Arc<S>,
    notifier: Arc<dyn Notifier>,
    session: SessionContext,
    state: RwLock<PagerState<S::Filters, S::Item>>,
    issued: AtomicU64,
}

impl<S: ListSource> Pager<S> {
    pub fn new(source: Arc<S>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            source,
            notifier,
            session: SessionContext::anonymous(),
            state: RwLock::new(PagerState {
                filters: S::Filters::default(),
                page: 1,
                page_size: DEFAULT_PAGE_SIZE,
                total: 0,
                items: Vec::new(),
                is_loading: false,
                load_state: LoadState::Idle,
                last_error: None,
            }),
            issued: AtomicU64::new(0),
        }
    }

    pub fn with_session(mut self, session: SessionContext) -> Self {
        self.session = session;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.state.get_mut().page_size = page_size.max(1);
        self
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Back to page 1, then reload.
    pub async fn search(&self) -> ControllerResult<()> {
        self.state.write().await.page = 1;
        self.refresh().await
    }

    /// Reload the current page with the current filters.
    ///
    /// Failures are reported through the notifier and recorded in
    /// `last_error`; the previous items stay in place.
    pub async fn refresh(&self) -> ControllerResult<()> {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let (filters, request) = {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.load_state = LoadState::Loading;
            (
                state.filters.clone(),
                PageRequest::new(state.page, state.page_size),
            )
        };

        tracing::debug!(
            resource = self.source.name(),
            page = request.page_num,
            ticket,
            "Refreshing list"
        );
        let result = self.source.fetch(&filters, request).await;

        let mut state = self.state.write().await;
        if ticket != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(
                resource = self.source.name(),
                ticket,
                "Dropping stale list response"
            );
            return Ok(());
        }

        state.is_loading = false;
        match result {
            Ok(page) => {
                state.total = page.total;
                state.items = page.items;
                state.load_state = LoadState::Loaded;
                state.last_error = None;
                Ok(())
            }
            Err(e) => {
                let message = e.message();
                tracing::warn!(resource = self.source.name(), error = %e, "List refresh failed");
                state.load_state = LoadState::Failed;
                state.last_error = Some(message.clone());
                drop(state);
                self.notifier.notify(Notice::error(message));
                Err(e)
            }
        }
    }

    pub async fn set_page(&self, page: u32) -> ControllerResult<()> {
        self.state.write().await.page = page.max(1);
        self.refresh().await
    }

    /// Change the page size; the page resets to 1.
    pub async fn set_page_size(&self, page_size: u32) -> ControllerResult<()> {
        {
            let mut state = self.state.write().await;
            state.page_size = page_size.max(1);
            state.page = 1;
        }
        self.refresh().await
    }

    /// Replace the filters without reloading.
    pub async fn set_filters(&self, filters: S::Filters) {
        self.state.write().await.filters = filters;
    }

    /// Edit the filters in place without reloading.
    pub async fn update_filters(&self, edit: impl FnOnce(&mut S::Filters)) {
        edit(&mut self.state.write().await.filters);
    }

    /// Clear every filter and search again.
    pub async fn reset_filters(&self) -> ControllerResult<()> {
        self.state.write().await.filters = S::Filters::default();
        self.search().await
    }

    pub async fn filters(&self) -> S::Filters {
        self.state.read().await.filters.clone()
    }

    pub async fn page(&self) -> u32 {
        self.state.read().await.page
    }

    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    pub async fn items(&self) -> Vec<S::Item> {
        self.state.read().await.items.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.is_loading
    }

    /// A row of the current page by id.
    pub async fn find(&self, id: DbId) -> Option<S::Item> {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|item| S::id_of(item) == id)
            .cloned()
    }

    pub async fn snapshot(&self) -> PagerSnapshot<S::Filters, S::Item> {
        let state = self.state.read().await;
        PagerSnapshot {
            filters: state.filters.clone(),
            page: state.page,
            page_size: state.page_size,
            total: state.total,
            items: state.items.clone(),
            is_loading: state.is_loading,
            load_state: state.load_state,
            last_error: state.last_error.clone(),
        }
    }

    /// Apply `edit` to the row with `id`, if it is on the current page.
    async fn with_item_mut<R>(&self, id: DbId, edit: impl FnOnce(&mut S::Item) -> R) -> Option<R> {
        let mut state = self.state.write().await;
        state
            .items
            .iter_mut()
            .find(|item| S::id_of(item) == id)
            .map(edit)
    }
}

impl<S: FlagSource> Pager<S> {
    /// Flip `flag` on row `id` optimistically, then persist it.
    ///
    /// On failure the row gets its previous value back and an error is
    /// notified. On success the page is reloaded so the row shows what
    /// the server stored. Returns the new value.
    pub async fn toggle_flag(&self, id: DbId, flag: Flag) -> ControllerResult<bool> {
        self.source.authorize(flag, &self.session)?;

        let previous = self
            .with_item_mut(id, |item| {
                let current = S::flag(item, flag)?;
                S::set_flag_local(item, flag, !current);
                Some(current)
            })
            .await
            .ok_or(ControllerError::RecordNotFound(id))?
            .ok_or(ControllerError::UnsupportedFlag(flag))?;
        let target = !previous;

        match self.source.set_flag(id, flag, target).await {
            Ok(()) => {
                tracing::info!(resource = self.source.name(), id, %flag, value = target, "Flag updated");
                self.notifier
                    .notify(Notice::success(format!("Updated {flag} to {target}")));
                if let Err(e) = self.refresh().await {
                    tracing::debug!(error = %e, "Reload after flag update failed");
                }
                Ok(target)
            }
            Err(e) => {
                self.with_item_mut(id, |item| S::set_flag_local(item, flag, previous))
                    .await;
                tracing::warn!(resource = self.source.name(), id, %flag, error = %e, "Flag update rejected");
                self.notifier.notify(Notice::error(e.message()));
                Err(e)
            }
        }
    }
}
