//! Achievement category administration (`/lab/achievement-categories`).

use labadmin_core::types::DbId;

use crate::client::LabClient;
use crate::error::ClientResult;
use crate::models::category::{
    BatchSortCommand, Category, CategoryQuery, CreateCategoryCommand, SortItem,
    UpdateCategoryCommand,
};
use crate::pagination::{Page, PageRequest};
use crate::transport::ApiRequest;

const BASE: &str = "/lab/achievement-categories";

#[derive(Debug, Clone)]
pub struct CategoriesApi {
    client: LabClient,
}

impl CategoriesApi {
    pub(crate) fn new(client: LabClient) -> Self {
        Self { client }
    }

    /// The full two-level tree.
    pub async fn tree(&self, include_inactive: bool) -> ClientResult<Vec<Category>> {
        let request = ApiRequest::get(BASE).param("includeInactive", include_inactive);
        self.client.call(request).await
    }

    /// Flat paginated listing (`{total, pageNum, pageSize, list}` shape).
    pub async fn list(
        &self,
        query: &CategoryQuery,
        page: PageRequest,
    ) -> ClientResult<Page<Category>> {
        self.client
            .call_page(&format!("{BASE}/list"), query, page)
            .await
    }

    pub async fn get(&self, id: DbId) -> ClientResult<Category> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    /// Returns the new category id.
    pub async fn create(&self, body: &CreateCategoryCommand) -> ClientResult<DbId> {
        self.client.post(BASE, body).await
    }

    pub async fn update(&self, id: DbId, body: &UpdateCategoryCommand) -> ClientResult<()> {
        self.client.put(&format!("{BASE}/{id}"), body).await
    }

    pub async fn set_active(&self, id: DbId, active: bool) -> ClientResult<()> {
        let request = ApiRequest::put(format!("{BASE}/{id}/status")).param("active", active);
        self.client.call_unit(request).await
    }

    pub async fn batch_sort(&self, items: Vec<SortItem>) -> ClientResult<()> {
        self.client
            .put(&format!("{BASE}/batch/sort"), &BatchSortCommand { items })
            .await
    }

    /// System categories and categories still in use are refused by the
    /// backend.
    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("{BASE}/{id}")).await
    }
}
