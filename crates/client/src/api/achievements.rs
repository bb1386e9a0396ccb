//! Achievement administration (`/lab/achievements`), shared by papers
//! and projects.

use labadmin_core::error::CoreError;
use labadmin_core::types::DbId;

use crate::client::LabClient;
use crate::error::ClientResult;
use crate::models::achievement::{Achievement, AchievementQuery, AchievementWrite};
use crate::models::author::{Author, CreateAuthorRequest, UpdateAuthorRequest};
use crate::pagination::{Page, PageRequest};
use crate::schema::{encode_achievement_write, SchemaVersion, ACHIEVEMENTS_V1};
use crate::transport::ApiRequest;

#[derive(Debug, Clone)]
pub struct AchievementsApi {
    client: LabClient,
    schema: SchemaVersion,
}

impl AchievementsApi {
    pub(crate) fn new(client: LabClient) -> Self {
        let schema = client.schema();
        Self { client, schema }
    }

    /// Override the write API version for this handle only.
    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    pub async fn list(
        &self,
        query: &AchievementQuery,
        page: PageRequest,
    ) -> ClientResult<Page<Achievement>> {
        self.client.call_page(ACHIEVEMENTS_V1, query, page).await
    }

    pub async fn get(&self, id: DbId) -> ClientResult<Achievement> {
        let found: Option<Achievement> =
            self.client.get(&format!("{ACHIEVEMENTS_V1}/{id}")).await?;
        found.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Achievement",
                id,
            }
            .into()
        })
    }

    /// Create an achievement (authors included). Returns the stored row
    /// when the backend echoes it.
    pub async fn create(&self, payload: &AchievementWrite) -> ClientResult<Option<Achievement>> {
        let body = encode_achievement_write(payload, self.schema)?;
        let request = ApiRequest::post(self.schema.write_base()).with_body(body);
        self.client.call(request).await
    }

    /// Update scalar fields. Authors are managed through the author
    /// endpoints.
    pub async fn update(
        &self,
        id: DbId,
        payload: &AchievementWrite,
    ) -> ClientResult<Option<Achievement>> {
        let mut payload = payload.clone();
        payload.authors = None;
        let body = encode_achievement_write(&payload, self.schema)?;
        let request =
            ApiRequest::put(format!("{}/{id}", self.schema.write_base())).with_body(body);
        self.client.call(request).await
    }

    /// Soft delete. Both API versions delete through the v1 path.
    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("{ACHIEVEMENTS_V1}/{id}")).await
    }

    pub async fn set_published(&self, id: DbId, published: bool) -> ClientResult<()> {
        let request =
            ApiRequest::put(format!("{ACHIEVEMENTS_V1}/{id}/publish")).param("published", published);
        self.client.call_unit(request).await
    }

    pub async fn set_verified(&self, id: DbId, verified: bool) -> ClientResult<()> {
        let request =
            ApiRequest::put(format!("{ACHIEVEMENTS_V1}/{id}/verify")).param("verified", verified);
        self.client.call_unit(request).await
    }

    pub async fn authors(&self, id: DbId) -> ClientResult<Vec<Author>> {
        self.client
            .get(&format!("{ACHIEVEMENTS_V1}/{id}/authors"))
            .await
    }

    pub async fn add_author(&self, id: DbId, body: &CreateAuthorRequest) -> ClientResult<Author> {
        self.client
            .post(&format!("{ACHIEVEMENTS_V1}/{id}/authors"), body)
            .await
    }

    pub async fn update_author(
        &self,
        id: DbId,
        author_id: DbId,
        body: &UpdateAuthorRequest,
    ) -> ClientResult<Option<Author>> {
        let request = ApiRequest::put(format!("{ACHIEVEMENTS_V1}/{id}/authors/{author_id}"))
            .json(body)?;
        self.client.call(request).await
    }

    /// Soft delete one author.
    pub async fn delete_author(&self, id: DbId, author_id: DbId) -> ClientResult<()> {
        self.client
            .delete(&format!("{ACHIEVEMENTS_V1}/{id}/authors/{author_id}"))
            .await
    }

    /// Move an author to `new_order`; the backend shifts the others.
    pub async fn reorder_author(&self, id: DbId, author_id: DbId, new_order: i32) -> ClientResult<()> {
        let request = ApiRequest::put(format!(
            "{ACHIEVEMENTS_V1}/{id}/authors/{author_id}/reorder"
        ))
        .param("newOrder", new_order);
        self.client.call_unit(request).await
    }

    pub async fn set_author_visibility(
        &self,
        id: DbId,
        author_id: DbId,
        visible: bool,
    ) -> ClientResult<()> {
        let request = ApiRequest::put(format!(
            "{ACHIEVEMENTS_V1}/{id}/authors/{author_id}/visibility"
        ))
        .param("visible", visible);
        self.client.call_unit(request).await
    }
}
