//! Research projects: achievements with `type = 2`, written through the
//! v2 API.

use labadmin_core::codes::AchievementKind;
use labadmin_core::types::DbId;

use crate::api::achievements::AchievementsApi;
use crate::client::LabClient;
use crate::error::ClientResult;
use crate::models::achievement::{Achievement, AchievementQuery, AchievementWrite, RelatedPaper};
use crate::pagination::{Page, PageRequest};
use crate::schema::{LegacyProject, SchemaVersion};

#[derive(Debug, Clone)]
pub struct ProjectsApi {
    client: LabClient,
    inner: AchievementsApi,
}

impl ProjectsApi {
    pub(crate) fn new(client: LabClient) -> Self {
        let inner = client.achievements().with_schema(SchemaVersion::V2);
        Self { client, inner }
    }

    /// Projects only; the kind filter is forced unless a category is
    /// given.
    pub async fn list(
        &self,
        query: &AchievementQuery,
        page: PageRequest,
    ) -> ClientResult<Page<Achievement>> {
        let mut query = query.clone();
        if query.category_id.is_none() {
            query.kind = Some(AchievementKind::Project);
        }
        self.inner.list(&query, page).await
    }

    /// The old flat project listing, mapped onto [`Achievement`].
    pub async fn legacy_list(&self, page: PageRequest) -> ClientResult<Page<Achievement>> {
        let rows: Page<LegacyProject> = self
            .client
            .call_page("/lab/projects", &(), page)
            .await?;
        Ok(rows.map(Achievement::from))
    }

    pub async fn get(&self, id: DbId) -> ClientResult<Achievement> {
        self.inner.get(id).await
    }

    /// Papers linked to a project, taken from its detail.
    pub async fn related_papers(&self, id: DbId) -> ClientResult<Vec<RelatedPaper>> {
        Ok(self.inner.get(id).await?.related_papers)
    }

    pub async fn create(&self, payload: &AchievementWrite) -> ClientResult<Option<Achievement>> {
        self.inner.create(payload).await
    }

    pub async fn update(
        &self,
        id: DbId,
        payload: &AchievementWrite,
    ) -> ClientResult<Option<Achievement>> {
        self.inner.update(id, payload).await
    }

    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.inner.delete(id).await
    }

    pub async fn set_published(&self, id: DbId, published: bool) -> ClientResult<()> {
        self.inner.set_published(id, published).await
    }

    pub async fn set_verified(&self, id: DbId, verified: bool) -> ClientResult<()> {
        self.inner.set_verified(id, verified).await
    }

    /// Author management is shared with papers.
    pub fn authors(&self) -> &AchievementsApi {
        &self.inner
    }
}
