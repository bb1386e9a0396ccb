//! Self-service view of the caller's own achievements
//! (`/lab/my-achievements`).

use labadmin_core::types::DbId;

use crate::client::LabClient;
use crate::error::ClientResult;
use crate::models::achievement::{Achievement, AchievementQuery};
use crate::pagination::{Page, PageRequest};
use crate::transport::ApiRequest;

const BASE: &str = "/lab/my-achievements";

#[derive(Debug, Clone)]
pub struct MyAchievementsApi {
    client: LabClient,
}

impl MyAchievementsApi {
    pub(crate) fn new(client: LabClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: &AchievementQuery,
        page: PageRequest,
    ) -> ClientResult<Page<Achievement>> {
        self.client.call_page(BASE, query, page).await
    }

    /// Show or hide an achievement on the caller's public page.
    pub async fn set_visibility(&self, id: DbId, visible: bool) -> ClientResult<()> {
        let request = ApiRequest::put(format!("{BASE}/{id}/visibility")).param("visible", visible);
        self.client.call_unit(request).await
    }
}
