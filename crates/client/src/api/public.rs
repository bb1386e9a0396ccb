use labadmin_core::error::CoreError;
use labadmin_core::types::DbId;

use crate::client::LabClient;
use crate::error::ClientResult;
use crate::models::public::{PublicAchievement, PublicQuery};
use crate::pagination::{Page, PageRequest};

const BASE: &str = "/open/achievements";

/// Read-only public mirror; needs no token.
#[derive(Debug, Clone)]
pub struct PublicApi {
    client: LabClient,
}

impl PublicApi {
    pub(crate) fn new(client: LabClient) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        query: &PublicQuery,
        page: PageRequest,
    ) -> ClientResult<Page<PublicAchievement>> {
        self.client.call_page(BASE, query, page).await
    }

    /// A hidden or deleted achievement comes back as `null` data.
    pub async fn get(&self, id: DbId) -> ClientResult<PublicAchievement> {
        let found: Option<PublicAchievement> = self.client.get(&format!("{BASE}/{id}")).await?;
        found.ok_or_else(|| {
            CoreError::NotFound {
                entity: "Achievement",
                id,
            }
            .into()
        })
    }
}
