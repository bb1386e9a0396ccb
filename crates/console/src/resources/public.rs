use async_trait::async_trait;
use labadmin_client::models::public::{PublicAchievement, PublicQuery};
use labadmin_client::{LabClient, Page, PageRequest};
use labadmin_core::types::DbId;

use crate::error::ControllerResult;
use crate::resource::ListSource;

/// Read-only listing behind the public achievements page.
#[derive(Debug, Clone)]
pub struct PublicAchievementsSource {
    client: LabClient,
}

impl PublicAchievementsSource {
    pub fn new(client: LabClient) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: DbId) -> ControllerResult<PublicAchievement> {
        Ok(self.client.public().get(id).await?)
    }
}

#[async_trait]
impl ListSource for PublicAchievementsSource {
    type Item = PublicAchievement;
    type Filters = PublicQuery;

    fn name(&self) -> &'static str {
        "public-achievements"
    }

    fn id_of(item: &PublicAchievement) -> DbId {
        item.id
    }

    async fn fetch(
        &self,
        filters: &PublicQuery,
        page: PageRequest,
    ) -> ControllerResult<Page<PublicAchievement>> {
        Ok(self.client.public().list(filters, page).await?)
    }
}
