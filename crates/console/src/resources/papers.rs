use async_trait::async_trait;
use labadmin_client::models::achievement::{Achievement, AchievementQuery, AchievementWrite};
use labadmin_client::{LabClient, Page, PageRequest};
use labadmin_core::codes::AchievementKind;
use labadmin_core::types::DbId;

use super::{achievement_flag, achievement_label, set_achievement_flag};
use crate::error::{ControllerError, ControllerResult};
use crate::forms::PaperForm;
use crate::resource::{Flag, FlagSource, ListSource, ResourceApi};

/// Paper management screen. Listings are always narrowed to papers.
#[derive(Debug, Clone)]
pub struct PapersResource {
    client: LabClient,
}

impl PapersResource {
    pub fn new(client: LabClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListSource for PapersResource {
    type Item = Achievement;
    type Filters = AchievementQuery;

    fn name(&self) -> &'static str {
        "papers"
    }

    fn id_of(item: &Achievement) -> DbId {
        item.id
    }

    async fn fetch(
        &self,
        filters: &AchievementQuery,
        page: PageRequest,
    ) -> ControllerResult<Page<Achievement>> {
        let query = AchievementQuery {
            kind: Some(AchievementKind::Paper),
            ..filters.clone()
        };
        Ok(self.client.achievements().list(&query, page).await?)
    }
}

#[async_trait]
impl FlagSource for PapersResource {
    fn flag(item: &Achievement, flag: Flag) -> Option<bool> {
        match flag {
            Flag::Published | Flag::Verified => achievement_flag(item, flag),
            _ => None,
        }
    }

    fn set_flag_local(item: &mut Achievement, flag: Flag, value: bool) {
        set_achievement_flag(item, flag, value);
    }

    async fn set_flag(&self, id: DbId, flag: Flag, value: bool) -> ControllerResult<()> {
        let api = self.client.achievements();
        match flag {
            Flag::Published => Ok(api.set_published(id, value).await?),
            Flag::Verified => Ok(api.set_verified(id, value).await?),
            other => Err(ControllerError::UnsupportedFlag(other)),
        }
    }
}

#[async_trait]
impl ResourceApi for PapersResource {
    type Form = PaperForm;

    fn describe(item: &Achievement) -> String {
        achievement_label(item)
    }

    async fn create(&self, payload: AchievementWrite) -> ControllerResult<()> {
        self.client.achievements().create(&payload).await?;
        Ok(())
    }

    async fn update(&self, id: DbId, payload: AchievementWrite) -> ControllerResult<()> {
        self.client.achievements().update(id, &payload).await?;
        Ok(())
    }

    async fn delete(&self, id: DbId) -> ControllerResult<()> {
        Ok(self.client.achievements().delete(id).await?)
    }
}
