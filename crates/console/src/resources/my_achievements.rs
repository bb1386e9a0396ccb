use async_trait::async_trait;
use labadmin_client::models::achievement::{Achievement, AchievementQuery};
use labadmin_client::{LabClient, Page, PageRequest};
use labadmin_core::types::DbId;

use super::{achievement_flag, set_achievement_flag};
use crate::error::{ControllerError, ControllerResult};
use crate::resource::{Flag, FlagSource, ListSource};

/// The signed-in member's own achievements, with the public page
/// visibility switch.
#[derive(Debug, Clone)]
pub struct MyAchievementsResource {
    client: LabClient,
}

impl MyAchievementsResource {
    pub fn new(client: LabClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListSource for MyAchievementsResource {
    type Item = Achievement;
    type Filters = AchievementQuery;

    fn name(&self) -> &'static str {
        "my-achievements"
    }

    fn id_of(item: &Achievement) -> DbId {
        item.id
    }

    async fn fetch(
        &self,
        filters: &AchievementQuery,
        page: PageRequest,
    ) -> ControllerResult<Page<Achievement>> {
        Ok(self.client.my_achievements().list(filters, page).await?)
    }
}

#[async_trait]
impl FlagSource for MyAchievementsResource {
    fn flag(item: &Achievement, flag: Flag) -> Option<bool> {
        match flag {
            Flag::Visibility => achievement_flag(item, flag),
            _ => None,
        }
    }

    fn set_flag_local(item: &mut Achievement, flag: Flag, value: bool) {
        set_achievement_flag(item, flag, value);
    }

    async fn set_flag(&self, id: DbId, flag: Flag, value: bool) -> ControllerResult<()> {
        match flag {
            Flag::Visibility => Ok(self.client.my_achievements().set_visibility(id, value).await?),
            other => Err(ControllerError::UnsupportedFlag(other)),
        }
    }
}
