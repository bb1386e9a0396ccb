use async_trait::async_trait;
use labadmin_client::models::achievement::{Achievement, AchievementQuery, AchievementWrite, RelatedPaper};
use labadmin_client::{LabClient, Page, PageRequest};
use labadmin_core::error::CoreError;
use labadmin_core::session::SessionContext;
use labadmin_core::types::DbId;

use super::{achievement_flag, achievement_label, set_achievement_flag};
use crate::error::{ControllerError, ControllerResult};
use crate::forms::ProjectForm;
use crate::resource::{Flag, FlagSource, ListSource, ResourceApi};

/// Project management screen, written through the v2 achievement API.
#[derive(Debug, Clone)]
pub struct ProjectsResource {
    client: LabClient,
}

impl ProjectsResource {
    pub fn new(client: LabClient) -> Self {
        Self { client }
    }

    pub async fn related_papers(&self, id: DbId) -> ControllerResult<Vec<RelatedPaper>> {
        Ok(self.client.projects().related_papers(id).await?)
    }

    /// Rows from the old flat project table.
    pub async fn legacy(&self, page: PageRequest) -> ControllerResult<Page<Achievement>> {
        Ok(self.client.projects().legacy_list(page).await?)
    }
}

#[async_trait]
impl ListSource for ProjectsResource {
    type Item = Achievement;
    type Filters = AchievementQuery;

    fn name(&self) -> &'static str {
        "projects"
    }

    fn id_of(item: &Achievement) -> DbId {
        item.id
    }

    async fn fetch(
        &self,
        filters: &AchievementQuery,
        page: PageRequest,
    ) -> ControllerResult<Page<Achievement>> {
        Ok(self.client.projects().list(filters, page).await?)
    }
}

#[async_trait]
impl FlagSource for ProjectsResource {
    fn flag(item: &Achievement, flag: Flag) -> Option<bool> {
        achievement_flag(item, flag)
    }

    fn set_flag_local(item: &mut Achievement, flag: Flag, value: bool) {
        set_achievement_flag(item, flag, value);
    }

    /// Only teachers curate their own public page.
    fn authorize(&self, flag: Flag, session: &SessionContext) -> Result<(), CoreError> {
        if flag == Flag::Visibility && !session.is_teacher() {
            return Err(CoreError::Forbidden(
                "Only teachers can change public page visibility".into(),
            ));
        }
        Ok(())
    }

    async fn set_flag(&self, id: DbId, flag: Flag, value: bool) -> ControllerResult<()> {
        match flag {
            Flag::Published => Ok(self.client.projects().set_published(id, value).await?),
            Flag::Verified => Ok(self.client.projects().set_verified(id, value).await?),
            Flag::Visibility => Ok(self.client.my_achievements().set_visibility(id, value).await?),
            other => Err(ControllerError::UnsupportedFlag(other)),
        }
    }
}

#[async_trait]
impl ResourceApi for ProjectsResource {
    type Form = ProjectForm;

    fn describe(item: &Achievement) -> String {
        achievement_label(item)
    }

    async fn create(&self, payload: AchievementWrite) -> ControllerResult<()> {
        self.client.projects().create(&payload).await?;
        Ok(())
    }

    async fn update(&self, id: DbId, payload: AchievementWrite) -> ControllerResult<()> {
        self.client.projects().update(id, &payload).await?;
        Ok(())
    }

    async fn delete(&self, id: DbId) -> ControllerResult<()> {
        Ok(self.client.projects().delete(id).await?)
    }
}
