use async_trait::async_trait;
use labadmin_client::models::news::{News, NewsQuery, NewsWrite};
use labadmin_client::{LabClient, Page, PageRequest};
use labadmin_core::codes::NewsStatus;
use labadmin_core::types::DbId;

use crate::error::{ControllerError, ControllerResult};
use crate::forms::NewsForm;
use crate::resource::{Flag, FlagSource, ListSource, ResourceApi};

/// Lab news screen. `Published` maps onto the status code.
#[derive(Debug, Clone)]
pub struct NewsResource {
    client: LabClient,
}

impl NewsResource {
    pub fn new(client: LabClient) -> Self {
        Self { client }
    }
}

fn status_for(published: bool) -> NewsStatus {
    if published {
        NewsStatus::Published
    } else {
        NewsStatus::Draft
    }
}

#[async_trait]
impl ListSource for NewsResource {
    type Item = News;
    type Filters = NewsQuery;

    fn name(&self) -> &'static str {
        "news"
    }

    fn id_of(item: &News) -> DbId {
        item.id
    }

    async fn fetch(&self, filters: &NewsQuery, page: PageRequest) -> ControllerResult<Page<News>> {
        Ok(self.client.news().list(filters, page).await?)
    }
}

#[async_trait]
impl FlagSource for NewsResource {
    fn flag(item: &News, flag: Flag) -> Option<bool> {
        (flag == Flag::Published).then(|| item.is_published())
    }

    fn set_flag_local(item: &mut News, flag: Flag, value: bool) {
        if flag == Flag::Published {
            item.status = status_for(value);
        }
    }

    async fn set_flag(&self, id: DbId, flag: Flag, value: bool) -> ControllerResult<()> {
        match flag {
            Flag::Published => Ok(self.client.news().set_status(id, status_for(value)).await?),
            other => Err(ControllerError::UnsupportedFlag(other)),
        }
    }
}

#[async_trait]
impl ResourceApi for NewsResource {
    type Form = NewsForm;

    fn describe(item: &News) -> String {
        item.title.clone()
    }

    async fn create(&self, payload: NewsWrite) -> ControllerResult<()> {
        Ok(self.client.news().create(&payload).await?)
    }

    async fn update(&self, id: DbId, payload: NewsWrite) -> ControllerResult<()> {
        Ok(self.client.news().update(id, &payload).await?)
    }

    async fn delete(&self, id: DbId) -> ControllerResult<()> {
        Ok(self.client.news().delete(id).await?)
    }
}
