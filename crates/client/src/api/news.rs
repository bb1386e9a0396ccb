//! Lab news (`/lab/news`).

use labadmin_core::codes::NewsStatus;
use labadmin_core::types::DbId;

use crate::client::LabClient;
use crate::error::ClientResult;
use crate::models::news::{News, NewsQuery, NewsWrite};
use crate::pagination::{Page, PageRequest};
use crate::transport::ApiRequest;

const BASE: &str = "/lab/news";

#[derive(Debug, Clone)]
pub struct NewsApi {
    client: LabClient,
}

impl NewsApi {
    pub(crate) fn new(client: LabClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &NewsQuery, page: PageRequest) -> ClientResult<Page<News>> {
        self.client.call_page(BASE, query, page).await
    }

    pub async fn get(&self, id: DbId) -> ClientResult<News> {
        self.client.get(&format!("{BASE}/{id}")).await
    }

    pub async fn create(&self, body: &NewsWrite) -> ClientResult<()> {
        self.client
            .call_unit(ApiRequest::post(BASE).json(body)?)
            .await
    }

    pub async fn update(&self, id: DbId, body: &NewsWrite) -> ClientResult<()> {
        self.client.put(&format!("{BASE}/{id}"), body).await
    }

    pub async fn delete(&self, id: DbId) -> ClientResult<()> {
        self.client.delete(&format!("{BASE}/{id}")).await
    }

    /// Publish or withdraw to draft.
    pub async fn set_status(&self, id: DbId, status: NewsStatus) -> ClientResult<()> {
        let request =
            ApiRequest::put(format!("{BASE}/{id}/status")).param("status", status.code());
        self.client.call_unit(request).await
    }
}
