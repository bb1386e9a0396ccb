//! Lab news DTOs (`/lab/news`).

use labadmin_core::codes::{NewsStatus, NewsType};
use labadmin_core::types::DbId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct News {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: NewsType,
    pub status: NewsStatus,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub publish_time: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl News {
    pub fn is_published(&self) -> bool {
        self.status == NewsStatus::Published
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsQuery {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<NewsType>,
    pub status: Option<NewsStatus>,
    pub author: Option<String>,
}

/// Create/update body for a news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsWrite {
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NewsType,
    pub status: NewsStatus,
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub publish_time: Option<String>,
}
