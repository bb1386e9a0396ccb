use labadmin_client::models::news::{News, NewsWrite};
use labadmin_core::codes::{NewsStatus, NewsType};
use labadmin_core::session::SessionContext;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::required;
use crate::error::ControllerResult;
use crate::resource::{DialogForm, DialogMode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewsForm {
    #[validate(
        required(message = "Title is required"),
        length(min = 5, max = 100, message = "Title must be 5-100 characters")
    )]
    pub title: Option<String>,
    #[validate(length(min = 10, max = 200, message = "Summary must be 10-200 characters"))]
    pub summary: Option<String>,
    #[validate(
        required(message = "Content is required"),
        length(min = 20, message = "Content must be at least 20 characters")
    )]
    pub content: Option<String>,
    #[validate(required(message = "News type is required"))]
    pub kind: Option<NewsType>,
    #[validate(required(message = "Status is required"))]
    pub status: Option<NewsStatus>,
    #[validate(length(min = 2, max = 20, message = "Author must be 2-20 characters"))]
    pub author: Option<String>,
    pub cover_image: Option<String>,
    pub publish_time: Option<String>,
}

impl DialogForm for NewsForm {
    type Record = News;
    type Payload = NewsWrite;

    /// New items start as drafts signed by the current user.
    fn for_create(session: &SessionContext) -> Self {
        Self {
            kind: Some(NewsType::News),
            status: Some(NewsStatus::Draft),
            author: session
                .user()
                .map(|u| u.real_name.clone().unwrap_or_else(|| u.username.clone())),
            ..Self::default()
        }
    }

    fn from_record(record: &News) -> Self {
        Self {
            title: Some(record.title.clone()),
            summary: record.summary.clone(),
            content: record.content.clone(),
            kind: Some(record.kind),
            status: Some(record.status),
            author: record.author.clone(),
            cover_image: record.cover_image.clone(),
            publish_time: record.publish_time.clone(),
        }
    }

    fn into_payload(self, _mode: DialogMode) -> ControllerResult<NewsWrite> {
        Ok(NewsWrite {
            title: required(self.title, "title")?,
            summary: self.summary,
            content: required(self.content, "content")?,
            kind: required(self.kind, "kind")?,
            status: required(self.status, "status")?,
            author: self.author,
            cover_image: self.cover_image,
            publish_time: self.publish_time,
        })
    }
}
