use labadmin_client::models::achievement::{Achievement, AchievementWrite};
use labadmin_core::authors::validate_author_orders;
use labadmin_core::codes::{AchievementKind, PaperType};
use labadmin_core::types::DbId;
use labadmin_core::validation::{validate_http_url, validate_year, violation};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::author::AuthorForm;
use super::required;
use crate::error::ControllerResult;
use crate::resource::{DialogForm, DialogMode};

/// Create/edit dialog for a paper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_author_orders"))]
pub struct PaperForm {
    #[validate(
        required(message = "Title is required"),
        length(min = 1, max = 500, message = "Title must be 1-500 characters")
    )]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "English title must be at most 500 characters"))]
    pub title_en: Option<String>,
    #[validate(length(max = 2000, message = "Abstract must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 500, message = "Keywords must be at most 500 characters"))]
    pub keywords: Option<String>,
    #[validate(required(message = "Paper type is required"))]
    pub paper_type: Option<PaperType>,
    pub category_id: Option<DbId>,
    /// Journal or conference name.
    #[validate(length(min = 2, max = 300, message = "Venue must be 2-300 characters"))]
    pub venue: Option<String>,
    /// `YYYY`.
    #[validate(
        required(message = "Publish year is required"),
        custom(function = "validate_year")
    )]
    pub publish_date: Option<String>,
    #[validate(length(max = 100, message = "DOI must be at most 100 characters"))]
    pub doi: Option<String>,
    #[validate(length(max = 1000, message = "Citation must be at most 1000 characters"))]
    pub reference: Option<String>,
    #[validate(length(max = 500), custom(function = "validate_http_url"))]
    pub link_url: Option<String>,
    #[validate(length(max = 500), custom(function = "validate_http_url"))]
    pub pdf_url: Option<String>,
    #[validate(length(max = 500), custom(function = "validate_http_url"))]
    pub git_url: Option<String>,
    #[validate(length(max = 500), custom(function = "validate_http_url"))]
    pub homepage_url: Option<String>,
    pub published: Option<bool>,
    #[validate(nested)]
    pub authors: Vec<AuthorForm>,
}

fn check_author_orders(form: &PaperForm) -> Result<(), ValidationError> {
    let orders: Vec<i32> = form.authors.iter().map(|a| a.author_order).collect();
    validate_author_orders(&orders)
        .map_err(|_| violation("author_order", "Author orders must be positive and unique"))
}

impl DialogForm for PaperForm {
    type Record = Achievement;
    type Payload = AchievementWrite;

    fn from_record(record: &Achievement) -> Self {
        let mut authors: Vec<AuthorForm> = record.authors.iter().map(AuthorForm::from_author).collect();
        authors.sort_by_key(|a| a.author_order);
        Self {
            title: Some(record.title.clone()),
            title_en: record.title_en.clone(),
            description: record.description.clone(),
            keywords: record.keywords.clone(),
            paper_type: record.paper_type,
            category_id: record.category_id,
            venue: record.venue.clone(),
            publish_date: record.publish_date.clone(),
            doi: record.doi.clone(),
            reference: record.reference.clone(),
            link_url: record.link_url.clone(),
            pdf_url: record.pdf_url.clone(),
            git_url: record.git_url.clone(),
            homepage_url: record.homepage_url.clone(),
            published: Some(record.published),
            authors,
        }
    }

    fn into_payload(self, _mode: DialogMode) -> ControllerResult<AchievementWrite> {
        Ok(AchievementWrite {
            title: Some(required(self.title, "title")?),
            title_en: self.title_en,
            description: self.description,
            keywords: self.keywords,
            kind: Some(AchievementKind::Paper),
            paper_type: self.paper_type,
            category_id: self.category_id,
            venue: self.venue,
            publish_date: self.publish_date,
            reference: self.reference,
            link_url: self.link_url,
            git_url: self.git_url,
            homepage_url: self.homepage_url,
            pdf_url: self.pdf_url,
            doi: self.doi,
            published: self.published,
            authors: Some(self.authors.iter().map(AuthorForm::to_create_request).collect()),
            ..AchievementWrite::default()
        })
    }
}
