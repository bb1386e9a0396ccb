use labadmin_client::models::achievement::{Achievement, AchievementWrite};
use labadmin_core::authors::renumber_authors;
use labadmin_core::codes::{AchievementKind, ProjectType};
use labadmin_core::form::is_blank;
use labadmin_core::types::DbId;
use labadmin_core::validation::{validate_http_url, validate_year_month, violation};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::author::AuthorForm;
use super::required;
use crate::error::ControllerResult;
use crate::resource::{DialogForm, DialogMode};

/// Create/edit dialog for a research project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_date_range"))]
pub struct ProjectForm {
    #[validate(
        required(message = "Project name is required"),
        length(min = 1, max = 500, message = "Project name must be 1-500 characters")
    )]
    pub title: Option<String>,
    #[validate(length(max = 500, message = "English name must be at most 500 characters"))]
    pub title_en: Option<String>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 500, message = "Keywords must be at most 500 characters"))]
    pub keywords: Option<String>,
    pub project_type: Option<ProjectType>,
    pub category_id: Option<DbId>,
    /// `YYYY-MM`.
    #[validate(
        required(message = "Start month is required"),
        custom(function = "validate_year_month")
    )]
    pub project_start_date: Option<String>,
    #[validate(custom(function = "validate_year_month"))]
    pub project_end_date: Option<String>,
    /// In units of 10k CNY; typed as text in the dialog.
    #[validate(custom(function = "validate_funding"))]
    pub funding_amount: Option<String>,
    /// Grant number; stored in the DOI column.
    #[validate(length(max = 100, message = "Project number must be at most 100 characters"))]
    pub project_number: Option<String>,
    #[validate(length(max = 500), custom(function = "validate_http_url"))]
    pub git_url: Option<String>,
    #[validate(length(max = 500), custom(function = "validate_http_url"))]
    pub link_url: Option<String>,
    pub published: Option<bool>,
    #[validate(nested)]
    pub authors: Vec<AuthorForm>,
}

fn validate_funding(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(()),
        Ok(_) => Err(violation("funding", "Funding must not be negative")),
        Err(_) => Err(violation("funding", "Funding must be a number")),
    }
}

fn check_date_range(form: &ProjectForm) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (&form.project_start_date, &form.project_end_date) {
        // YYYY-MM compares correctly as text
        if end < start {
            return Err(violation("date_range", "End month must not be before start month"));
        }
    }
    Ok(())
}

impl ProjectForm {
    fn funding(&self) -> Option<f64> {
        self.funding_amount
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
    }
}

impl DialogForm for ProjectForm {
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
            project_type: record.project_type,
            category_id: record.category_id,
            project_start_date: record.project_start_date.clone(),
            project_end_date: record.project_end_date.clone(),
            funding_amount: record.funding_amount.map(|f| f.to_string()),
            project_number: record.doi.clone(),
            git_url: record.git_url.clone(),
            link_url: record.link_url.clone(),
            published: Some(record.published),
            authors,
        }
    }

    /// Drop author rows left without a name and renumber the rest.
    fn prepare(mut self) -> Self {
        self.authors
            .retain(|a| a.user_id.is_some() || !is_blank(a.name.as_deref()));
        let len = self.authors.len();
        for (author, order) in self.authors.iter_mut().zip(renumber_authors(len)) {
            author.author_order = order;
        }
        self
    }

    fn into_payload(self, _mode: DialogMode) -> ControllerResult<AchievementWrite> {
        let funding_amount = self.funding();
        Ok(AchievementWrite {
            title: Some(required(self.title, "title")?),
            title_en: self.title_en,
            description: self.description,
            keywords: self.keywords,
            kind: Some(AchievementKind::Project),
            project_type: self.project_type,
            category_id: self.category_id,
            project_start_date: self.project_start_date,
            project_end_date: self.project_end_date,
            funding_amount,
            doi: self.project_number,
            git_url: self.git_url,
            link_url: self.link_url,
            published: self.published,
            authors: Some(self.authors.iter().map(AuthorForm::to_create_request).collect()),
            ..AchievementWrite::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ProjectForm {
        ProjectForm {
            title: Some("Edge inference platform".into()),
            project_start_date: Some("2023-09".into()),
            funding_amount: Some("30".into()),
            ..ProjectForm::default()
        }
    }

    #[test]
    fn end_before_start_rejected() {
        let form = ProjectForm {
            project_end_date: Some("2023-01".into()),
            ..valid()
        };
        assert!(form.check(DialogMode::Create).has_field("__all__"));
        let ok = ProjectForm {
            project_end_date: Some("2025-06".into()),
            ..valid()
        };
        assert!(ok.check(DialogMode::Create).is_valid());
    }

    #[test]
    fn funding_accepts_numeric_text_only() {
        let negative = ProjectForm {
            funding_amount: Some("-1".into()),
            ..valid()
        };
        assert!(negative.check(DialogMode::Create).has_field("funding_amount"));
        let text = ProjectForm {
            funding_amount: Some("lots".into()),
            ..valid()
        };
        assert!(text.check(DialogMode::Create).has_field("funding_amount"));
        let payload = valid().into_payload(DialogMode::Create).unwrap();
        assert_eq!(payload.funding_amount, Some(30.0));
    }

    #[test]
    fn prepare_filters_and_renumbers_authors() {
        let form = ProjectForm {
            authors: vec![
                AuthorForm { name: Some("Wang".into()), author_order: 4, is_leader: true, ..AuthorForm::default() },
                AuthorForm { name: None, author_order: 5, ..AuthorForm::default() },
                AuthorForm { name: Some("Li".into()), author_order: 9, ..AuthorForm::default() },
            ],
            ..valid()
        }
        .prepare();
        let orders: Vec<i32> = form.authors.iter().map(|a| a.author_order).collect();
        assert_eq!(orders, vec![1, 2]);
        let payload = form.into_payload(DialogMode::Create).unwrap();
        let authors = payload.authors.unwrap();
        assert_eq!(authors[0].role.as_deref(), Some("leader"));
        assert_eq!(authors[1].role, None);
    }
}
