use labadmin_client::models::author::{Author, CreateAuthorRequest, UpdateAuthorRequest, LEADER_ROLE};
use labadmin_core::form::is_blank;
use labadmin_core::types::DbId;
use labadmin_core::validation::{validate_email, violation};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One row of the author editor inside a paper or project dialog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "check_identified"))]
pub struct AuthorForm {
    /// Linked lab user, when picked from the user search.
    pub user_id: Option<DbId>,
    #[validate(length(max = 100, message = "Author name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 100, message = "English name must be at most 100 characters"))]
    pub name_en: Option<String>,
    #[validate(custom(function = "validate_email"))]
    pub email: Option<String>,
    #[validate(length(max = 255, message = "Affiliation must be at most 255 characters"))]
    pub affiliation: Option<String>,
    #[validate(range(min = 1, message = "Author order must be positive"))]
    pub author_order: i32,
    pub is_corresponding: bool,
    /// Project leader; stored as role `leader`.
    pub is_leader: bool,
    pub visible: Option<bool>,
}

fn check_identified(form: &AuthorForm) -> Result<(), ValidationError> {
    if form.user_id.is_none() && is_blank(form.name.as_deref()) {
        return Err(violation("author_name", "Author needs a name or a linked user"));
    }
    Ok(())
}

impl AuthorForm {
    pub fn from_author(author: &Author) -> Self {
        Self {
            user_id: author.user_id,
            name: author.name.clone(),
            name_en: author.name_en.clone(),
            email: author.email.clone(),
            affiliation: author.affiliation.clone(),
            author_order: author.author_order,
            is_corresponding: author.is_corresponding,
            is_leader: author.is_leader(),
            visible: Some(author.visible),
        }
    }

    fn role(&self) -> Option<String> {
        self.is_leader.then(|| LEADER_ROLE.to_string())
    }

    pub fn to_create_request(&self) -> CreateAuthorRequest {
        CreateAuthorRequest {
            user_id: self.user_id,
            name: self.name.clone(),
            name_en: self.name_en.clone(),
            email: self.email.clone(),
            affiliation: self.affiliation.clone(),
            author_order: self.author_order,
            is_corresponding: Some(self.is_corresponding),
            role: self.role(),
            visible: self.visible,
            ..CreateAuthorRequest::default()
        }
    }

    pub fn to_update_request(&self) -> UpdateAuthorRequest {
        UpdateAuthorRequest {
            user_id: self.user_id,
            name: self.name.clone(),
            name_en: self.name_en.clone(),
            email: self.email.clone(),
            affiliation: self.affiliation.clone(),
            author_order: Some(self.author_order),
            is_corresponding: Some(self.is_corresponding),
            role: self.role(),
            visible: self.visible,
            ..UpdateAuthorRequest::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labadmin_core::validation::ValidationReport;

    #[test]
    fn needs_name_or_user() {
        let anonymous = AuthorForm {
            author_order: 1,
            ..AuthorForm::default()
        };
        let report = ValidationReport::from(anonymous.validate().unwrap_err());
        assert!(report.has_field("__all__"));

        let linked = AuthorForm {
            user_id: Some(3),
            author_order: 1,
            ..AuthorForm::default()
        };
        assert!(linked.validate().is_ok());
    }

    #[test]
    fn order_and_email_rules() {
        let form = AuthorForm {
            name: Some("Wang".into()),
            email: Some("not-an-email".into()),
            author_order: 0,
            ..AuthorForm::default()
        };
        let report = ValidationReport::from(form.validate().unwrap_err());
        assert!(report.has_field("author_order"));
        assert!(report.has_field("email"));
    }

    #[test]
    fn leader_maps_to_role() {
        let form = AuthorForm {
            name: Some("Li".into()),
            author_order: 1,
            is_leader: true,
            ..AuthorForm::default()
        };
        assert_eq!(form.to_create_request().role.as_deref(), Some("leader"));
        assert_eq!(form.to_update_request().author_order, Some(1));
    }
}
