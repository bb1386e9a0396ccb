use labadmin_client::models::category::{Category, CreateCategoryCommand};
use labadmin_core::types::DbId;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::required;
use crate::error::ControllerResult;
use crate::resource::{DialogForm, DialogMode};

/// Create/edit dialog for an achievement category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    /// Empty for a top-level group.
    pub parent_id: Option<DbId>,
    #[validate(
        required(message = "Category name is required"),
        length(min = 1, max = 100, message = "Category name must be 1-100 characters")
    )]
    pub category_name: Option<String>,
    #[validate(length(max = 200, message = "English name must be at most 200 characters"))]
    pub category_name_en: Option<String>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0, max = 9999, message = "Sort order must be 0-9999"))]
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl DialogForm for CategoryForm {
    type Record = Category;
    type Payload = CreateCategoryCommand;

    fn from_record(record: &Category) -> Self {
        Self {
            parent_id: record.parent_id,
            category_name: Some(record.category_name.clone()),
            category_name_en: record.category_name_en.clone(),
            description: record.description.clone(),
            sort_order: Some(record.sort_order),
            is_active: Some(record.is_active),
            icon: record.icon.clone(),
            color: record.color.clone(),
        }
    }

    fn into_payload(self, _mode: DialogMode) -> ControllerResult<CreateCategoryCommand> {
        Ok(CreateCategoryCommand {
            parent_id: self.parent_id,
            category_name: required(self.category_name, "category_name")?,
            category_name_en: self.category_name_en,
            description: self.description,
            sort_order: self.sort_order,
            is_active: self.is_active,
            icon: self.icon,
            color: self.color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_sort_rules() {
        let form = CategoryForm {
            category_name: None,
            sort_order: Some(10_000),
            ..CategoryForm::default()
        };
        let report = form.check(DialogMode::Create);
        assert!(report.has_field("category_name"));
        assert!(report.has_field("sort_order"));

        let ok = CategoryForm {
            category_name: Some("Journal".into()),
            sort_order: Some(0),
            ..CategoryForm::default()
        };
        assert!(ok.check(DialogMode::Create).is_valid());
    }
}
