//! Achievement category DTOs (`/lab/achievement-categories`).
//!
//! Categories form a two-level tree: top-level groups (`parentId` null)
//! and leaf categories that achievements point at.

use std::collections::HashMap;

use labadmin_core::types::DbId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    #[serde(default)]
    pub parent_id: Option<DbId>,
    #[serde(default)]
    pub category_code: Option<String>,
    pub category_name: String,
    #[serde(default)]
    pub category_name_en: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    /// System categories cannot be deleted.
    #[serde(default)]
    pub is_system: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub children: Vec<Category>,
}

fn default_active() -> bool {
    true
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Filters for `GET /lab/achievement-categories/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryQuery {
    pub keyword: Option<String>,
    pub parent_id: Option<DbId>,
    pub is_active: Option<bool>,
    pub is_system: Option<bool>,
    pub category_code: Option<String>,
    pub include_children: Option<bool>,
    pub top_level_only: Option<bool>,
    pub second_level_only: Option<bool>,
}

/// Body of `POST /lab/achievement-categories`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryCommand {
    pub parent_id: Option<DbId>,
    pub category_name: String,
    pub category_name_en: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Body of `PUT /lab/achievement-categories/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryCommand {
    pub parent_id: Option<DbId>,
    pub category_code: Option<String>,
    pub category_name: Option<String>,
    pub category_name_en: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortItem {
    pub id: DbId,
    pub sort_order: i32,
}

/// Body of `PUT /lab/achievement-categories/batch/sort`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSortCommand {
    pub items: Vec<SortItem>,
}

/// Map every category id in the tree (both levels) to its name.
pub fn name_index(tree: &[Category]) -> HashMap<DbId, String> {
    let mut index = HashMap::new();
    for node in tree {
        index.insert(node.id, node.category_name.clone());
        for child in &node.children {
            index.insert(child.id, child.category_name.clone());
        }
    }
    index
}

/// Top-level groups only, without their children, in sort order.
pub fn top_level(tree: &[Category]) -> Vec<Category> {
    let mut roots: Vec<Category> = tree
        .iter()
        .filter(|c| c.is_top_level())
        .map(|c| Category {
            children: Vec::new(),
            ..c.clone()
        })
        .collect();
    roots.sort_by_key(|c| c.sort_order);
    roots
}
