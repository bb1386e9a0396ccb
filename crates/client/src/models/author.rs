//! Achievement author DTOs.

use labadmin_core::types::DbId;
use serde::{Deserialize, Serialize};

/// Role text the backend uses to mark a project leader.
pub const LEADER_ROLE: &str = "leader";

/// One author of an achievement, internal (linked to a lab user) or
/// external.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: DbId,
    /// Parent achievement (papers and projects share the table).
    #[serde(alias = "projectId")]
    pub achievement_id: DbId,
    #[serde(default)]
    pub user_id: Option<DbId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
    pub author_order: i32,
    #[serde(default)]
    pub is_corresponding: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub is_internal: bool,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl Author {
    pub fn is_leader(&self) -> bool {
        self.role.as_deref() == Some(LEADER_ROLE)
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.name_en.as_deref())
            .unwrap_or("-")
    }
}

/// Body for adding an author, either inline on create or via
/// `POST /lab/achievements/{id}/authors`.
///
/// Without `user_id` the backend tries to bind the author to a lab user
/// by username, email, phone or student number, and stores an external
/// author when nothing matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub student_number: Option<String>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub affiliation: Option<String>,
    pub author_order: i32,
    pub is_corresponding: Option<bool>,
    pub role: Option<String>,
    pub visible: Option<bool>,
}

/// Body of `PUT /lab/achievements/{id}/authors/{authorId}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    pub user_id: Option<DbId>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub student_number: Option<String>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub affiliation: Option<String>,
    pub author_order: Option<i32>,
    pub is_corresponding: Option<bool>,
    pub role: Option<String>,
    pub visible: Option<bool>,
}

/// Comma-joined author names in `author_order`.
pub fn author_line(authors: &[Author]) -> String {
    let mut sorted: Vec<&Author> = authors.iter().collect();
    sorted.sort_by_key(|a| a.author_order);
    let names: Vec<&str> = sorted.iter().map(|a| a.display_name()).collect();
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
