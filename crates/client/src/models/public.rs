//! Public read-only mirror (`/open/achievements`).

use labadmin_core::codes::AchievementKind;
use labadmin_core::format;
use labadmin_core::types::DbId;
use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAuthor {
    pub name: String,
    #[serde(default)]
    pub author_order: Option<i32>,
}

/// A published achievement as the public site shows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicAchievement {
    pub id: DbId,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: Option<AchievementKind>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub paper_type: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub project_type: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub project_start_date: Option<String>,
    #[serde(default)]
    pub project_end_date: Option<String>,
    #[serde(default)]
    pub authors: Vec<PublicAuthor>,
    #[serde(default)]
    pub journal: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub git_url: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl PublicAchievement {
    /// Journal name when present, else the venue.
    pub fn source(&self) -> &str {
        self.journal
            .as_deref()
            .or(self.venue.as_deref())
            .unwrap_or(format::DASH)
    }

    pub fn display_year(&self) -> String {
        format::display_year(
            self.publish_date.as_deref(),
            self.project_start_date.as_deref(),
        )
    }

    pub fn author_line(&self) -> String {
        let mut authors: Vec<&PublicAuthor> = self.authors.iter().collect();
        authors.sort_by_key(|a| a.author_order.unwrap_or(i32::MAX));
        if authors.is_empty() {
            return format::DASH.to_string();
        }
        authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuery {
    #[serde(rename = "type")]
    pub kind: Option<AchievementKind>,
    pub keyword: Option<String>,
}
