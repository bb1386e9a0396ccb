//! Research achievement DTOs.
//!
//! Papers and projects are one backend entity discriminated by `type`
//! (see [`AchievementKind`]); newer project screens classify by
//! `categoryId` instead. One DTO covers both.

use labadmin_core::codes::{AchievementKind, PaperType, ProjectType};
use labadmin_core::format;
use labadmin_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::author::{Author, CreateAuthorRequest};
use super::lenient;

/// An achievement row (`LabAchievementDTO`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(rename = "type")]
    pub kind: AchievementKind,
    #[serde(default)]
    pub type_desc: Option<String>,
    #[serde(default)]
    pub paper_type: Option<PaperType>,
    #[serde(default)]
    pub paper_type_desc: Option<String>,
    #[serde(default)]
    pub project_type: Option<ProjectType>,
    #[serde(default)]
    pub project_type_desc: Option<String>,
    /// Leaf category in the two-level category tree.
    #[serde(default)]
    pub category_id: Option<DbId>,
    #[serde(default)]
    pub category_desc: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    /// Papers only, `YYYY`.
    #[serde(default)]
    pub publish_date: Option<String>,
    /// Projects only, `YYYY-MM`.
    #[serde(default)]
    pub project_start_date: Option<String>,
    #[serde(default)]
    pub project_end_date: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub git_url: Option<String>,
    #[serde(default)]
    pub homepage_url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
    /// DOI for papers; reused as the grant number for projects.
    #[serde(default)]
    pub doi: Option<String>,
    /// In units of 10k CNY.
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub funding_amount: Option<f64>,
    #[serde(default)]
    pub owner_user_id: Option<DbId>,
    #[serde(default)]
    pub owner_user_name: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub is_verified: bool,
    /// Only returned by the my-achievements listing; absent means shown.
    #[serde(default)]
    pub my_visibility: Option<bool>,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub related_papers: Vec<RelatedPaper>,
    #[serde(default)]
    pub extra: Option<Value>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

impl Achievement {
    pub fn is_paper(&self) -> bool {
        self.kind == AchievementKind::Paper
    }

    /// Visibility on the owner's public page; defaults to shown.
    pub fn visible_to_me(&self) -> bool {
        self.my_visibility.unwrap_or(true)
    }

    /// Year column: publish year for papers, start year for projects.
    pub fn display_year(&self) -> String {
        format::display_year(
            self.publish_date.as_deref(),
            self.project_start_date.as_deref(),
        )
    }

    /// Type column: the specific paper/project type when known.
    pub fn type_label(&self) -> String {
        if let Some(desc) = self.category_desc.as_deref().filter(|d| !d.is_empty()) {
            return desc.to_string();
        }
        match self.kind {
            AchievementKind::Paper => self
                .paper_type
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| self.kind.label().to_string()),
            AchievementKind::Project => self
                .project_type
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| self.kind.label().to_string()),
        }
    }
}

/// Paper linked to a project, returned by the project detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPaper {
    pub id: DbId,
    pub title: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub publish_date: Option<String>,
}

/// Filters for achievement listings (`/lab/achievements`,
/// `/lab/my-achievements`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementQuery {
    /// Matches title and keywords.
    pub keyword: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AchievementKind>,
    pub paper_type: Option<PaperType>,
    pub project_type: Option<ProjectType>,
    /// Leaf category; when present the backend ignores `type`.
    pub category_id: Option<DbId>,
    pub parent_category_id: Option<DbId>,
    pub published: Option<bool>,
    pub is_verified: Option<bool>,
    pub owner_user_id: Option<DbId>,
    /// Only within the caller's own scope.
    pub owner_name: Option<String>,
    pub author_name: Option<String>,
    /// `yyyy-MM-dd`.
    pub date_start: Option<String>,
    pub date_end: Option<String>,
}

impl AchievementQuery {
    pub fn papers() -> Self {
        Self {
            kind: Some(AchievementKind::Paper),
            ..Self::default()
        }
    }

    pub fn projects() -> Self {
        Self {
            kind: Some(AchievementKind::Project),
            ..Self::default()
        }
    }
}

/// Create/update body for an achievement.
///
/// `kind` is only sent to the v1 endpoints; see
/// [`crate::schema::encode_achievement_write`]. `authors` is honoured on
/// create only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievementWrite {
    pub title: Option<String>,
    pub title_en: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<AchievementKind>,
    pub paper_type: Option<PaperType>,
    pub project_type: Option<ProjectType>,
    pub category_id: Option<DbId>,
    pub venue: Option<String>,
    pub publish_date: Option<String>,
    pub project_start_date: Option<String>,
    pub project_end_date: Option<String>,
    pub reference: Option<String>,
    pub link_url: Option<String>,
    pub git_url: Option<String>,
    pub homepage_url: Option<String>,
    pub pdf_url: Option<String>,
    pub doi: Option<String>,
    pub funding_amount: Option<f64>,
    pub published: Option<bool>,
    pub extra: Option<Value>,
    pub authors: Option<Vec<CreateAuthorRequest>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_project_with_string_funding() {
        let a: Achievement = serde_json::from_value(json!({
            "id": 12,
            "title": "Edge inference",
            "type": 2,
            "projectType": 3,
            "projectStartDate": "2022-09",
            "fundingAmount": "30.5",
            "published": true
        }))
        .unwrap();
        assert_eq!(a.funding_amount, Some(30.5));
        assert_eq!(a.display_year(), "2022");
        assert_eq!(a.type_label(), "NSFC young scientists");
        assert!(a.visible_to_me());
        assert!(!a.is_paper());
    }

    #[test]
    fn category_desc_wins_type_label() {
        let a: Achievement = serde_json::from_value(json!({
            "id": 1, "title": "T", "type": 1, "paperType": 1, "categoryDesc": "CCF-A"
        }))
        .unwrap();
        assert_eq!(a.type_label(), "CCF-A");
    }

    #[test]
    fn query_serializes_type_key() {
        let q = serde_json::to_value(AchievementQuery::papers()).unwrap();
        assert_eq!(q["type"], 1);
    }
}
