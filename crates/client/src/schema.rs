//! Versioned wire schema.
//!
//! The backend grew a second achievement write API (`/v2/...`) that
//! classifies by `categoryId` and rejects the old `type` discriminator,
//! and older read endpoints still return snake_case user rows and flat
//! project rows. Everything here maps those shapes onto the one set of
//! DTOs in [`crate::models`].

use labadmin_core::codes::{AcademicStatus, AchievementKind, Gender, Identity, MemberStatus, ProjectType};
use labadmin_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::models::achievement::{Achievement, AchievementWrite};
use crate::models::author::Author;
use crate::models::lenient;
use crate::models::user::LabUser;

pub const ACHIEVEMENTS_V1: &str = "/lab/achievements";
pub const ACHIEVEMENTS_V2: &str = "/v2/lab/achievements";

/// Achievement write API version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaVersion {
    /// Discriminated by `type`, classified by paper/project type codes.
    #[default]
    V1,
    /// Classified by `categoryId`; `type` must not be sent.
    V2,
}

impl SchemaVersion {
    /// Base path for create/update/delete.
    pub fn write_base(self) -> &'static str {
        match self {
            Self::V1 => ACHIEVEMENTS_V1,
            Self::V2 => ACHIEVEMENTS_V2,
        }
    }
}

/// Encode a write payload for the given API version.
pub fn encode_achievement_write(
    payload: &AchievementWrite,
    version: SchemaVersion,
) -> Result<Value, ClientError> {
    let mut value = serde_json::to_value(payload)?;
    if version == SchemaVersion::V2 {
        if let Value::Object(map) = &mut value {
            map.remove("type");
        }
    }
    strip_nulls(&mut value);
    Ok(value)
}

/// Drop `null` members at every depth; absent and null mean the same to
/// the backend.
fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

/// A user row from the old member endpoints: snake_case (or partly
/// camelCase), text-coded identity/status and numeric phone.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LegacyUser {
    #[serde(alias = "userId", alias = "id")]
    pub user_id: DbId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(alias = "realName")]
    pub real_name: String,
    #[serde(default, alias = "englishName")]
    pub english_name: Option<String>,
    #[serde(default, alias = "studentNumber", deserialize_with = "lenient::opt_string")]
    pub student_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub identity: Option<String>,
    #[serde(default, alias = "academicStatus", deserialize_with = "lenient::opt_string")]
    pub academic_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub status: Option<String>,
    #[serde(default, alias = "researchArea")]
    pub research_area: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "enrollmentYear", deserialize_with = "lenient::opt_i32")]
    pub enrollment_year: Option<i32>,
    #[serde(default, alias = "graduationYear", deserialize_with = "lenient::opt_i32")]
    pub graduation_year: Option<i32>,
    #[serde(default, alias = "graduationDest")]
    pub graduation_dest: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default, alias = "homepageUrl")]
    pub homepage_url: Option<String>,
    #[serde(default)]
    pub orcid: Option<String>,
}

/// Parse a text code that is either the integer or a known keyword.
fn text_code<T>(raw: Option<&str>, keywords: &[(&str, T)]) -> Option<T>
where
    T: Copy + TryFrom<i32>,
{
    let raw = raw?.trim();
    if let Ok(code) = raw.parse::<i32>() {
        return T::try_from(code).ok();
    }
    let lowered = raw.to_ascii_lowercase();
    keywords
        .iter()
        .find(|(k, _)| *k == lowered)
        .map(|(_, v)| *v)
}

impl From<LegacyUser> for LabUser {
    fn from(legacy: LegacyUser) -> Self {
        let identity = text_code(
            legacy.identity.as_deref(),
            &[
                ("admin", Identity::Admin),
                ("teacher", Identity::Teacher),
                ("student", Identity::Student),
            ],
        )
        .unwrap_or(Identity::Student);
        let academic_status = text_code(
            legacy.academic_status.as_deref(),
            &[
                ("director", AcademicStatus::LabDirector),
                ("professor", AcademicStatus::Professor),
                ("associate_professor", AcademicStatus::AssociateProfessor),
                ("lecturer", AcademicStatus::Lecturer),
                ("phd", AcademicStatus::PhdStudent),
                ("master", AcademicStatus::MasterStudent),
                ("undergraduate", AcademicStatus::Undergraduate),
            ],
        );
        let gender = text_code(
            legacy.gender.as_deref(),
            &[("male", Gender::Male), ("female", Gender::Female)],
        );
        let status = text_code(
            legacy.status.as_deref(),
            &[("active", MemberStatus::Active), ("departed", MemberStatus::Departed)],
        );

        LabUser {
            id: legacy.user_id,
            username: legacy
                .username
                .unwrap_or_else(|| legacy.real_name.clone()),
            real_name: Some(legacy.real_name),
            english_name: legacy.english_name,
            student_number: legacy.student_number,
            gender,
            identity,
            academic_status,
            research_area: legacy.research_area,
            phone: legacy.phone,
            email: legacy.email,
            status,
            is_active: true,
            enrollment_year: legacy.enrollment_year,
            graduation_year: legacy.graduation_year,
            graduation_dest: legacy.graduation_dest,
            photo: legacy.photo,
            resume: None,
            homepage_url: legacy.homepage_url,
            orcid: legacy.orcid,
            create_time: None,
            update_time: None,
        }
    }
}

/// A user list row in either the current or the legacy shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UserRow {
    Current(LabUser),
    Legacy(LegacyUser),
}

impl From<UserRow> for LabUser {
    fn from(row: UserRow) -> Self {
        match row {
            UserRow::Current(user) => user,
            UserRow::Legacy(legacy) => legacy.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProjectAuthor {
    pub name: String,
    #[serde(default)]
    pub author_order: Option<i32>,
}

/// A row of the old `/lab/projects` listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyProject {
    pub id: DbId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub project_type: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_start_date: Option<String>,
    #[serde(default)]
    pub project_end_date: Option<String>,
    #[serde(default)]
    pub authors: Vec<LegacyProjectAuthor>,
    #[serde(default, deserialize_with = "lenient::opt_f64")]
    pub funding_amount: Option<f64>,
    /// 1 when published.
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub status: Option<i32>,
    #[serde(default)]
    pub url: Option<String>,
}

impl From<LegacyProject> for Achievement {
    fn from(legacy: LegacyProject) -> Self {
        let project_id = legacy.id;
        let authors = legacy
            .authors
            .into_iter()
            .enumerate()
            .map(|(idx, a)| Author {
                id: 0,
                achievement_id: project_id,
                user_id: None,
                name: Some(a.name),
                name_en: None,
                email: None,
                affiliation: None,
                author_order: a.author_order.unwrap_or(idx as i32 + 1),
                is_corresponding: false,
                role: None,
                visible: true,
                is_internal: false,
                create_time: None,
                update_time: None,
            })
            .collect();

        Achievement {
            id: legacy.id,
            title: legacy.title,
            title_en: None,
            description: legacy.description,
            keywords: None,
            kind: AchievementKind::Project,
            type_desc: None,
            paper_type: None,
            paper_type_desc: None,
            project_type: legacy
                .project_type
                .and_then(|c| ProjectType::try_from(c).ok()),
            project_type_desc: None,
            category_id: None,
            category_desc: None,
            venue: None,
            publish_date: None,
            project_start_date: legacy.project_start_date,
            project_end_date: legacy.project_end_date,
            reference: None,
            link_url: legacy.url,
            git_url: None,
            homepage_url: None,
            pdf_url: None,
            doi: None,
            funding_amount: legacy.funding_amount,
            owner_user_id: None,
            owner_user_name: None,
            published: legacy.status == Some(1),
            is_verified: false,
            my_visibility: None,
            authors,
            related_papers: Vec::new(),
            extra: None,
            create_time: None,
            update_time: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn v2_drops_type_discriminator() {
        let payload = AchievementWrite {
            title: Some("X".into()),
            kind: Some(AchievementKind::Project),
            category_id: Some(21),
            ..AchievementWrite::default()
        };
        let v1 = encode_achievement_write(&payload, SchemaVersion::V1).unwrap();
        let v2 = encode_achievement_write(&payload, SchemaVersion::V2).unwrap();
        assert_eq!(v1["type"], 2);
        assert!(v2.get("type").is_none());
        assert_eq!(v2["categoryId"], 21);
        assert!(v2.get("venue").is_none());
        assert_eq!(SchemaVersion::V2.write_base(), "/v2/lab/achievements");
    }

    #[test]
    fn user_rows_decode_either_shape() {
        let rows: Vec<UserRow> = serde_json::from_value(json!([
            {"id": 1, "username": "admin", "identity": 1},
            {"user_id": 9, "real_name": "Li Si", "identity": "teacher",
             "academic_status": "2", "phone": 13900000000u64}
        ]))
        .unwrap();
        let users: Vec<LabUser> = rows.into_iter().map(LabUser::from).collect();
        assert_eq!(users[0].identity, Identity::Admin);
        assert_eq!(users[1].id, 9);
        assert_eq!(users[1].identity, Identity::Teacher);
        assert_eq!(users[1].academic_status, Some(AcademicStatus::AssociateProfessor));
        assert_eq!(users[1].phone.as_deref(), Some("13900000000"));
        assert_eq!(users[1].username, "Li Si");
    }

    #[test]
    fn legacy_project_maps_url_and_funding() {
        let legacy: LegacyProject = serde_json::from_value(json!({
            "id": 5, "title": "P", "projectType": 2, "fundingAmount": "12.5",
            "status": 1, "url": "https://example.org",
            "authors": [{"name": "Wang"}, {"name": "Li"}]
        }))
        .unwrap();
        let achievement = Achievement::from(legacy);
        assert_eq!(achievement.kind, AchievementKind::Project);
        assert_eq!(achievement.funding_amount, Some(12.5));
        assert_eq!(achievement.link_url.as_deref(), Some("https://example.org"));
        assert!(achievement.published);
        assert_eq!(achievement.authors[1].author_order, 2);
    }
}
