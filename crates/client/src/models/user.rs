//! Lab user DTOs (`/lab/users/crud`).

use labadmin_core::codes::{AcademicStatus, Gender, Identity, MemberStatus};
use labadmin_core::session::CurrentUser;
use labadmin_core::types::DbId;
use serde::{Deserialize, Serialize};

use super::lenient;

/// A lab member row as listed by the admin user screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabUser {
    pub id: DbId,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub student_number: Option<String>,
    pub username: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    pub identity: Identity,
    #[serde(default)]
    pub academic_status: Option<AcademicStatus>,
    #[serde(default)]
    pub research_area: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<MemberStatus>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub enrollment_year: Option<i32>,
    #[serde(default, deserialize_with = "lenient::opt_i32")]
    pub graduation_year: Option<i32>,
    #[serde(default)]
    pub graduation_dest: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub homepage_url: Option<String>,
    #[serde(default)]
    pub orcid: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}

fn default_true() -> bool {
    true
}

impl LabUser {
    /// Name shown in tables: real name, else username.
    pub fn display_name(&self) -> &str {
        self.real_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }

    /// Identity-aware status wording.
    pub fn status_label(&self) -> &'static str {
        self.status
            .map(|s| s.label_for(Some(self.identity)))
            .unwrap_or("-")
    }
}

/// The signed-in user's own profile (`GET /lab/users/profile`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: LabUser,
    #[serde(default)]
    pub gender_desc: Option<String>,
    #[serde(default)]
    pub identity_desc: Option<String>,
    #[serde(default)]
    pub academic_status_desc: Option<String>,
    #[serde(default)]
    pub status_desc: Option<String>,
}

impl From<&UserProfile> for CurrentUser {
    fn from(profile: &UserProfile) -> Self {
        CurrentUser {
            id: profile.user.id,
            username: profile.user.username.clone(),
            real_name: profile.user.real_name.clone(),
            identity: profile.user.identity,
        }
    }
}

/// Compact user entry returned by keyword search (author pickers).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: DbId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub english_name: Option<String>,
}

/// Filters for `GET /lab/users/crud/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub username: Option<String>,
    pub real_name: Option<String>,
    pub english_name: Option<String>,
    pub identity: Option<Identity>,
    pub academic_status: Option<AcademicStatus>,
    pub gender: Option<Gender>,
    pub status: Option<MemberStatus>,
    pub is_active: Option<bool>,
    /// Matches real name, username or email.
    pub keyword: Option<String>,
}

/// Body of `POST /lab/users/crud`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub student_number: Option<String>,
    pub username: String,
    pub real_name: String,
    pub english_name: Option<String>,
    pub password: String,
    pub gender: Option<Gender>,
    pub identity: Identity,
    pub academic_status: Option<AcademicStatus>,
    pub research_area: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<MemberStatus>,
    pub enrollment_year: Option<i32>,
    pub graduation_year: Option<i32>,
    pub graduation_dest: Option<String>,
    pub resume: Option<String>,
    pub homepage_url: Option<String>,
    pub orcid: Option<String>,
    pub is_active: Option<bool>,
}

/// Body of `PUT /lab/users/crud/{id}` (administrator edit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub student_number: Option<String>,
    pub real_name: Option<String>,
    pub english_name: Option<String>,
    pub gender: Option<Gender>,
    pub identity: Option<Identity>,
    pub academic_status: Option<AcademicStatus>,
    pub status: Option<MemberStatus>,
    pub is_active: Option<bool>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub research_area: Option<String>,
    pub enrollment_year: Option<i32>,
    pub graduation_year: Option<i32>,
    pub graduation_dest: Option<String>,
    pub resume: Option<String>,
    pub homepage_url: Option<String>,
    pub orcid: Option<String>,
}

/// Body of `PUT /lab/users/crud/profile` (self-service edit).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub real_name: String,
    pub english_name: Option<String>,
    pub student_number: Option<String>,
    pub gender: Option<Gender>,
    pub academic_status: Option<AcademicStatus>,
    pub research_area: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub status: Option<MemberStatus>,
    pub enrollment_year: Option<i32>,
    pub graduation_year: Option<i32>,
    pub graduation_dest: Option<String>,
    pub resume: Option<String>,
    pub homepage_url: Option<String>,
    pub orcid: Option<String>,
}

/// Body of `PUT /lab/users/crud/password` (self-service).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Body of `PUT /lab/users/crud/{id}/password` (administrator reset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub user_id: DbId,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_list_row_with_numeric_strings() {
        let user: LabUser = serde_json::from_value(json!({
            "id": 4,
            "studentNumber": 2021001,
            "username": "zhang3",
            "realName": "Zhang San",
            "identity": 3,
            "status": 1,
            "enrollmentYear": "2021",
            "phone": 13800000000u64
        }))
        .unwrap();
        assert_eq!(user.student_number.as_deref(), Some("2021001"));
        assert_eq!(user.enrollment_year, Some(2021));
        assert_eq!(user.phone.as_deref(), Some("13800000000"));
        assert!(user.is_active);
        assert_eq!(user.status_label(), "Enrolled");
    }

    #[test]
    fn profile_converts_to_current_user() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 2,
            "username": "prof",
            "realName": "Prof. Wang",
            "identity": 2,
            "identityDesc": "Teacher"
        }))
        .unwrap();
        let current = CurrentUser::from(&profile);
        assert_eq!(current.identity, Identity::Teacher);
        assert_eq!(profile.identity_desc.as_deref(), Some("Teacher"));
    }
}
