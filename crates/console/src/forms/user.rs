use labadmin_client::models::user::{CreateUserRequest, LabUser, UpdateUserRequest};
use labadmin_core::codes::{AcademicStatus, Gender, Identity, MemberStatus};
use labadmin_core::form::is_blank;
use labadmin_core::validation::{
    validate_email, validate_http_url, validate_phone, validate_username, FieldViolation,
    ValidationReport,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::required;
use crate::error::ControllerResult;
use crate::resource::{DialogForm, DialogMode};

/// Create/edit dialog on the user management screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    #[validate(length(max = 50, message = "Student number must be at most 50 characters"))]
    pub student_number: Option<String>,
    #[validate(
        required(message = "Username is required"),
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        custom(function = "validate_username")
    )]
    pub username: Option<String>,
    #[validate(
        required(message = "Real name is required"),
        length(max = 50, message = "Real name must be at most 50 characters")
    )]
    pub real_name: Option<String>,
    #[validate(length(max = 100, message = "English name must be at most 100 characters"))]
    pub english_name: Option<String>,
    /// Only sent on create; password resets have their own endpoint.
    #[validate(length(min = 6, max = 20, message = "Password must be 6-20 characters"))]
    pub password: Option<String>,
    pub gender: Option<Gender>,
    #[validate(required(message = "Identity is required"))]
    pub identity: Option<Identity>,
    pub academic_status: Option<AcademicStatus>,
    #[validate(length(max = 1000, message = "Research area must be at most 1000 characters"))]
    pub research_area: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    #[validate(
        length(max = 100, message = "Email must be at most 100 characters"),
        custom(function = "validate_email")
    )]
    pub email: Option<String>,
    pub status: Option<MemberStatus>,
    pub is_active: Option<bool>,
    #[validate(range(min = 1900, max = 2100, message = "Enrollment year is out of range"))]
    pub enrollment_year: Option<i32>,
    #[validate(range(min = 1900, max = 2100, message = "Graduation year is out of range"))]
    pub graduation_year: Option<i32>,
    #[validate(length(max = 255, message = "Destination must be at most 255 characters"))]
    pub graduation_dest: Option<String>,
    #[validate(length(max = 5000, message = "Resume must be at most 5000 characters"))]
    pub resume: Option<String>,
    #[validate(
        length(max = 255, message = "Homepage must be at most 255 characters"),
        custom(function = "validate_http_url")
    )]
    pub homepage_url: Option<String>,
    #[validate(length(max = 50, message = "ORCID must be at most 50 characters"))]
    pub orcid: Option<String>,
}

/// Users are created and edited through different request bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum UserPayload {
    Create(CreateUserRequest),
    Update(UpdateUserRequest),
}

impl DialogForm for UserForm {
    type Record = LabUser;
    type Payload = UserPayload;

    fn for_create(_session: &labadmin_core::session::SessionContext) -> Self {
        Self {
            identity: Some(Identity::Student),
            status: Some(MemberStatus::Active),
            is_active: Some(true),
            ..Self::default()
        }
    }

    fn from_record(record: &LabUser) -> Self {
        Self {
            student_number: record.student_number.clone(),
            username: Some(record.username.clone()),
            real_name: record.real_name.clone(),
            english_name: record.english_name.clone(),
            password: None,
            gender: record.gender,
            identity: Some(record.identity),
            academic_status: record.academic_status,
            research_area: record.research_area.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            status: record.status,
            is_active: Some(record.is_active),
            enrollment_year: record.enrollment_year,
            graduation_year: record.graduation_year,
            graduation_dest: record.graduation_dest.clone(),
            resume: record.resume.clone(),
            homepage_url: record.homepage_url.clone(),
            orcid: record.orcid.clone(),
        }
    }

    fn check(&self, mode: DialogMode) -> ValidationReport {
        let mut report = match self.validate() {
            Ok(()) => ValidationReport::default(),
            Err(errors) => errors.into(),
        };
        if mode.is_create() && is_blank(self.password.as_deref()) {
            report.violations.push(FieldViolation {
                field: "password".to_string(),
                rule: "required".to_string(),
                message: "Password is required".to_string(),
            });
        }
        report
    }

    fn into_payload(self, mode: DialogMode) -> ControllerResult<UserPayload> {
        match mode {
            DialogMode::Create => Ok(UserPayload::Create(CreateUserRequest {
                student_number: self.student_number,
                username: required(self.username, "username")?,
                real_name: required(self.real_name, "real_name")?,
                english_name: self.english_name,
                password: required(self.password, "password")?,
                gender: self.gender,
                identity: required(self.identity, "identity")?,
                academic_status: self.academic_status,
                research_area: self.research_area,
                phone: self.phone,
                email: self.email,
                status: self.status,
                enrollment_year: self.enrollment_year,
                graduation_year: self.graduation_year,
                graduation_dest: self.graduation_dest,
                resume: self.resume,
                homepage_url: self.homepage_url,
                orcid: self.orcid,
                is_active: self.is_active,
            })),
            DialogMode::Edit(_) => Ok(UserPayload::Update(UpdateUserRequest {
                student_number: self.student_number,
                real_name: self.real_name,
                english_name: self.english_name,
                gender: self.gender,
                identity: self.identity,
                academic_status: self.academic_status,
                status: self.status,
                is_active: self.is_active,
                phone: self.phone,
                email: self.email,
                research_area: self.research_area,
                enrollment_year: self.enrollment_year,
                graduation_year: self.graduation_year,
                graduation_dest: self.graduation_dest,
                resume: self.resume,
                homepage_url: self.homepage_url,
                orcid: self.orcid,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use labadmin_core::session::SessionContext;

    fn valid() -> UserForm {
        UserForm {
            username: Some("zhang3".into()),
            real_name: Some("Zhang San".into()),
            password: Some("secret1".into()),
            identity: Some(Identity::Student),
            ..UserForm::default()
        }
    }

    #[test]
    fn password_required_only_on_create() {
        let form = UserForm {
            password: None,
            ..valid()
        };
        assert!(form.check(DialogMode::Create).has_field("password"));
        assert!(form.check(DialogMode::Edit(4)).is_valid());
    }

    #[test]
    fn pattern_rules() {
        let form = UserForm {
            username: Some("bad name!".into()),
            phone: Some("12345".into()),
            email: Some("nope".into()),
            ..valid()
        };
        let report = form.check(DialogMode::Create);
        for field in ["username", "phone", "email"] {
            assert!(report.has_field(field), "expected violation on {field}");
        }
    }

    #[test]
    fn payload_depends_on_mode() {
        assert_matches!(
            valid().into_payload(DialogMode::Create),
            Ok(UserPayload::Create(req)) if req.username == "zhang3"
        );
        assert_matches!(
            valid().into_payload(DialogMode::Edit(4)),
            Ok(UserPayload::Update(req)) if req.real_name.as_deref() == Some("Zhang San")
        );
        let fresh = UserForm::for_create(&SessionContext::anonymous());
        assert_eq!(fresh.identity, Some(Identity::Student));
    }
}
