//! Client-side validation report types and shared field rules.
//!
//! Forms derive [`validator::Validate`]; [`ValidationReport`] flattens the
//! nested `ValidationErrors` tree into one violation per field path so a
//! dialog can show messages next to the offending inputs. The pattern
//! rules below mirror the backend's own bean-validation constraints.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Key under which struct-level rules report their violations.
pub const STRUCT_LEVEL: &str = "__all__";

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted field path, e.g. `title` or `authors[1].name`.
    pub field: String,
    /// Rule code, e.g. `length`, `required`, `phone`.
    pub rule: String,
    pub message: String,
}

/// Aggregated result of validating one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations attached to one field path.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.violations.iter().filter(move |v| v.field == field)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    /// First message, for a one-line notification.
    pub fn summary(&self) -> String {
        match self.violations.as_slice() {
            [] => String::new(),
            [only] => only.message.clone(),
            [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl From<ValidationErrors> for ValidationReport {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations = Vec::new();
        flatten(&errors, "", &mut violations);
        violations.sort_by(|a, b| a.field.cmp(&b.field).then(a.rule.cmp(&b.rule)));
        Self { violations }
    }
}

fn flatten(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else if *field == STRUCT_LEVEL {
            prefix.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| FieldViolation {
                    field: path.clone(),
                    rule: e.code.to_string(),
                    message: message_of(e),
                }));
            }
            ValidationErrorsKind::Struct(inner) => flatten(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    flatten(inner, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("failed rule '{}'", error.code))
}

/// Build a [`ValidationError`] with a fixed code and message.
pub fn violation(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

// ---------------------------------------------------------------------------
// Shared patterns
// ---------------------------------------------------------------------------

pub static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("static regex"));

/// Mainland mobile numbers.
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1[3-9]\d{9}$").expect("static regex"));

pub static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static regex")
});

/// Empty, or an absolute http(s) link.
pub static HTTP_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://.+)?$").expect("static regex"));

pub static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("static regex"));

pub static YEAR_MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("static regex"));

pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(value) {
        Ok(())
    } else {
        Err(violation(
            "username",
            "Username may only contain letters, digits and underscores",
        ))
    }
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(violation("phone", "Invalid mobile phone number"))
    }
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(violation("email", "Invalid email address"))
    }
}

pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    if HTTP_URL_RE.is_match(value) {
        Ok(())
    } else {
        Err(violation(
            "http_url",
            "Links must start with http:// or https://",
        ))
    }
}

pub fn validate_year(value: &str) -> Result<(), ValidationError> {
    if YEAR_RE.is_match(value) {
        Ok(())
    } else {
        Err(violation("year", "Expected a four-digit year (YYYY)"))
    }
}

pub fn validate_year_month(value: &str) -> Result<(), ValidationError> {
    if YEAR_MONTH_RE.is_match(value) {
        Ok(())
    } else {
        Err(violation("year_month", "Expected a month in YYYY-MM form"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Inner {
        #[validate(length(min = 2, message = "name too short"))]
        name: String,
    }

    #[derive(Validate)]
    struct Outer {
        #[validate(required(message = "title is required"))]
        title: Option<String>,
        #[validate(nested)]
        items: Vec<Inner>,
    }

    #[test]
    fn flattens_nested_list_errors() {
        let form = Outer {
            title: None,
            items: vec![
                Inner { name: "ok".into() },
                Inner { name: "x".into() },
            ],
        };
        let report = ValidationReport::from(form.validate().unwrap_err());
        assert!(!report.is_valid());
        assert!(report.has_field("title"));
        assert!(report.has_field("items[1].name"));
        assert!(!report.has_field("items[0].name"));
        assert_eq!(report.violations.len(), 2);
    }

    #[derive(Validate)]
    #[validate(schema(function = "check_span"))]
    struct Span {
        start: i32,
        end: i32,
    }

    fn check_span(span: &Span) -> Result<(), ValidationError> {
        if span.end < span.start {
            return Err(violation("span", "end precedes start"));
        }
        Ok(())
    }

    #[derive(Validate)]
    struct Plan {
        #[validate(nested)]
        span: Span,
    }

    #[test]
    fn struct_level_errors_attach_to_owner() {
        let top = Span { start: 5, end: 1 }.validate().unwrap_err();
        assert!(ValidationReport::from(top).has_field(STRUCT_LEVEL));

        let nested = Plan {
            span: Span { start: 5, end: 1 },
        }
        .validate()
        .unwrap_err();
        let report = ValidationReport::from(nested);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].field, "span");
        assert_eq!(report.violations[0].message, "end precedes start");
    }

    #[test]
    fn summary_mentions_remaining_count() {
        let report = ValidationReport {
            violations: vec![
                FieldViolation {
                    field: "a".into(),
                    rule: "required".into(),
                    message: "a is required".into(),
                },
                FieldViolation {
                    field: "b".into(),
                    rule: "required".into(),
                    message: "b is required".into(),
                },
            ],
        };
        assert_eq!(report.summary(), "a is required (and 1 more)");
    }

    #[test]
    fn pattern_rules() {
        assert!(validate_phone("13812345678").is_ok());
        assert!(validate_phone("12812345678").is_err());
        assert!(validate_username("lab_admin01").is_ok());
        assert!(validate_username("lab admin").is_err());
        assert!(validate_http_url("https://example.org").is_ok());
        assert!(validate_http_url("ftp://example.org").is_err());
        assert!(validate_year_month("2024-13").is_err());
        assert!(validate_year_month("2024-09").is_ok());
        assert!(validate_year("24").is_err());
        assert!(validate_email("a.b@lab.edu.cn").is_ok());
    }
}
