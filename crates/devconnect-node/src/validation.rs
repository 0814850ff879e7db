//! # Input Validation
//!
//! Request bodies are deserialized and checked with `validator` before any
//! store is touched. Failures become a `400` listing each offending field:
//!
//! ```json
//! { "errors": [ { "msg": "Status is required", "param": "status" } ] }
//! ```
//!
//! Missing fields deserialize to their defaults so that they are reported as
//! validation failures rather than body rejections.

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use chrono::NaiveDate;
use devconnect_social::{NewEducation, NewExperience, ProfilePatch, SocialPatch};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::ApiError;

/// GitHub logins: alphanumerics and hyphens, not starting with a hyphen.
/// The empty string is accepted and means "not provided".
pub static GITHUB_USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-zA-Z0-9][a-zA-Z0-9-]{0,38})?$").expect("Invalid regex")
});

/// At least one non-whitespace character.
pub static NOT_BLANK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S").expect("Invalid regex"));

/// Field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Human-readable message.
    pub msg: String,
    /// Field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param: Option<String>,
}

impl FieldError {
    /// An error about a specific field.
    pub fn field(param: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: Some(param.into()),
        }
    }

    /// An error not tied to a field.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            param: None,
        }
    }
}

/// Flatten `ValidationErrors` into field errors, ordered by field name.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let msg = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{}'", field));
                FieldError::field(field.to_string(), msg)
            })
        })
        .collect()
}

/// JSON body extractor that runs `Validate` after deserializing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// `POST /api/users`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(regex(path = *NOT_BLANK_REGEX, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Please enter a password with 6 or more characters"))]
    pub password: String,
}

/// `POST /api/auth`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `POST /api/profile`
///
/// Optional fields that are absent or empty leave the stored value alone.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ProfileRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
    #[validate(length(min = 1, message = "Skills is required"))]
    pub skills: String,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    #[validate(regex(
        path = *GITHUB_USERNAME_REGEX,
        message = "Please include a valid GitHub username"
    ))]
    pub githubusername: Option<String>,
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl From<ProfileRequest> for ProfilePatch {
    fn from(req: ProfileRequest) -> Self {
        ProfilePatch {
            company: present(req.company),
            website: present(req.website),
            location: present(req.location),
            status: present(Some(req.status)),
            skills: Some(ProfilePatch::split_skills(&req.skills)),
            bio: present(req.bio),
            githubusername: present(req.githubusername),
            social: SocialPatch {
                youtube: present(req.youtube),
                twitter: present(req.twitter),
                facebook: present(req.facebook),
                linkedin: present(req.linkedin),
                instagram: present(req.instagram),
            },
        }
    }
}

/// `PUT /api/profile/experience`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ExperienceRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Company is required"))]
    pub company: String,
    pub location: Option<String>,
    #[validate(required(message = "From date is required"))]
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl From<ExperienceRequest> for NewExperience {
    fn from(req: ExperienceRequest) -> Self {
        NewExperience {
            title: req.title,
            company: req.company,
            location: present(req.location),
            from: req.from,
            to: req.to,
            current: req.current,
            description: present(req.description),
        }
    }
}

/// `PUT /api/profile/education`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EducationRequest {
    #[validate(length(min = 1, message = "School is required"))]
    pub school: String,
    #[validate(length(min = 1, message = "Degree is required"))]
    pub degree: String,
    #[validate(length(min = 1, message = "Field of study is required"))]
    pub fieldofstudy: String,
    #[validate(required(message = "From date is required"))]
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl From<EducationRequest> for NewEducation {
    fn from(req: EducationRequest) -> Self {
        NewEducation {
            school: req.school,
            degree: req.degree,
            fieldofstudy: req.fieldofstudy,
            from: req.from,
            to: req.to,
            current: req.current,
            description: present(req.description),
        }
    }
}

/// `POST /api/posts`
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct PostRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(errors: ValidationErrors) -> Vec<String> {
        field_errors(&errors)
            .into_iter()
            .filter_map(|e| e.param)
            .collect()
    }

    #[test]
    fn test_register_request() {
        let ok = RegisterRequest {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "secret1".into(),
        };
        assert!(ok.validate().is_ok());

        let bad = RegisterRequest {
            name: String::new(),
            email: "not-an-email".into(),
            password: "12345".into(),
        };
        assert_eq!(
            params(bad.validate().unwrap_err()),
            vec!["email", "name", "password"]
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        let req = RegisterRequest {
            name: "   ".into(),
            email: "alice@example.com".into(),
            password: "secret1".into(),
        };
        let errors = field_errors(&req.validate().unwrap_err());
        assert_eq!(errors, vec![FieldError::field("name", "Name is required")]);

        let req = RegisterRequest {
            name: " Alice ".into(),
            ..req
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_messages() {
        let bad = RegisterRequest {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "123".into(),
        };
        let errors = field_errors(&bad.validate().unwrap_err());
        assert_eq!(
            errors,
            vec![FieldError::field(
                "password",
                "Please enter a password with 6 or more characters"
            )]
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let req: ProfileRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(
            params(req.validate().unwrap_err()),
            vec!["skills", "status"]
        );

        let req: ExperienceRequest =
            serde_json::from_str(r#"{"title":"Dev","company":"Acme"}"#).unwrap();
        assert_eq!(params(req.validate().unwrap_err()), vec!["from"]);
    }

    #[test]
    fn test_github_username() {
        let mut req = ProfileRequest {
            status: "Developer".into(),
            skills: "rust".into(),
            githubusername: Some("alice-dev".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        req.githubusername = Some(String::new());
        assert!(req.validate().is_ok());

        req.githubusername = Some("../admin".into());
        assert_eq!(params(req.validate().unwrap_err()), vec!["githubusername"]);
    }

    #[test]
    fn test_profile_request_to_patch() {
        let req: ProfileRequest = serde_json::from_value(serde_json::json!({
            "status": "Developer",
            "skills": "rust, sql ,",
            "company": "",
            "bio": "hello",
            "twitter": "https://twitter.com/alice"
        }))
        .unwrap();

        let patch = ProfilePatch::from(req);
        assert_eq!(patch.status.as_deref(), Some("Developer"));
        assert_eq!(patch.skills, Some(vec!["rust".to_string(), "sql".to_string()]));
        assert_eq!(patch.company, None);
        assert_eq!(patch.bio.as_deref(), Some("hello"));
        assert_eq!(
            patch.social.twitter.as_deref(),
            Some("https://twitter.com/alice")
        );
    }

    #[test]
    fn test_experience_dates() {
        let req: ExperienceRequest = serde_json::from_value(serde_json::json!({
            "title": "Engineer",
            "company": "Acme",
            "from": "2020-01-15",
            "current": true
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let entry = NewExperience::from(req);
        assert_eq!(entry.from, NaiveDate::from_ymd_opt(2020, 1, 15));
        assert!(entry.current);
        assert_eq!(entry.to, None);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn github_logins_accepted(login in "[a-zA-Z0-9][a-zA-Z0-9-]{0,38}") {
                prop_assert!(GITHUB_USERNAME_REGEX.is_match(&login));
            }

            #[test]
            fn path_characters_rejected(
                prefix in "[a-z]{0,8}",
                sep in "[/.?#%]",
                suffix in "[a-z]{0,8}"
            ) {
                let login = format!("{prefix}{sep}{suffix}");
                prop_assert!(!GITHUB_USERNAME_REGEX.is_match(&login));
            }
        }
    }
}
