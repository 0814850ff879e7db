//! # Request Types
//!
//! Form bodies sent to the node. Empty optional fields are omitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registration form.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login form.
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Create-or-update profile form.
///
/// `skills` is the raw comma separated list as typed by the user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileForm {
    pub status: String,
    pub skills: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Add-experience form.
#[derive(Debug, Clone, Serialize)]
pub struct ExperienceForm {
    pub title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Add-education form.
#[derive(Debug, Clone, Serialize)]
pub struct EducationForm {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    pub current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body returned by register and login.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Body returned by operations that only report a message.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_form_omits_missing_fields() {
        let form = ProfileForm {
            status: "Developer".into(),
            skills: "rust, go".into(),
            twitter: Some("https://twitter.com/alice".into()),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&form).unwrap(),
            json!({
                "status": "Developer",
                "skills": "rust, go",
                "twitter": "https://twitter.com/alice"
            })
        );
    }

    #[test]
    fn test_experience_form_dates() {
        let form = ExperienceForm {
            title: "Engineer".into(),
            company: "Acme".into(),
            location: None,
            from: NaiveDate::from_ymd_opt(2020, 1, 15).unwrap(),
            to: None,
            current: true,
            description: None,
        };

        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["from"], "2020-01-15");
        assert!(value.get("to").is_none());
    }
}
