//! Profile types and sparse updates.

use chrono::NaiveDate;
use devconnect_types::{Author, EntryId, ProfileId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SocialError};

/// A developer profile.
///
/// The owner is generic so that stored profiles carry a bare user id while
/// read responses can embed the owner's public identity (see [`Profile::populate`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile<U = UserId> {
    #[serde(rename = "_id")]
    pub id: ProfileId,
    pub user: U,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub status: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub githubusername: Option<String>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub social: Social,
    #[serde(rename = "date")]
    pub created_at: Timestamp,
}

impl Profile {
    /// Creates an empty profile for a user.
    pub fn new(user: UserId) -> Self {
        Self {
            id: devconnect_types::new_id(),
            user,
            company: None,
            website: None,
            location: None,
            status: String::new(),
            skills: Vec::new(),
            bio: None,
            githubusername: None,
            experience: Vec::new(),
            education: Vec::new(),
            social: Social::default(),
            created_at: devconnect_types::now(),
        }
    }

    /// Replaces the owner id with the owner's public identity.
    ///
    /// `None` means the owning account no longer exists; it serializes as `null`.
    pub fn populate(self, author: Option<Author>) -> Profile<Option<Author>> {
        Profile {
            id: self.id,
            user: author,
            company: self.company,
            website: self.website,
            location: self.location,
            status: self.status,
            skills: self.skills,
            bio: self.bio,
            githubusername: self.githubusername,
            experience: self.experience,
            education: self.education,
            social: self.social,
            created_at: self.created_at,
        }
    }
}

/// A job in a profile's experience history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(rename = "_id")]
    pub id: EntryId,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A school in a profile's education history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    #[serde(rename = "_id")]
    pub id: EntryId,
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Social network links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Social {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// A new experience entry, before an id is assigned.
#[derive(Debug, Clone, Default)]
pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl NewExperience {
    pub(crate) fn into_entry(self) -> Result<Experience> {
        require("title", &self.title, "Title is required")?;
        require("company", &self.company, "Company is required")?;
        let from = self.from.ok_or(SocialError::Validation {
            field: "from",
            message: "From date is required",
        })?;

        Ok(Experience {
            id: devconnect_types::new_id(),
            title: self.title,
            company: self.company,
            location: self.location,
            from,
            to: self.to,
            current: self.current,
            description: self.description,
        })
    }
}

/// A new education entry, before an id is assigned.
#[derive(Debug, Clone, Default)]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub fieldofstudy: String,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub current: bool,
    pub description: Option<String>,
}

impl NewEducation {
    pub(crate) fn into_entry(self) -> Result<Education> {
        require("school", &self.school, "School is required")?;
        require("degree", &self.degree, "Degree is required")?;
        require("fieldofstudy", &self.fieldofstudy, "Field of study is required")?;
        let from = self.from.ok_or(SocialError::Validation {
            field: "from",
            message: "From date is required",
        })?;

        Ok(Education {
            id: devconnect_types::new_id(),
            school: self.school,
            degree: self.degree,
            fieldofstudy: self.fieldofstudy,
            from,
            to: self.to,
            current: self.current,
            description: self.description,
        })
    }
}

fn require(field: &'static str, value: &str, message: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SocialError::Validation { field, message });
    }
    Ok(())
}

/// Social link updates. `None` leaves the existing link untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialPatch {
    pub youtube: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub linkedin: Option<String>,
    pub instagram: Option<String>,
}

/// A sparse profile update.
///
/// Only fields that are `Some` are written; everything else keeps its
/// current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub skills: Option<Vec<String>>,
    pub bio: Option<String>,
    pub githubusername: Option<String>,
    pub social: SocialPatch,
}

impl ProfilePatch {
    /// Splits a comma-separated skills string into trimmed, non-empty entries.
    pub fn split_skills(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns true if the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the present fields into `profile`.
    pub fn apply(&self, profile: &mut Profile) {
        set(&mut profile.company, &self.company);
        set(&mut profile.website, &self.website);
        set(&mut profile.location, &self.location);
        set(&mut profile.bio, &self.bio);
        set(&mut profile.githubusername, &self.githubusername);
        if let Some(status) = &self.status {
            profile.status = status.clone();
        }
        if let Some(skills) = &self.skills {
            profile.skills = skills.clone();
        }

        let social = &mut profile.social;
        set(&mut social.youtube, &self.social.youtube);
        set(&mut social.twitter, &self.social.twitter);
        set(&mut social.facebook, &self.social.facebook);
        set(&mut social.linkedin, &self.social.linkedin);
        set(&mut social.instagram, &self.social.instagram);
    }
}

fn set(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}
