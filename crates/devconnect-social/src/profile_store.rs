//! Profile storage.

use devconnect_auth::CredentialStore;
use devconnect_storage::{Collection, DocumentBackend};
use devconnect_types::{EntryId, UserId};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::{Result, SocialError};
use crate::profile::{NewEducation, NewExperience, Profile, ProfilePatch};

const PROFILES: &str = "profiles";

/// Stores one profile per user, keyed by the owner's ID.
#[derive(Debug)]
pub struct ProfileStore {
    profiles: Collection<Profile>,
    /// Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl ProfileStore {
    /// Create a store on top of a document backend.
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            profiles: Collection::new(backend, PROFILES),
            write_lock: Mutex::new(()),
        }
    }

    /// Get the profile of the authenticated user.
    pub fn get_own(&self, user_id: UserId) -> Result<Profile> {
        self.get_by_user_id(user_id)
    }

    /// Get a user's profile.
    pub fn get_by_user_id(&self, user_id: UserId) -> Result<Profile> {
        self.profiles
            .get(&user_id.to_string())?
            .ok_or(SocialError::ProfileNotFound { user_id })
    }

    /// List all profiles.
    pub fn list_all(&self) -> Result<Vec<Profile>> {
        let mut profiles = self.profiles.all()?;
        profiles.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(profiles)
    }

    /// Create or update a user's profile.
    pub fn upsert(&self, user_id: UserId, patch: &ProfilePatch) -> Result<Profile> {
        let _guard = self.write_lock.lock();

        let key = user_id.to_string();
        let (mut profile, created) = match self.profiles.get(&key)? {
            Some(profile) => (profile, false),
            None => (Profile::new(user_id), true),
        };
        patch.apply(&mut profile);
        self.profiles.insert(&key, &profile)?;

        tracing::info!(user_id = %user_id, created, "Profile saved");
        Ok(profile)
    }

    /// Add an experience entry at the front of the history.
    pub fn add_experience(&self, user_id: UserId, entry: NewExperience) -> Result<Profile> {
        let entry = entry.into_entry()?;
        self.update(user_id, |profile| profile.experience.insert(0, entry))
    }

    /// Remove an experience entry. Unknown entry IDs are ignored.
    pub fn remove_experience(&self, user_id: UserId, entry_id: EntryId) -> Result<Profile> {
        self.update(user_id, |profile| {
            profile.experience.retain(|e| e.id != entry_id)
        })
    }

    /// Add an education entry at the front of the history.
    pub fn add_education(&self, user_id: UserId, entry: NewEducation) -> Result<Profile> {
        let entry = entry.into_entry()?;
        self.update(user_id, |profile| profile.education.insert(0, entry))
    }

    /// Remove an education entry. Unknown entry IDs are ignored.
    pub fn remove_education(&self, user_id: UserId, entry_id: EntryId) -> Result<Profile> {
        self.update(user_id, |profile| {
            profile.education.retain(|e| e.id != entry_id)
        })
    }

    /// Delete a user's profile and account.
    ///
    /// The user's posts are left in place.
    pub fn delete_own(&self, user_id: UserId, credentials: &CredentialStore) -> Result<()> {
        {
            let _guard = self.write_lock.lock();
            self.profiles.remove(&user_id.to_string())?;
        }
        credentials.delete(user_id)?;

        tracing::info!(user_id = %user_id, "Profile and account deleted");
        Ok(())
    }

    fn update<F>(&self, user_id: UserId, f: F) -> Result<Profile>
    where
        F: FnOnce(&mut Profile),
    {
        let _guard = self.write_lock.lock();

        let key = user_id.to_string();
        let mut profile = self
            .profiles
            .get(&key)?
            .ok_or(SocialError::ProfileNotFound { user_id })?;
        f(&mut profile);
        self.profiles.insert(&key, &profile)?;

        tracing::debug!(
            user_id = %user_id,
            experience = profile.experience.len(),
            education = profile.education.len(),
            "Profile entries updated"
        );
        Ok(profile)
    }
}
