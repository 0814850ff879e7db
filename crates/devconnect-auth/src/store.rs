//! Credential store backed by the document store.

use devconnect_storage::{Collection, DocumentBackend};
use devconnect_types::UserId;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::error::{AuthError, Result};
use crate::password::{hash_password, verify_password};
use crate::user::{normalize_email, PublicUser, User};

const USERS: &str = "users";
const USER_EMAILS: &str = "user_emails";

/// Checked against on unknown emails so both login failures cost one verify.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("devconnect").ok());

/// Persists user accounts and checks their credentials.
#[derive(Debug)]
pub struct CredentialStore {
    /// Users by ID.
    users: Collection<User>,
    /// Normalized email to user ID index.
    emails: Collection<UserId>,
    /// Serializes the duplicate check and insert of a registration.
    register_lock: Mutex<()>,
}

impl CredentialStore {
    /// Create a store on top of a document backend.
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self {
            users: Collection::new(Arc::clone(&backend), USERS),
            emails: Collection::new(backend, USER_EMAILS),
            register_lock: Mutex::new(()),
        }
    }

    /// Register a new user.
    ///
    /// The avatar is derived from the email and the password is stored only
    /// as a salted hash.
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<PublicUser> {
        let email = normalize_email(email);

        // Cheap rejection before paying for the hash.
        if self.emails.get(&email)?.is_some() {
            return Err(AuthError::DuplicateUser(email));
        }

        let password_hash = hash_password(password)?;
        let user = User::new(name.trim().to_string(), email.clone(), password_hash);

        let _guard = self.register_lock.lock();
        if self.emails.get(&email)?.is_some() {
            return Err(AuthError::DuplicateUser(email));
        }

        // Roll the index entry back if the user write fails.
        self.emails.insert(&email, &user.id)?;
        if let Err(e) = self.users.insert(&user.id.to_string(), &user) {
            if let Err(cleanup) = self.emails.remove(&email) {
                tracing::error!(error = %cleanup, "Failed to roll back email index");
            }
            return Err(e.into());
        }

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.to_public())
    }

    /// Get a user, including the password hash, by email.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let Some(id) = self.emails.get(&normalize_email(email))? else {
            return Ok(None);
        };
        Ok(self.users.get(&id.to_string())?)
    }

    /// Get a user by ID, without the password hash.
    pub fn find_by_id(&self, id: UserId) -> Result<Option<PublicUser>> {
        Ok(self.users.get(&id.to_string())?.map(|u| u.to_public()))
    }

    /// Check a plaintext password against a stored hash.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        verify_password(password, hash)
    }

    /// Check an email/password pair.
    ///
    /// Unknown emails and wrong passwords fail with the same error.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<PublicUser> {
        let Some(user) = self.find_by_email(email)? else {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                verify_password(password, hash);
            }
            return Err(AuthError::InvalidCredentials);
        };

        if !self.verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user.to_public())
    }

    /// Delete a user and its email index entry.
    pub fn delete(&self, id: UserId) -> Result<bool> {
        let Some(user) = self.users.get(&id.to_string())? else {
            return Ok(false);
        };

        self.emails.remove(&user.email)?;
        self.users.remove(&id.to_string())?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(true)
    }

    /// Count users.
    pub fn count(&self) -> Result<usize> {
        Ok(self.users.len()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use devconnect_storage::{MemoryBackend, Result as StorageResult, StorageError};

    fn store() -> CredentialStore {
        CredentialStore::new(Arc::new(MemoryBackend::new()))
    }

    /// Memory backend that rejects writes to one collection.
    struct FailingWrites {
        inner: MemoryBackend,
        collection: &'static str,
    }

    impl DocumentBackend for FailingWrites {
        fn put(&self, collection: &str, key: &str, document: &[u8]) -> StorageResult<()> {
            if collection == self.collection {
                return Err(StorageError::Backend("disk full".into()));
            }
            self.inner.put(collection, key, document)
        }

        fn get(&self, collection: &str, key: &str) -> StorageResult<Option<Bytes>> {
            self.inner.get(collection, key)
        }

        fn delete(&self, collection: &str, key: &str) -> StorageResult<bool> {
            self.inner.delete(collection, key)
        }

        fn list(&self, collection: &str) -> StorageResult<Vec<Bytes>> {
            self.inner.list(collection)
        }
    }

    #[test]
    fn test_register_and_find() {
        let store = store();

        let user = store.register("Alice", "a@x.com", "secret1").unwrap();
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "a@x.com");
        assert_eq!(store.count().unwrap(), 1);

        let found = store.find_by_id(user.id).unwrap().unwrap();
        assert_eq!(found, user);

        let by_email = store.find_by_email("A@x.com").unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert_ne!(by_email.password_hash, "secret1");
    }

    #[test]
    fn test_duplicate_email() {
        let store = store();
        store.register("Alice", "a@x.com", "secret1").unwrap();

        let result = store.register("Other Alice", " A@X.COM", "secret2");
        assert!(matches!(result, Err(AuthError::DuplicateUser(_))));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_authenticate() {
        let store = store();
        let user = store.register("Alice", "a@x.com", "secret1").unwrap();

        assert_eq!(store.authenticate("a@x.com", "secret1").unwrap().id, user.id);
        assert!(matches!(
            store.authenticate("a@x.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            store.authenticate("nobody@x.com", "secret1"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_unknown_email_runs_a_verify() {
        let hash = DUMMY_HASH.as_deref().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!verify_password("secret1", hash));

        let store = store();
        assert!(matches!(
            store.authenticate("nobody@x.com", "devconnect"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_failed_user_write_leaves_no_index_entry() {
        let store = CredentialStore::new(Arc::new(FailingWrites {
            inner: MemoryBackend::new(),
            collection: USERS,
        }));

        let result = store.register("Alice", "a@x.com", "secret1");
        assert!(matches!(result, Err(AuthError::Storage(_))));
        assert!(store.emails.get("a@x.com").unwrap().is_none());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_delete() {
        let store = store();
        let user = store.register("Alice", "a@x.com", "secret1").unwrap();

        assert!(store.delete(user.id).unwrap());
        assert!(!store.delete(user.id).unwrap());
        assert!(store.find_by_id(user.id).unwrap().is_none());
        assert!(store.find_by_email("a@x.com").unwrap().is_none());

        // The email is free again.
        store.register("Alice", "a@x.com", "secret1").unwrap();
    }
}
