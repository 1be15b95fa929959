use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::user::User;

/// In-memory credential store.
///
/// Users live in a `HashMap` behind a `RwLock`, with a second map indexing
/// them by normalized email so lookups stay O(1). State lasts for the
/// lifetime of the process; there are no update or delete operations.
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    by_id: HashMap<Uuid, User>,
    id_by_email: HashMap<String, Uuid>,
}

/// Normalizes an email for storage and lookup: surrounding whitespace is
/// trimmed and ASCII letters are lowercased, so `Alice@Example.com` and
/// `alice@example.com` name the same account.
fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

impl UserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a user by email address.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| AppError::Internal("user store lock poisoned".to_string()))?;
        Ok(inner
            .id_by_email
            .get(&normalize_email(email))
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    /// Finds a user by ID.
    pub fn find_by_id(&self, user_id: &Uuid) -> Result<Option<User>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| AppError::Internal("user store lock poisoned".to_string()))?;
        Ok(inner.by_id.get(user_id).cloned())
    }

    /// Creates a new user.
    ///
    /// The duplicate check and the insert happen under a single write lock,
    /// so two concurrent registrations for the same email produce exactly
    /// one user and one `DuplicateEmail`.
    ///
    /// # Arguments
    ///
    /// * `email` - The login email; normalized before storage.
    /// * `name` - The display name.
    /// * `password_hash` - The already-hashed password, never the plaintext.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `User`.
    pub fn create(&self, email: &str, name: &str, password_hash: String) -> Result<User> {
        if password_hash.is_empty() {
            return Err(AppError::Internal(
                "refusing to store a user with an empty password hash".to_string(),
            ));
        }

        let normalized = normalize_email(email);
        let mut inner = self
            .inner
            .write()
            .map_err(|_| AppError::Internal("user store lock poisoned".to_string()))?;

        if inner.id_by_email.contains_key(&normalized) {
            return Err(AppError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: normalized.clone(),
            name: name.to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        inner.id_by_email.insert(normalized, user.id);
        inner.by_id.insert(user.id, user.clone());

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash() -> String {
        "$argon2id$v=19$m=19456,t=3,p=4$c29tZXNhbHQ$digest".to_string()
    }

    #[test]
    fn create_and_find() {
        let store = UserStore::new();

        let user = store.create("alice@example.com", "alice", hash()).unwrap();

        let by_email = store.find_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.name, "alice");

        let by_id = store.find_by_id(&user.id).unwrap().unwrap();
        assert_eq!(by_id.email, "alice@example.com");
    }

    #[test]
    fn find_unknown_email_is_none() {
        let store = UserStore::new();
        assert!(store.find_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = UserStore::new();
        store.create("alice@example.com", "alice", hash()).unwrap();

        let err = store
            .create("alice@example.com", "other alice", hash())
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));

        // The first registration is untouched.
        let user = store.find_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(user.name, "alice");
    }

    #[test]
    fn emails_are_normalized() {
        let store = UserStore::new();
        store
            .create("  Alice@Example.Com ", "alice", hash())
            .unwrap();

        assert!(
            store
                .find_by_email("alice@example.com")
                .unwrap()
                .is_some()
        );
        let err = store
            .create("ALICE@EXAMPLE.COM", "alice again", hash())
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
    }

    #[test]
    fn empty_password_hash_is_refused() {
        let store = UserStore::new();
        let err = store
            .create("alice@example.com", "alice", String::new())
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(store.find_by_email("alice@example.com").unwrap().is_none());
    }

    #[test]
    fn concurrent_registration_has_one_winner() {
        let store = UserStore::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.create("race@example.com", &format!("racer {i}"), hash())
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(AppError::DuplicateEmail)))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 7);
    }
}
