use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use base64::{Engine as _, engine::general_purpose};
use chrono::{Duration, Utc};
use rand::RngCore;
use rand::rngs::OsRng;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::session::SessionRecord;

/// The number of random bytes in a session token (256 bits).
const TOKEN_SIZE: usize = 32;

/// In-memory session table.
///
/// Tokens map to their `SessionRecord` behind a `RwLock`. Suitable for a
/// single-instance deployment; sessions are lost when the process restarts.
/// A session moves from valid to revoked (logout) or expired (TTL), and
/// neither terminal state ever turns back into valid.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates an empty session table whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    fn generate_token() -> String {
        let mut bytes = [0u8; TOKEN_SIZE];
        OsRng.fill_bytes(&mut bytes);
        general_purpose::URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Issues a new session bound to `user_id` and returns its token.
    pub fn issue(&self, user_id: Uuid) -> Result<String> {
        let token = Self::generate_token();
        let now = Utc::now();
        let record = SessionRecord {
            user_id,
            created_at: now,
            expires_at: now + self.ttl,
        };

        self.sessions
            .write()
            .map_err(|_| AppError::Internal("session table lock poisoned".to_string()))?
            .insert(token.clone(), record);

        Ok(token)
    }

    /// Resolves a token to its user.
    ///
    /// Returns `None` when the token is unknown, revoked, or expired.
    /// Expired records are dropped on contact.
    pub fn validate(&self, token: &str) -> Result<Option<Uuid>> {
        let now = Utc::now();
        {
            let sessions = self
                .sessions
                .read()
                .map_err(|_| AppError::Internal("session table lock poisoned".to_string()))?;
            match sessions.get(token) {
                None => return Ok(None),
                Some(record) if !record.is_expired(now) => return Ok(Some(record.user_id)),
                Some(_) => {}
            }
        }

        self.revoke(token)?;
        Ok(None)
    }

    /// Revokes a token. Idempotent; revoking an unknown token is a no-op.
    pub fn revoke(&self, token: &str) -> Result<()> {
        self.sessions
            .write()
            .map_err(|_| AppError::Internal("session table lock poisoned".to_string()))?
            .remove(token);
        Ok(())
    }

    /// Drops every expired session, returning how many were removed.
    pub fn prune_expired(&self) -> Result<usize> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| AppError::Internal("session table lock poisoned".to_string()))?;

        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired(now));

        Ok(before - sessions.len())
    }

    /// Returns the number of sessions currently stored.
    pub fn len(&self) -> usize {
        self.sessions.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if there are no sessions stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
