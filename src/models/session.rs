use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A live session: proof that one browsing context has authenticated.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    /// The ID of the user this session belongs to.
    pub user_id: Uuid,
    /// The timestamp when the session was issued.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Whether the session has passed its expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// The authenticated context resolved by the access guard.
///
/// Attached to the request extensions before a protected handler runs, so
/// handlers receive a validated identity instead of looking one up from
/// ambient state.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The session token the request presented.
    pub token: String,
}
