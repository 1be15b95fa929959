use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents a registered account.
#[derive(Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: Uuid,
    /// The user's email address, stored in normalized form.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// The Argon2 PHC string for the user's password.
    pub password_hash: String,
    /// The timestamp when the user registered.
    pub created_at: DateTime<Utc>,
}
