use chrono::Duration;

use crate::config::Config;
use crate::error::Result;
use crate::repositories::session::SessionStore;
use crate::repositories::user::UserStore;
use crate::services::auth;

/// The application's state.
///
/// Every shared resource lives here, built once at startup and handed to
/// handlers through axum's `State` extractor. There are no ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// The credential store.
    pub users: UserStore,
    /// The session table.
    pub sessions: SessionStore,
    /// The application's configuration.
    pub config: Config,
    /// Hash verified against when login hits an unknown email, so the
    /// lookup outcome does not change how long the request takes.
    pub decoy_hash: String,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub fn new(config: &Config) -> Result<Self> {
        let users = UserStore::new();
        tracing::info!("✅ User store initialized");

        let sessions = SessionStore::new(Duration::days(config.session_duration_days));
        tracing::info!(
            "✅ Session table initialized (TTL: {} days)",
            config.session_duration_days
        );

        let decoy_hash = auth::hash_password("keyhole-decoy-password")?;
        tracing::info!("✅ Decoy hash computed");

        Ok(AppState {
            users,
            sessions,
            config: config.clone(),
            decoy_hash,
        })
    }
}
