use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The address the server binds to.
    pub host: String,
    /// The port the server binds to.
    pub port: u16,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The server-side path of the protected download.
    pub download_file: PathBuf,
    /// The directory public assets are served from.
    pub static_dir: PathBuf,
    /// Whether session cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid PORT")?,
            session_duration_days: env::var("SESSION_DURATION_DAYS")
                .unwrap_or_else(|_| "7".to_string())
                .parse()
                .context("Invalid SESSION_DURATION_DAYS")?,
            download_file: env::var("DOWNLOAD_FILE")
                .unwrap_or_else(|_| "private/cheat_sheet.pdf".to_string())
                .into(),
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string())
                .into(),
            cookie_secure: env::var("APP_ENV")
                .unwrap_or_else(|_| "development".to_string())
                == "production",
        })
    }
}
