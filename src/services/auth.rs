use argon2::{
    Argon2, ParamsBuilder,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::error::{AppError, Result};
use crate::models::user::User;
use crate::state::AppState;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 4;

/// Hashes a password using Argon2id with a fresh random salt.
///
/// The salt and parameters travel inside the returned PHC string, so two
/// calls with the same password produce different outputs that both verify.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the hashed password.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Hash(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Hash(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Hash(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    tracing::debug!("Password hashed successfully with Argon2");
    Ok(password_hash)
}

/// Verifies a password against a stored hash.
///
/// The parameters and salt come from the PHC string itself, and the digest
/// comparison inside the verifier is constant-time. A malformed stored hash
/// verifies as `false`; callers cannot tell it apart from a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let mut password_bytes = password.as_bytes().to_vec();

    let result = match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(&password_bytes, &parsed)
            .is_ok(),
        Err(e) => {
            tracing::debug!("Stored hash failed to parse: {}", e);
            false
        }
    };

    password_bytes.zeroize();
    result
}

/// Registers a new user, hashing the password before anything is stored.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `email` - The login email.
/// * `name` - The display name.
/// * `password` - The plaintext password.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub fn register_user(state: &AppState, email: &str, name: &str, password: &str) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", email);
    let password_hash = hash_password(password)?;
    let user = state.users.create(email, name, password_hash)?;
    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(user)
}

/// Authenticates an email/password pair.
///
/// An unknown email and a wrong password both come back as
/// `InvalidCredentials`. When the email is unknown, the password is still
/// verified against a decoy hash so both failures cost the same work.
pub fn authenticate_user(state: &AppState, email: &str, password: &str) -> Result<User> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let user = match state.users.find_by_email(email)? {
        Some(user) => user,
        None => {
            let _ = verify_password(password, &state.decoy_hash);
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!("✅ User authenticated: {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::PathBuf;

    fn test_state() -> AppState {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            session_duration_days: 7,
            download_file: PathBuf::from("private/cheat_sheet.pdf"),
            static_dir: PathBuf::from("static"),
            cookie_secure: false,
        };
        AppState::new(&config).unwrap()
    }

    #[test]
    fn hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
    }

    #[test]
    fn salts_make_repeated_hashes_differ() {
        let first = hash_password("same password").unwrap();
        let second = hash_password("same password").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("same password", &first));
        assert!(verify_password("same password", &second));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("right password").unwrap();
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn malformed_hash_fails_quietly() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "$argon2id$truncated"));
    }

    #[test]
    fn register_then_authenticate() {
        let state = test_state();
        let user =
            register_user(&state, "alice@example.com", "alice", "SecurePass123").unwrap();

        let authed = authenticate_user(&state, "alice@example.com", "SecurePass123").unwrap();
        assert_eq!(authed.id, user.id);
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let state = test_state();
        register_user(&state, "alice@example.com", "alice", "SecurePass123").unwrap();

        let err = register_user(&state, "alice@example.com", "alice", "OtherPass456")
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateEmail));
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let state = test_state();
        register_user(&state, "alice@example.com", "alice", "SecurePass123").unwrap();

        let unknown_email =
            authenticate_user(&state, "nobody@example.com", "SecurePass123").unwrap_err();
        let wrong_password =
            authenticate_user(&state, "alice@example.com", "WrongPass999").unwrap_err();

        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert!(matches!(wrong_password, AppError::InvalidCredentials));
    }
}
