//! Admin credentials
//!
//! Single admin principal sourced from the environment. The plaintext
//! password is hashed with Argon2 at startup and dropped; login attempts
//! verify against the hash.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};

/// Verified admin principal
pub struct AdminCredentials {
    username: String,
    password_hash: String,
}

impl AdminCredentials {
    /// Hash the configured password and keep only the hash
    ///
    /// # Panics
    ///
    /// Panics when Argon2 hashing fails at startup (misconfiguration).
    pub fn new(username: &str, password: &str) -> Self {
        if password == "admin" {
            tracing::warn!("ADMIN_PASSWORD is the default value, change it outside development");
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .expect("Failed to hash admin password")
            .to_string();

        Self {
            username: username.to_string(),
            password_hash,
        }
    }

    /// Verify a login attempt
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }

        PasswordHash::new(&self.password_hash)
            .map(|hash| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &hash)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_accepts_correct_credentials() {
        let credentials = AdminCredentials::new("admin", "hunter2");
        assert!(credentials.verify("admin", "hunter2"));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let credentials = AdminCredentials::new("admin", "hunter2");
        assert!(!credentials.verify("admin", "hunter3"));
    }

    #[test]
    fn test_verify_rejects_wrong_username() {
        let credentials = AdminCredentials::new("admin", "hunter2");
        assert!(!credentials.verify("root", "hunter2"));
    }
}
