use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::role::Role;

/// User record held by the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,                   // e.g. "admin-1", "student-1718000000000"
    pub name: String,                 // display name
    pub email: String,                // lowercase login email
    pub role: Role,                   // platform role
    pub avatar: Option<String>,       // avatar URL, if any
    #[serde(skip_serializing)]
    pub password_hash: String,        // Argon2 hash, not exposed in JSON
}

impl User {
    /// Builds an account, salting and hashing `password` with Argon2.
    pub fn with_password(
        id: String,
        name: String,
        email: String,
        role: Role,
        password: &str,
    ) -> anyhow::Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| {
                error!(error = %e, %email, "argon2 hash failed");
                anyhow::anyhow!("hashing password for {email}: {e}")
            })?
            .to_string();
        Ok(Self {
            id,
            name,
            email,
            role,
            avatar: None,
            password_hash,
        })
    }

    /// Whether `password` matches the stored hash. A hash that does not
    /// parse is an error, not a mismatch.
    pub fn password_matches(&self, password: &str) -> anyhow::Result<bool> {
        let parsed = PasswordHash::new(&self.password_hash).map_err(|e| {
            error!(error = %e, user_id = %self.id, "stored password hash is malformed");
            anyhow::anyhow!("password hash of user {} is malformed: {e}", self.id)
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
