//! Username/password verification against the configured user list.

use std::collections::HashMap;

use carteira_shared::config::UserEntry;
use tracing::warn;

use super::password::{PasswordError, verify_password};

/// A user whose credentials were accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Login name.
    pub username: String,
    /// Display name, falling back to the login name.
    pub name: String,
}

/// Checks login credentials.
pub trait CredentialVerifier: Send + Sync {
    /// Returns the user when the password matches, `None` otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored hash for the user cannot be checked.
    fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, PasswordError>;
}

struct StoredUser {
    name: String,
    password_hash: String,
}

/// Users loaded from configuration.
pub struct ConfiguredUsers {
    users: HashMap<String, StoredUser>,
}

impl ConfiguredUsers {
    /// Builds the verifier. Later entries win on duplicate usernames.
    #[must_use]
    pub fn new(entries: &[UserEntry]) -> Self {
        let users = entries
            .iter()
            .map(|entry| {
                let stored = StoredUser {
                    name: entry
                        .name
                        .clone()
                        .unwrap_or_else(|| entry.username.clone()),
                    password_hash: entry.password_hash.clone(),
                };
                (entry.username.clone(), stored)
            })
            .collect();

        Self { users }
    }

    /// Number of configured users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns true when nobody can log in.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl CredentialVerifier for ConfiguredUsers {
    fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthenticatedUser>, PasswordError> {
        let Some(user) = self.users.get(username) else {
            return Ok(None);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(Some(AuthenticatedUser {
                username: username.to_string(),
                name: user.name.clone(),
            })),
            Ok(false) => Ok(None),
            Err(e) => {
                warn!(username = %username, error = %e, "Stored password hash rejected");
                Err(e)
            }
        }
    }
}
