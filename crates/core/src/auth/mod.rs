//! Login credentials.
//!
//! Passwords are stored as Argon2id PHC strings; the configured user list is
//! checked through [`CredentialVerifier`].

mod credentials;
mod password;

pub use credentials::{AuthenticatedUser, ConfiguredUsers, CredentialVerifier};
pub use password::{PasswordError, hash_password, verify_password};
