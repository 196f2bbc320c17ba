//! Password hashing port.
//!
//! Hashing is CPU-bound and synchronous; adapters must not block on I/O.

use crate::domain::PasswordHash;

use super::define_port_error;

define_port_error! {
    pub enum PasswordHasherError {
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash is not in a format the adapter understands.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// `Ok(false)` means a well-formed hash that does not match.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
