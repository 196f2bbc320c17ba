//! Driving port for sign-up, sign-in, and profile lookups.
use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account. Duplicate email or username yields `conflict`.
    async fn register(&self, registration: Registration) -> Result<User, Error>;

    /// Check credentials. Unknown users and wrong passwords both yield the
    /// same `unauthorized` error.
    async fn login(&self, credentials: LoginCredentials) -> Result<User, Error>;

    async fn profile(&self, id: &UserId) -> Result<User, Error>;
}
