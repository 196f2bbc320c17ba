//! Account persistence port.
use async_trait::async_trait;

use crate::domain::{StoredUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by account stores.
    pub enum UserRepositoryError {
        /// The store could not be reached.
        Connection { message: String } => "user store connection failed: {message}",
        /// A query or mutation failed.
        Query { message: String } => "user store query failed: {message}",
        DuplicateEmail {} => "email is already registered",
        DuplicateUsername {} => "username is already taken",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Email and username are each unique.
    async fn insert(&self, user: &StoredUser) -> Result<(), UserRepositoryError>;

    /// Look up an account with its password hash by normalised username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserRepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch every account whose id is listed; unknown ids are skipped.
    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError>;

    async fn count(&self) -> Result<u64, UserRepositoryError>;
}
