//! Account registration, login, and profile lookups.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::port_error_mapping::{map_hasher_error, map_user_error};
use super::ports::{AccountService, PasswordHasher, UserRepository};
use super::{
    Email, Error, LoginCredentials, PasswordHash, Registration, StoredUser, User, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Account service backed by a [`UserRepository`] and [`PasswordHasher`].
///
/// The account whose email equals `admin_email` is flagged as an
/// administrator when it registers.
#[derive(Clone)]
pub struct AccountServiceImpl {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    admin_email: Email,
}

impl AccountServiceImpl {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
        admin_email: Email,
    ) -> Self {
        Self {
            users,
            hasher,
            clock,
            admin_email,
        }
    }

    async fn hash_password(&self, password: String) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("password hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    async fn verify_password(&self, password: String, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?
            .map_err(map_hasher_error)
    }
}

#[async_trait]
impl AccountService for AccountServiceImpl {
    async fn register(&self, registration: Registration) -> Result<User, Error> {
        let password_hash = self
            .hash_password(registration.password().to_owned())
            .await?;
        let is_admin = registration.email == self.admin_email;
        let user = User {
            id: UserId::random(),
            email: registration.email,
            username: registration.username,
            first_name: registration.first_name,
            last_name: registration.last_name,
            is_admin,
            created_at: self.clock.utc(),
        };

        self.users
            .insert(&StoredUser {
                user: user.clone(),
                password_hash,
            })
            .await
            .map_err(map_user_error)?;

        info!(user_id = %user.id, is_admin, "account registered");
        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .verify_password(credentials.password().to_owned(), stored.password_hash)
            .await?;
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(stored.user)
    }

    async fn profile(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found("user not found"))
    }
}
