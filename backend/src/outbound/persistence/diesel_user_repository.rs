//! PostgreSQL-backed account repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::diesel_error_mapping::{count_from_db, user_diesel_error, user_pool_error};
use super::models::UserRow;
use super::pool::DbPool;
use super::schema::users;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{StoredUser, User, UserId};

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &StoredUser) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        diesel::insert_into(users::table)
            .values(UserRow::from_stored(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| user_diesel_error(err, "insert user"))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| user_diesel_error(err, "find user by username"))?;
        row.map(UserRow::into_stored)
            .transpose()
            .map_err(UserRepositoryError::query)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| user_diesel_error(err, "find user"))?;
        row.map(UserRow::into_user)
            .transpose()
            .map_err(UserRepositoryError::query)
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserRepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(uuids))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| user_diesel_error(err, "find users"))?;
        rows.into_iter()
            .map(UserRow::into_user)
            .collect::<Result<Vec<_>, _>>()
            .map_err(UserRepositoryError::query)
    }

    async fn count(&self) -> Result<u64, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(user_pool_error)?;
        let count: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| user_diesel_error(err, "count users"))?;
        Ok(count_from_db(count))
    }
}
