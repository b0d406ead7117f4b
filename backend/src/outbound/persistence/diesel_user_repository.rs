//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Persists builder accounts and answers the profile aggregates. Username
//! uniqueness is enforced by the database; the unique violation surfaces as
//! its own port error so the minting loop can retry with a fresh name.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::UserId;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{BuilderStats, User, Username};

use super::diesel_error_mapping::{is_unique_violation, map_checkout_error, map_statement_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{likes, projects, users};

/// Diesel-backed implementation of the builder account port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain user repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_checkout_error(error, UserRepositoryError::connection)
}

/// Map Diesel errors to domain user repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_statement_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Map insert failures, surfacing the unique username constraint.
fn map_insert_error(error: diesel::result::Error, username: &str) -> UserRepositoryError {
    if is_unique_violation(&error) {
        UserRepositoryError::duplicate_username(username)
    } else {
        map_diesel_error(error)
    }
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let username =
        Username::new(row.username).map_err(|err| UserRepositoryError::query(err.to_string()))?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        row.created_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_insert_error(error, user.username().as_ref()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn builder_stats(&self, id: &UserId) -> Result<BuilderStats, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let game_count: i64 = projects::table
            .filter(projects::creator_id.eq(id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let total_likes: i64 = likes::table
            .inner_join(projects::table)
            .filter(projects::creator_id.eq(id.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(BuilderStats {
            game_count,
            total_likes,
        })
    }
}
