//! Port for builder account persistence and profile statistics.

use async_trait::async_trait;

use crate::domain::identity::UserId;
use crate::domain::user::{BuilderStats, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
        /// Another builder already holds the requested username.
        DuplicateUsername { username: String } =>
            "username already taken: {username}",
    }
}

/// Port for writing builder accounts and reading profile aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a freshly minted builder.
    ///
    /// Surfaces [`UserRepositoryError::DuplicateUsername`] when the unique
    /// username constraint rejects the insert, so callers can retry with a
    /// different name.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Find a builder by id.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Aggregate artifact and like totals for a builder.
    ///
    /// Unknown builders yield zeroed stats; existence is checked via
    /// [`UserRepository::find_by_id`].
    async fn builder_stats(&self, id: &UserId) -> Result<BuilderStats, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, _user: &User) -> Result<(), UserRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn builder_stats(&self, _id: &UserId) -> Result<BuilderStats, UserRepositoryError> {
        Ok(BuilderStats::default())
    }
}
