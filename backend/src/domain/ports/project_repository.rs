//! Port for artifact persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::identity::UserId;
use crate::domain::project::{Project, ProjectChanges};

use super::define_port_error;

define_port_error! {
    /// Errors raised by project repository adapters.
    pub enum ProjectRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "project repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "project repository query failed: {message}",
    }
}

/// Dashboard row: the owner's own artifact without its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub prompt: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile row: an artifact card without its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub prompt: String,
    pub play_count: i32,
    pub creator_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Port for artifact reads and writes.
///
/// Partial updates go through [`ProjectChanges`]; `None` fields are left
/// untouched and `updated_at` is always bumped. Update and delete report
/// missing rows through their return value rather than an error variant.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Persist a freshly created artifact.
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError>;

    /// Find an artifact by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Project>, ProjectRepositoryError>;

    /// The owner's artifacts, most recently updated first.
    async fn list_summaries_for_creator(
        &self,
        creator_id: &UserId,
    ) -> Result<Vec<ProjectSummary>, ProjectRepositoryError>;

    /// Profile cards for a builder, most recently updated first.
    async fn list_cards_for_creator(
        &self,
        creator_id: &UserId,
    ) -> Result<Vec<ProjectCard>, ProjectRepositoryError>;

    /// Apply a partial update and return the fresh row, or `None` when the
    /// artifact no longer exists.
    async fn update_fields(
        &self,
        id: &Uuid,
        changes: ProjectChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Project>, ProjectRepositoryError>;

    /// Delete an artifact and everything hanging off it. Returns whether a
    /// row was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool, ProjectRepositoryError>;
}

/// Fixture implementation for tests that do not exercise artifact persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProjectRepository;

#[async_trait]
impl ProjectRepository for FixtureProjectRepository {
    async fn insert(&self, _project: &Project) -> Result<(), ProjectRepositoryError> {
        Ok(())
    }

    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(None)
    }

    async fn list_summaries_for_creator(
        &self,
        _creator_id: &UserId,
    ) -> Result<Vec<ProjectSummary>, ProjectRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_cards_for_creator(
        &self,
        _creator_id: &UserId,
    ) -> Result<Vec<ProjectCard>, ProjectRepositoryError> {
        Ok(Vec::new())
    }

    async fn update_fields(
        &self,
        _id: &Uuid,
        _changes: ProjectChanges,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: &Uuid) -> Result<bool, ProjectRepositoryError> {
        Ok(false)
    }
}
