//! Port for artifact version history persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::version::{Version, VersionSummary};

use super::define_port_error;

define_port_error! {
    /// Errors raised by version repository adapters.
    pub enum VersionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "version repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "version repository query failed: {message}",
    }
}

/// Port for writing snapshots and reading artifact history.
///
/// A snapshot insert must be committed before the document overwrite it
/// protects is attempted; the two never share a transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Persist a snapshot.
    async fn insert(&self, version: &Version) -> Result<(), VersionRepositoryError>;

    /// History rows for an artifact, newest first, without documents.
    async fn list_summaries_for_project(
        &self,
        project_id: &Uuid,
    ) -> Result<Vec<VersionSummary>, VersionRepositoryError>;

    /// Find a full snapshot by id.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Version>, VersionRepositoryError>;
}

/// Fixture implementation for tests that do not exercise version history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureVersionRepository;

#[async_trait]
impl VersionRepository for FixtureVersionRepository {
    async fn insert(&self, _version: &Version) -> Result<(), VersionRepositoryError> {
        Ok(())
    }

    async fn list_summaries_for_project(
        &self,
        _project_id: &Uuid,
    ) -> Result<Vec<VersionSummary>, VersionRepositoryError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &Uuid) -> Result<Option<Version>, VersionRepositoryError> {
        Ok(None)
    }
}
