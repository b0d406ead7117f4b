//! Port for like and play persistence plus leaderboard aggregates.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::engagement::{BuilderRanking, ProjectRanking};
use crate::domain::identity::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by engagement repository adapters.
    pub enum EngagementRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "engagement repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "engagement repository query failed: {message}",
    }
}

/// Outcome of inserting a like row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeInsert {
    /// A new like row was written.
    Created,
    /// The unique (builder, artifact) constraint matched an existing row.
    AlreadyLiked,
}

/// Port for engagement facts.
///
/// `record_play` must write the play row and bump the artifact's counter
/// atomically; a partial write would let the counter drift from the facts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Insert a like, treating a duplicate as [`LikeInsert::AlreadyLiked`].
    async fn insert_like(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
        created_at: DateTime<Utc>,
    ) -> Result<LikeInsert, EngagementRepositoryError>;

    /// Remove a like. Returns whether a row existed.
    async fn delete_like(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
    ) -> Result<bool, EngagementRepositoryError>;

    /// Likes received by one artifact.
    async fn like_count(&self, project_id: &Uuid) -> Result<i64, EngagementRepositoryError>;

    /// Likes received by each listed artifact. Artifacts without likes are
    /// absent from the map.
    async fn like_counts(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, i64>, EngagementRepositoryError>;

    /// Which of the listed artifacts the viewer has liked.
    async fn liked_project_ids(
        &self,
        viewer_id: &UserId,
        project_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, EngagementRepositoryError>;

    /// Whether one builder likes one artifact.
    async fn is_liked_by(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
    ) -> Result<bool, EngagementRepositoryError>;

    /// When the builder last played the artifact, if ever.
    async fn last_play(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, EngagementRepositoryError>;

    /// Record a counted play and return the artifact's new play count, or
    /// `None` when the artifact no longer exists.
    async fn record_play(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
        played_at: DateTime<Utc>,
    ) -> Result<Option<i32>, EngagementRepositoryError>;

    /// Unranked engagement aggregates for every artifact.
    async fn project_rankings(&self) -> Result<Vec<ProjectRanking>, EngagementRepositoryError>;

    /// Unranked engagement aggregates for every builder.
    async fn builder_rankings(&self) -> Result<Vec<BuilderRanking>, EngagementRepositoryError>;
}

/// Fixture implementation for tests that do not exercise engagement state.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEngagementRepository;

#[async_trait]
impl EngagementRepository for FixtureEngagementRepository {
    async fn insert_like(
        &self,
        _project_id: &Uuid,
        _user_id: &UserId,
        _created_at: DateTime<Utc>,
    ) -> Result<LikeInsert, EngagementRepositoryError> {
        Ok(LikeInsert::Created)
    }

    async fn delete_like(
        &self,
        _project_id: &Uuid,
        _user_id: &UserId,
    ) -> Result<bool, EngagementRepositoryError> {
        Ok(false)
    }

    async fn like_count(&self, _project_id: &Uuid) -> Result<i64, EngagementRepositoryError> {
        Ok(0)
    }

    async fn like_counts(
        &self,
        _project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, i64>, EngagementRepositoryError> {
        Ok(HashMap::new())
    }

    async fn liked_project_ids(
        &self,
        _viewer_id: &UserId,
        _project_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, EngagementRepositoryError> {
        Ok(HashSet::new())
    }

    async fn is_liked_by(
        &self,
        _project_id: &Uuid,
        _user_id: &UserId,
    ) -> Result<bool, EngagementRepositoryError> {
        Ok(false)
    }

    async fn last_play(
        &self,
        _project_id: &Uuid,
        _user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, EngagementRepositoryError> {
        Ok(None)
    }

    async fn record_play(
        &self,
        _project_id: &Uuid,
        _user_id: &UserId,
        _played_at: DateTime<Utc>,
    ) -> Result<Option<i32>, EngagementRepositoryError> {
        Ok(Some(1))
    }

    async fn project_rankings(&self) -> Result<Vec<ProjectRanking>, EngagementRepositoryError> {
        Ok(Vec::new())
    }

    async fn builder_rankings(&self) -> Result<Vec<BuilderRanking>, EngagementRepositoryError> {
        Ok(Vec::new())
    }
}
