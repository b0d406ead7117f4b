//! Driving port for the two public leaderboards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::identity::UserId;
use crate::domain::ports::builder_query::CreatorPayload;

/// Rows returned when the caller does not ask for a size.
pub const DEFAULT_LEADERBOARD_LIMIT: usize = 20;

/// Request for a ranked listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardRequest {
    pub limit: usize,
}

impl Default for LeaderboardRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LEADERBOARD_LIMIT,
        }
    }
}

/// One ranked artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLeaderboardEntry {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub play_count: i64,
    pub like_count: i64,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    pub creator: CreatorPayload,
}

/// One ranked builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuilderLeaderboardEntry {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    pub username: String,
    pub game_count: i64,
    pub total_likes: i64,
    pub total_plays: i64,
}

/// Driving port for ranked listings.
///
/// Entries with no engagement at all never appear, so both listings may
/// return fewer rows than asked for.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardQuery: Send + Sync {
    /// Artifacts ranked by likes, plays, then recency.
    async fn top_projects(
        &self,
        request: LeaderboardRequest,
    ) -> Result<Vec<ProjectLeaderboardEntry>, Error>;

    /// Builders ranked by total likes, artifact count, then total plays.
    async fn top_builders(
        &self,
        request: LeaderboardRequest,
    ) -> Result<Vec<BuilderLeaderboardEntry>, Error>;
}

/// Fixture query returning empty leaderboards.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLeaderboardQuery;

#[async_trait]
impl LeaderboardQuery for FixtureLeaderboardQuery {
    async fn top_projects(
        &self,
        _request: LeaderboardRequest,
    ) -> Result<Vec<ProjectLeaderboardEntry>, Error> {
        Ok(Vec::new())
    }

    async fn top_builders(
        &self,
        _request: LeaderboardRequest,
    ) -> Result<Vec<BuilderLeaderboardEntry>, Error> {
        Ok(Vec::new())
    }
}
