//! Ranked listings over the engagement aggregates.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::engagement::CreatorSummary;
use crate::domain::ports::{
    BuilderLeaderboardEntry, CreatorPayload, EngagementRepository, EngagementRepositoryError,
    LeaderboardQuery, LeaderboardRequest, ProjectLeaderboardEntry,
};
use crate::domain::ranking::{rank_builders, rank_projects};

fn map_engagement_repository_error(error: EngagementRepositoryError) -> Error {
    match error {
        EngagementRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("engagement repository unavailable: {message}"))
        }
        EngagementRepositoryError::Query { message } => {
            Error::internal(format!("engagement repository error: {message}"))
        }
    }
}

fn creator_payload(creator: CreatorSummary) -> CreatorPayload {
    CreatorPayload {
        id: creator.id,
        username: creator.username,
        created_at: creator.created_at,
        game_count: creator.game_count,
    }
}

/// Leaderboard service implementing the ranked listing driving port.
#[derive(Clone)]
pub struct LeaderboardQueryService<E> {
    engagement: Arc<E>,
}

impl<E> LeaderboardQueryService<E> {
    /// Create a new query service over the engagement repository.
    pub fn new(engagement: Arc<E>) -> Self {
        Self { engagement }
    }
}

#[async_trait]
impl<E> LeaderboardQuery for LeaderboardQueryService<E>
where
    E: EngagementRepository,
{
    async fn top_projects(
        &self,
        request: LeaderboardRequest,
    ) -> Result<Vec<ProjectLeaderboardEntry>, Error> {
        let rows = self
            .engagement
            .project_rankings()
            .await
            .map_err(map_engagement_repository_error)?;
        Ok(rank_projects(rows, request.limit)
            .into_iter()
            .map(|row| ProjectLeaderboardEntry {
                id: row.id,
                name: row.name,
                emoji: row.emoji,
                play_count: row.play_count,
                like_count: row.like_count,
                created_at: row.created_at,
                creator: creator_payload(row.creator),
            })
            .collect())
    }

    async fn top_builders(
        &self,
        request: LeaderboardRequest,
    ) -> Result<Vec<BuilderLeaderboardEntry>, Error> {
        let rows = self
            .engagement
            .builder_rankings()
            .await
            .map_err(map_engagement_repository_error)?;
        Ok(rank_builders(rows, request.limit)
            .into_iter()
            .map(|row| BuilderLeaderboardEntry {
                id: row.id,
                username: row.username,
                game_count: row.game_count,
                total_likes: row.total_likes,
                total_plays: row.total_plays,
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "leaderboard_service_tests.rs"]
mod tests;
