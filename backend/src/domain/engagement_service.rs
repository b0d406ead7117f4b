//! Social engagement writes: like toggles and cooldown-limited plays.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::engagement::within_cooldown;
use crate::domain::permissions;
use crate::domain::ports::{
    EngagementCommand, EngagementRepository, EngagementRepositoryError, LikeOutcomePayload,
    PlayOutcomePayload, ProjectRepository, ProjectRepositoryError, RecordPlayRequest,
    ToggleLikeRequest,
};
use crate::domain::project::Project;

fn map_project_repository_error(error: ProjectRepositoryError) -> Error {
    match error {
        ProjectRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("project repository unavailable: {message}"))
        }
        ProjectRepositoryError::Query { message } => {
            Error::internal(format!("project repository error: {message}"))
        }
    }
}

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

/// Engagement service implementing the like and play driving port.
#[derive(Clone)]
pub struct EngagementCommandService<P, E> {
    projects: Arc<P>,
    engagement: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<P, E> EngagementCommandService<P, E> {
    /// Create a new command service over the engagement repositories.
    pub fn new(projects: Arc<P>, engagement: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            projects,
            engagement,
            clock,
        }
    }
}

impl<P, E> EngagementCommandService<P, E>
where
    P: ProjectRepository,
{
    async fn load_project(&self, project_id: &Uuid) -> Result<Project, Error> {
        self.projects
            .find_by_id(project_id)
            .await
            .map_err(map_project_repository_error)?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }
}

#[async_trait]
impl<P, E> EngagementCommand for EngagementCommandService<P, E>
where
    P: ProjectRepository,
    E: EngagementRepository,
{
    async fn record_play(&self, request: RecordPlayRequest) -> Result<PlayOutcomePayload, Error> {
        let RecordPlayRequest { project_id, actor } = request;
        let project = self.load_project(&project_id).await?;

        // The curator has no backing row to hang play facts off, so its
        // plays are acknowledged without moving the counter.
        let Some(player_id) = actor.builder_id() else {
            return Ok(PlayOutcomePayload {
                counted: false,
                play_count: project.play_count(),
            });
        };

        let now = self.clock.utc();
        let last_play = self
            .engagement
            .last_play(&project_id, player_id)
            .await
            .map_err(map_engagement_repository_error)?;
        if within_cooldown(last_play, now) {
            return Ok(PlayOutcomePayload {
                counted: false,
                play_count: project.play_count(),
            });
        }

        let play_count = self
            .engagement
            .record_play(&project_id, player_id, now)
            .await
            .map_err(map_engagement_repository_error)?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))?;
        tracing::debug!(project_id = %project_id, player_id = %player_id, "counted a play");
        Ok(PlayOutcomePayload {
            counted: true,
            play_count,
        })
    }

    async fn toggle_like(&self, request: ToggleLikeRequest) -> Result<LikeOutcomePayload, Error> {
        let ToggleLikeRequest {
            project_id,
            actor,
            liked,
        } = request;
        if !permissions::can_like(&actor) {
            return Err(Error::forbidden("the curator cannot like artifacts"));
        }
        let user_id = actor
            .builder_id()
            .ok_or_else(|| Error::forbidden("the curator cannot like artifacts"))?;

        let project = self.load_project(&project_id).await?;
        if liked {
            self.engagement
                .insert_like(project.id(), user_id, self.clock.utc())
                .await
                .map_err(map_engagement_repository_error)?;
        } else {
            self.engagement
                .delete_like(project.id(), user_id)
                .await
                .map_err(map_engagement_repository_error)?;
        }

        let like_count = self
            .engagement
            .like_count(project.id())
            .await
            .map_err(map_engagement_repository_error)?;
        Ok(LikeOutcomePayload { liked, like_count })
    }
}

#[cfg(test)]
#[path = "engagement_service_tests.rs"]
mod tests;
