//! Artifact read services: owner dashboards, detail views, version
//! history, and play-surface previews.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::identity::UserId;
use crate::domain::ports::{
    CreatorPayload, EngagementRepository, EngagementRepositoryError, GalleryQuery,
    OwnerProjectsRequest, PreviewDocument, ProjectDetailPayload, ProjectDetailRequest,
    ProjectRepository, ProjectRepositoryError, ProjectSummaryPayload, UserRepository,
    UserRepositoryError, VersionDetailPayload, VersionDetailRequest, VersionRepository,
    VersionRepositoryError, VersionSummaryPayload,
};
use crate::domain::project::{ContentState, Project};

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { username } => {
            Error::conflict(format!("username already taken: {username}"))
        }
    }
}

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

fn map_version_repository_error(error: VersionRepositoryError) -> Error {
    match error {
        VersionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("version repository unavailable: {message}"))
        }
        VersionRepositoryError::Query { message } => {
            Error::internal(format!("version repository error: {message}"))
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

/// Assemble the full detail payload for one artifact.
///
/// Shared with the studio service so mutation responses carry exactly the
/// fields a detail read would.
pub(crate) async fn assemble_project_detail<U, E>(
    users: &U,
    engagement: &E,
    project: &Project,
    viewer_id: Option<&UserId>,
) -> Result<ProjectDetailPayload, Error>
where
    U: UserRepository,
    E: EngagementRepository,
{
    let creator = users
        .find_by_id(project.creator_id())
        .await
        .map_err(map_user_repository_error)?
        .ok_or_else(|| {
            Error::internal(format!(
                "creator {} missing for project {}",
                project.creator_id(),
                project.id()
            ))
        })?;
    let stats = users
        .builder_stats(project.creator_id())
        .await
        .map_err(map_user_repository_error)?;
    let like_count = engagement
        .like_count(project.id())
        .await
        .map_err(map_engagement_repository_error)?;
    let is_liked_by_viewer = match viewer_id {
        Some(viewer) => Some(
            engagement
                .is_liked_by(project.id(), viewer)
                .await
                .map_err(map_engagement_repository_error)?,
        ),
        None => None,
    };

    Ok(ProjectDetailPayload {
        id: *project.id(),
        name: project.name().as_ref().to_owned(),
        emoji: project.emoji().as_ref().to_owned(),
        html_content: project.html_content().to_owned(),
        prompt: project.prompt().to_owned(),
        play_count: project.play_count(),
        like_count,
        is_liked_by_viewer,
        featured: project.featured(),
        creator: CreatorPayload {
            id: creator.id().clone(),
            username: creator.username().as_ref().to_owned(),
            created_at: creator.created_at(),
            game_count: stats.game_count,
        },
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    })
}

/// Gallery service implementing the artifact read driving port.
#[derive(Clone)]
pub struct GalleryQueryService<P, V, U, E> {
    projects: Arc<P>,
    versions: Arc<V>,
    users: Arc<U>,
    engagement: Arc<E>,
}

impl<P, V, U, E> GalleryQueryService<P, V, U, E> {
    /// Create a new query service over the read repositories.
    pub fn new(projects: Arc<P>, versions: Arc<V>, users: Arc<U>, engagement: Arc<E>) -> Self {
        Self {
            projects,
            versions,
            users,
            engagement,
        }
    }
}

impl<P, V, U, E> GalleryQueryService<P, V, U, E>
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
impl<P, V, U, E> GalleryQuery for GalleryQueryService<P, V, U, E>
where
    P: ProjectRepository,
    V: VersionRepository,
    U: UserRepository,
    E: EngagementRepository,
{
    async fn owner_projects(
        &self,
        request: OwnerProjectsRequest,
    ) -> Result<Vec<ProjectSummaryPayload>, Error> {
        let summaries = self
            .projects
            .list_summaries_for_creator(&request.owner_id)
            .await
            .map_err(map_project_repository_error)?;
        Ok(summaries
            .into_iter()
            .map(|summary| ProjectSummaryPayload {
                id: summary.id,
                name: summary.name,
                emoji: summary.emoji,
                prompt: summary.prompt,
                created_at: summary.created_at,
                updated_at: summary.updated_at,
            })
            .collect())
    }

    async fn project_detail(
        &self,
        request: ProjectDetailRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        let project = self.load_project(&request.project_id).await?;
        assemble_project_detail(
            self.users.as_ref(),
            self.engagement.as_ref(),
            &project,
            request.viewer_id.as_ref(),
        )
        .await
    }

    async fn versions(&self, project_id: &Uuid) -> Result<Vec<VersionSummaryPayload>, Error> {
        self.load_project(project_id).await?;
        let summaries = self
            .versions
            .list_summaries_for_project(project_id)
            .await
            .map_err(map_version_repository_error)?;
        Ok(summaries
            .into_iter()
            .map(|summary| VersionSummaryPayload {
                id: summary.id,
                prompt: summary.displayed_prompt(),
                created_at: summary.created_at,
            })
            .collect())
    }

    async fn version_detail(
        &self,
        request: VersionDetailRequest,
    ) -> Result<VersionDetailPayload, Error> {
        let version = self
            .versions
            .find_by_id(&request.version_id)
            .await
            .map_err(map_version_repository_error)?
            .filter(|version| version.project_id() == &request.project_id)
            .ok_or_else(|| {
                Error::not_found(format!("version {} not found", request.version_id))
            })?;
        Ok(VersionDetailPayload {
            id: *version.id(),
            project_id: *version.project_id(),
            html_content: version.html_content().to_owned(),
            prompt: version.displayed_prompt(),
            pre_restore: version.pre_restore(),
            created_at: version.created_at(),
        })
    }

    async fn preview_document(&self, project_id: &Uuid) -> Result<PreviewDocument, Error> {
        let Some(project) = self
            .projects
            .find_by_id(project_id)
            .await
            .map_err(map_project_repository_error)?
        else {
            return Ok(PreviewDocument::Missing);
        };
        Ok(match project.content_state() {
            ContentState::Empty => PreviewDocument::Empty,
            ContentState::Populated => PreviewDocument::Document(project.html_content().to_owned()),
        })
    }
}

#[cfg(test)]
#[path = "gallery_service_tests.rs"]
mod tests;
