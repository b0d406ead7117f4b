//! Identity domain services.
//!
//! Resolve-or-create for builder accounts plus public profile reads.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::Error;
use crate::domain::identity::{Identity, UserId};
use crate::domain::ports::{
    BuilderProfilePayload, BuilderProfileRequest, BuilderProjectPayload, BuilderProjectsRequest,
    BuilderQuery, CreatorPayload, EngagementRepository, EngagementRepositoryError,
    IdentityCommand, ProjectRepository, ProjectRepositoryError, ResolveIdentityRequest,
    ResolvedIdentity, UserRepository, UserRepositoryError,
};
use crate::domain::user::{User, Username};

/// How many generated usernames to try before giving up on a mint.
const USERNAME_MINT_ATTEMPTS: u32 = 10;

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

/// Identity service implementing the resolve-or-create driving port.
#[derive(Clone)]
pub struct IdentityCommandService<U> {
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<U> IdentityCommandService<U> {
    /// Create a new command service over the user repository.
    pub fn new(users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

impl<U> IdentityCommandService<U>
where
    U: UserRepository,
{
    async fn mint_builder(&self) -> Result<ResolvedIdentity, Error> {
        for _ in 0..USERNAME_MINT_ATTEMPTS {
            let candidate = namegen::username();
            let username = Username::new(candidate)
                .map_err(|err| Error::internal(format!("generated username invalid: {err}")))?;
            let user = User::new(UserId::random(), username, self.clock.utc());

            match self.users.insert(&user).await {
                Ok(()) => {
                    tracing::info!(user_id = %user.id(), "minted a new builder");
                    return Ok(ResolvedIdentity::Builder { user, minted: true });
                }
                Err(UserRepositoryError::DuplicateUsername { username }) => {
                    tracing::debug!(%username, "generated username collided, retrying");
                }
                Err(other) => return Err(map_user_repository_error(other)),
            }
        }

        Err(Error::conflict(
            "could not mint a unique username, try again",
        ))
    }
}

#[async_trait]
impl<U> IdentityCommand for IdentityCommandService<U>
where
    U: UserRepository,
{
    async fn resolve_or_create(
        &self,
        request: ResolveIdentityRequest,
    ) -> Result<ResolvedIdentity, Error> {
        match request.cached_id.as_deref().map(Identity::parse) {
            Some(Ok(Identity::Curator)) => return Ok(ResolvedIdentity::Curator),
            Some(Ok(Identity::Builder(id))) => {
                if let Some(user) = self
                    .users
                    .find_by_id(&id)
                    .await
                    .map_err(map_user_repository_error)?
                {
                    return Ok(ResolvedIdentity::Builder {
                        user,
                        minted: false,
                    });
                }
            }
            Some(Err(_)) | None => {}
        }

        self.mint_builder().await
    }
}

/// Builder profile service implementing the public read driving port.
#[derive(Clone)]
pub struct BuilderQueryService<U, P, E> {
    users: Arc<U>,
    projects: Arc<P>,
    engagement: Arc<E>,
}

impl<U, P, E> BuilderQueryService<U, P, E> {
    /// Create a new query service over the backing repositories.
    pub fn new(users: Arc<U>, projects: Arc<P>, engagement: Arc<E>) -> Self {
        Self {
            users,
            projects,
            engagement,
        }
    }
}

#[async_trait]
impl<U, P, E> BuilderQuery for BuilderQueryService<U, P, E>
where
    U: UserRepository,
    P: ProjectRepository,
    E: EngagementRepository,
{
    async fn profile(
        &self,
        request: BuilderProfileRequest,
    ) -> Result<BuilderProfilePayload, Error> {
        let user = self
            .users
            .find_by_id(&request.builder_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::not_found(format!("builder {} not found", request.builder_id)))?;
        let stats = self
            .users
            .builder_stats(user.id())
            .await
            .map_err(map_user_repository_error)?;

        Ok(BuilderProfilePayload {
            id: user.id().clone(),
            username: user.username().to_string(),
            created_at: user.created_at(),
            game_count: stats.game_count,
            total_likes: stats.total_likes,
        })
    }

    async fn projects(
        &self,
        request: BuilderProjectsRequest,
    ) -> Result<Vec<BuilderProjectPayload>, Error> {
        let cards = self
            .projects
            .list_cards_for_creator(&request.builder_id)
            .await
            .map_err(map_project_repository_error)?;
        if cards.is_empty() {
            return Ok(Vec::new());
        }

        let creator = self
            .users
            .find_by_id(&request.builder_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| {
                Error::internal(format!(
                    "creator {} missing for listed artifacts",
                    request.builder_id
                ))
            })?;
        let game_count = cards.len() as i64;
        let creator_payload = CreatorPayload {
            id: creator.id().clone(),
            username: creator.username().to_string(),
            created_at: creator.created_at(),
            game_count,
        };

        let ids: Vec<_> = cards.iter().map(|card| card.id).collect();
        let like_counts = self
            .engagement
            .like_counts(&ids)
            .await
            .map_err(map_engagement_repository_error)?;
        let liked = match request.viewer_id.as_ref() {
            Some(viewer) => self
                .engagement
                .liked_project_ids(viewer, &ids)
                .await
                .map_err(map_engagement_repository_error)?,
            None => std::collections::HashSet::new(),
        };

        Ok(cards
            .into_iter()
            .map(|card| {
                let like_count = like_counts.get(&card.id).copied().unwrap_or(0);
                let is_liked_by_viewer = liked.contains(&card.id);
                let is_owner = request.viewer_id.as_ref() == Some(&card.creator_id);
                BuilderProjectPayload {
                    id: card.id,
                    name: card.name,
                    emoji: card.emoji,
                    prompt: card.prompt,
                    play_count: card.play_count,
                    created_at: card.created_at,
                    updated_at: card.updated_at,
                    creator_id: card.creator_id,
                    creator: creator_payload.clone(),
                    like_count,
                    is_liked_by_viewer,
                    is_owner,
                }
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
