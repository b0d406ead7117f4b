//! Driving port for public builder profiles and their artifact cards.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::identity::UserId;

/// Creator summary embedded in artifact payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatorPayload {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    pub username: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    pub game_count: i64,
}

/// Request for a builder's public profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderProfileRequest {
    pub builder_id: UserId,
}

/// A builder's public profile with aggregate statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuilderProfilePayload {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: UserId,
    pub username: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    pub game_count: i64,
    pub total_likes: i64,
}

/// Request for the artifact cards on a builder's public page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderProjectsRequest {
    pub builder_id: UserId,
    /// Who is looking, when known. Drives the per-card liked flag and
    /// ownership marker.
    pub viewer_id: Option<UserId>,
}

/// One artifact card on a builder's public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BuilderProjectPayload {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub prompt: String,
    pub play_count: i32,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub creator_id: UserId,
    pub creator: CreatorPayload,
    pub like_count: i64,
    pub is_liked_by_viewer: bool,
    pub is_owner: bool,
}

/// Driving port for builder-facing reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuilderQuery: Send + Sync {
    /// A builder's public profile. Unknown builders (including the
    /// curator, which has no row) surface `NotFound`.
    async fn profile(&self, request: BuilderProfileRequest)
    -> Result<BuilderProfilePayload, Error>;

    /// The builder's artifact cards, most recently updated first.
    async fn projects(
        &self,
        request: BuilderProjectsRequest,
    ) -> Result<Vec<BuilderProjectPayload>, Error>;
}

/// Fixture query for tests that do not need profile data.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBuilderQuery;

#[async_trait]
impl BuilderQuery for FixtureBuilderQuery {
    async fn profile(
        &self,
        request: BuilderProfileRequest,
    ) -> Result<BuilderProfilePayload, Error> {
        Err(Error::not_found(format!(
            "builder {} not found",
            request.builder_id
        )))
    }

    async fn projects(
        &self,
        _request: BuilderProjectsRequest,
    ) -> Result<Vec<BuilderProjectPayload>, Error> {
        Ok(Vec::new())
    }
}
