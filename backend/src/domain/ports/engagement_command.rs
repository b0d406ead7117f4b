//! Driving port for social engagement mutations: likes and plays.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::identity::Identity;

/// Request to record one play of an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPlayRequest {
    pub project_id: Uuid,
    pub actor: Identity,
}

/// What happened to the play counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayOutcomePayload {
    pub counted: bool,
    pub play_count: i32,
}

/// Request to set a builder's like state for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleLikeRequest {
    pub project_id: Uuid,
    pub actor: Identity,
    /// Desired state. Repeating the current state is a no-op success.
    pub liked: bool,
}

/// The like state and count after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LikeOutcomePayload {
    pub liked: bool,
    pub like_count: i64,
}

/// Driving port for engagement writes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EngagementCommand: Send + Sync {
    /// Record a play, subject to the per-builder cooldown. A cooldown hit
    /// succeeds with `counted` unset and the counter untouched.
    async fn record_play(&self, request: RecordPlayRequest)
    -> Result<PlayOutcomePayload, Error>;

    /// Drive a builder's like state to `liked`. Curators cannot like.
    async fn toggle_like(&self, request: ToggleLikeRequest) -> Result<LikeOutcomePayload, Error>;
}

/// Fixture command for tests that do not need engagement writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEngagementCommand;

#[async_trait]
impl EngagementCommand for FixtureEngagementCommand {
    async fn record_play(
        &self,
        request: RecordPlayRequest,
    ) -> Result<PlayOutcomePayload, Error> {
        Err(Error::not_found(format!(
            "project {} not found",
            request.project_id
        )))
    }

    async fn toggle_like(&self, request: ToggleLikeRequest) -> Result<LikeOutcomePayload, Error> {
        Err(Error::not_found(format!(
            "project {} not found",
            request.project_id
        )))
    }
}
