//! Driving port for artifact reads: dashboards, detail views, history,
//! and raw preview documents.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::identity::UserId;
use crate::domain::ports::builder_query::CreatorPayload;

/// Full artifact detail, document included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailPayload {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub html_content: String,
    pub prompt: String,
    pub play_count: i32,
    pub like_count: i64,
    /// Present only when the read carried a viewer.
    pub is_liked_by_viewer: Option<bool>,
    pub featured: bool,
    pub creator: CreatorPayload,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// Request for one artifact's detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetailRequest {
    pub project_id: Uuid,
    pub viewer_id: Option<UserId>,
}

/// Request for the owner's dashboard listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerProjectsRequest {
    pub owner_id: UserId,
}

/// Dashboard row without the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryPayload {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub prompt: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}

/// One history row, prompt already decorated for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionSummaryPayload {
    pub id: Uuid,
    pub prompt: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// A full snapshot, document included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VersionDetailPayload {
    pub id: Uuid,
    pub project_id: Uuid,
    pub html_content: String,
    /// Decorated for display; restores use the stored prompt.
    pub prompt: String,
    pub pre_restore: bool,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Request for one snapshot of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDetailRequest {
    pub project_id: Uuid,
    pub version_id: Uuid,
}

/// What the preview surface should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewDocument {
    /// The artifact's current document.
    Document(String),
    /// The artifact exists but has no content yet.
    Empty,
    /// No such artifact.
    Missing,
}

/// Driving port for artifact reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GalleryQuery: Send + Sync {
    /// The owner's artifacts, most recently updated first.
    async fn owner_projects(
        &self,
        request: OwnerProjectsRequest,
    ) -> Result<Vec<ProjectSummaryPayload>, Error>;

    /// One artifact with document, counts, and creator summary.
    async fn project_detail(
        &self,
        request: ProjectDetailRequest,
    ) -> Result<ProjectDetailPayload, Error>;

    /// History rows for an artifact, newest first.
    async fn versions(&self, project_id: &Uuid) -> Result<Vec<VersionSummaryPayload>, Error>;

    /// One full snapshot. `NotFound` when the snapshot is absent or
    /// belongs to a different artifact.
    async fn version_detail(
        &self,
        request: VersionDetailRequest,
    ) -> Result<VersionDetailPayload, Error>;

    /// The raw document for the play/preview surface.
    async fn preview_document(&self, project_id: &Uuid) -> Result<PreviewDocument, Error>;
}

/// Fixture query for tests that do not need gallery reads.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGalleryQuery;

#[async_trait]
impl GalleryQuery for FixtureGalleryQuery {
    async fn owner_projects(
        &self,
        _request: OwnerProjectsRequest,
    ) -> Result<Vec<ProjectSummaryPayload>, Error> {
        Ok(Vec::new())
    }

    async fn project_detail(
        &self,
        request: ProjectDetailRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        Err(Error::not_found(format!(
            "project {} not found",
            request.project_id
        )))
    }

    async fn versions(&self, _project_id: &Uuid) -> Result<Vec<VersionSummaryPayload>, Error> {
        Ok(Vec::new())
    }

    async fn version_detail(
        &self,
        request: VersionDetailRequest,
    ) -> Result<VersionDetailPayload, Error> {
        Err(Error::not_found(format!(
            "version {} not found",
            request.version_id
        )))
    }

    async fn preview_document(&self, _project_id: &Uuid) -> Result<PreviewDocument, Error> {
        Ok(PreviewDocument::Missing)
    }
}
