//! Driving port for artifact mutations: create, update, generate,
//! restore, feature, delete.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::identity::Identity;
use crate::domain::project::{ProjectChanges, ProjectName};
use crate::domain::ports::gallery_query::ProjectDetailPayload;

/// Request to create an empty artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    pub actor: Identity,
    /// Defaults to "Untitled Creation" when absent.
    pub name: Option<ProjectName>,
}

/// Request to patch an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    pub project_id: Uuid,
    pub actor: Identity,
    pub changes: ProjectChanges,
}

/// Request to generate or revise an artifact's document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateDocumentRequest {
    pub project_id: Uuid,
    pub actor: Identity,
    /// What the creator asked for, in their own words and language.
    pub instruction: String,
}

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentResponse {
    pub project: ProjectDetailPayload,
    /// Advisory: what language the instruction appeared to be in, when
    /// the gate got that far.
    pub detected_language: Option<String>,
    pub was_translated: bool,
}

/// Request to restore a snapshot onto its artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreVersionRequest {
    pub project_id: Uuid,
    pub version_id: Uuid,
    pub actor: Identity,
}

/// Request to toggle the featured flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleFeaturedRequest {
    pub project_id: Uuid,
    pub actor: Identity,
}

/// Request to delete an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteProjectRequest {
    pub project_id: Uuid,
    pub actor: Identity,
}

/// Driving port for artifact mutations.
///
/// Every operation authorises the actor against the ownership rules
/// before touching state; content-bearing writes snapshot the previous
/// document first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudioCommand: Send + Sync {
    /// Create an empty artifact owned by the acting builder.
    async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<ProjectDetailPayload, Error>;

    /// Patch name, emoji, or document according to the permission matrix.
    async fn update_project(
        &self,
        request: UpdateProjectRequest,
    ) -> Result<ProjectDetailPayload, Error>;

    /// Run the translate, generate, title, persist pipeline.
    async fn generate_document(
        &self,
        request: GenerateDocumentRequest,
    ) -> Result<GenerateDocumentResponse, Error>;

    /// Copy a snapshot's document back onto the artifact, snapshotting
    /// the current document first.
    async fn restore_version(
        &self,
        request: RestoreVersionRequest,
    ) -> Result<ProjectDetailPayload, Error>;

    /// Flip the featured flag. Curator only.
    async fn toggle_featured(
        &self,
        request: ToggleFeaturedRequest,
    ) -> Result<ProjectDetailPayload, Error>;

    /// Delete an artifact and its versions, likes, and plays.
    async fn delete_project(&self, request: DeleteProjectRequest) -> Result<(), Error>;
}

/// Fixture command for tests that do not need artifact mutations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureStudioCommand;

#[async_trait]
impl StudioCommand for FixtureStudioCommand {
    async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        Err(Error::forbidden(format!(
            "fixture studio cannot create artifacts for {}",
            request.actor
        )))
    }

    async fn update_project(
        &self,
        request: UpdateProjectRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        Err(Error::not_found(format!(
            "project {} not found",
            request.project_id
        )))
    }

    async fn generate_document(
        &self,
        request: GenerateDocumentRequest,
    ) -> Result<GenerateDocumentResponse, Error> {
        Err(Error::not_found(format!(
            "project {} not found",
            request.project_id
        )))
    }

    async fn restore_version(
        &self,
        request: RestoreVersionRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        Err(Error::not_found(format!(
            "version {} not found",
            request.version_id
        )))
    }

    async fn toggle_featured(
        &self,
        request: ToggleFeaturedRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        Err(Error::not_found(format!(
            "project {} not found",
            request.project_id
        )))
    }

    async fn delete_project(&self, request: DeleteProjectRequest) -> Result<(), Error> {
        Err(Error::not_found(format!(
            "project {} not found",
            request.project_id
        )))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::identity::UserId;

    #[rstest]
    #[tokio::test]
    async fn fixture_mutations_surface_not_found() {
        let command = FixtureStudioCommand;
        let err = command
            .update_project(UpdateProjectRequest {
                project_id: Uuid::new_v4(),
                actor: Identity::Builder(UserId::random()),
                changes: ProjectChanges::default(),
            })
            .await
            .expect_err("fixture update is absent");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_create_is_refused() {
        let command = FixtureStudioCommand;
        let err = command
            .create_project(CreateProjectRequest {
                actor: Identity::Curator,
                name: None,
            })
            .await
            .expect_err("fixture create is refused");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
