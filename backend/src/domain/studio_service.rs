//! Artifact lifecycle orchestration: create, patch, generate, restore,
//! feature, delete.
//!
//! Every content-bearing write funnels through [`StudioCommandService::apply_update`]
//! so the snapshot guard cannot be bypassed by one call path and honoured
//! by another.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::gallery_service::assemble_project_detail;
use crate::domain::identity::{Identity, UserId};
use crate::domain::permissions;
use crate::domain::ports::{
    CodeGenerator, CodeGeneratorError, CreateProjectRequest, DeleteProjectRequest,
    EngagementRepository, GenerateDocumentRequest, GenerateDocumentResponse, GenerationRequest,
    ProjectDetailPayload, ProjectRepository, ProjectRepositoryError, RestoreVersionRequest,
    StudioCommand, ToggleFeaturedRequest, Translator, UpdateProjectRequest, UserRepository,
    VersionRepository, VersionRepositoryError,
};
use crate::domain::project::{ContentState, Emoji, Project, ProjectChanges, ProjectName, ProjectSeed};
use crate::domain::prompts;
use crate::domain::version::Version;

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

fn map_generator_error(error: CodeGeneratorError) -> Error {
    Error::upstream(format!("document generation failed: {error}"))
}

/// Studio service implementing the artifact mutation driving port.
#[derive(Clone)]
pub struct StudioCommandService<P, V, U, E, G, T> {
    projects: Arc<P>,
    versions: Arc<V>,
    users: Arc<U>,
    engagement: Arc<E>,
    generator: Arc<G>,
    translator: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<P, V, U, E, G, T> StudioCommandService<P, V, U, E, G, T> {
    /// Create a new command service over its collaborators.
    pub fn new(
        projects: Arc<P>,
        versions: Arc<V>,
        users: Arc<U>,
        engagement: Arc<E>,
        generator: Arc<G>,
        translator: Arc<T>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            projects,
            versions,
            users,
            engagement,
            generator,
            translator,
            clock,
        }
    }
}

impl<P, V, U, E, G, T> StudioCommandService<P, V, U, E, G, T>
where
    P: ProjectRepository,
    V: VersionRepository,
    U: UserRepository,
    E: EngagementRepository,
    G: CodeGenerator,
    T: Translator,
{
    async fn load_project(&self, project_id: &Uuid) -> Result<Project, Error> {
        self.projects
            .find_by_id(project_id)
            .await
            .map_err(map_project_repository_error)?
            .ok_or_else(|| Error::not_found(format!("project {project_id} not found")))
    }

    /// The single content-update seam.
    ///
    /// When the patch overwrites a populated document, the outgoing
    /// document is snapshotted first; the snapshot commit must land before
    /// the overwrite is attempted.
    async fn apply_update(
        &self,
        project: Project,
        changes: ProjectChanges,
        pre_restore: bool,
    ) -> Result<Project, Error> {
        let now = self.clock.utc();
        if changes.touches_content() && project.content_state() == ContentState::Populated {
            let snapshot = Version::snapshot_of(&project, pre_restore, Uuid::new_v4(), now);
            self.versions
                .insert(&snapshot)
                .await
                .map_err(map_version_repository_error)?;
            tracing::debug!(
                project_id = %project.id(),
                version_id = %snapshot.id(),
                pre_restore,
                "snapshotted the outgoing document"
            );
        }
        self.projects
            .update_fields(project.id(), changes, now)
            .await
            .map_err(map_project_repository_error)?
            .ok_or_else(|| Error::not_found(format!("project {} not found", project.id())))
    }

    async fn assemble_detail(
        &self,
        project: &Project,
        viewer_id: Option<&UserId>,
    ) -> Result<ProjectDetailPayload, Error> {
        assemble_project_detail(
            self.users.as_ref(),
            self.engagement.as_ref(),
            project,
            viewer_id,
        )
        .await
    }

    async fn derive_title(&self, instruction: &str) -> Option<ProjectName> {
        let request = GenerationRequest {
            system: None,
            user: prompts::title_user_message(instruction),
            max_tokens: prompts::TITLE_MAX_TOKENS,
        };
        match self.generator.complete(request).await {
            Ok(raw) => prompts::tidy_title(&raw).and_then(|title| ProjectName::new(title).ok()),
            Err(error) => {
                tracing::warn!(%error, "title generation failed, keeping the current name");
                None
            }
        }
    }
}

#[async_trait]
impl<P, V, U, E, G, T> StudioCommand for StudioCommandService<P, V, U, E, G, T>
where
    P: ProjectRepository,
    V: VersionRepository,
    U: UserRepository,
    E: EngagementRepository,
    G: CodeGenerator,
    T: Translator,
{
    async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        let CreateProjectRequest { actor, name } = request;
        let Some(creator_id) = actor.builder_id() else {
            return Err(Error::forbidden("the curator cannot own artifacts"));
        };

        let project = Project::create(ProjectSeed {
            id: Uuid::new_v4(),
            name: name.unwrap_or_default(),
            emoji: Emoji::default(),
            creator_id: creator_id.clone(),
            created_at: self.clock.utc(),
        });
        self.projects
            .insert(&project)
            .await
            .map_err(map_project_repository_error)?;
        tracing::info!(
            project_id = %project.id(),
            creator_id = %creator_id,
            "created an artifact"
        );

        self.assemble_detail(&project, Some(creator_id)).await
    }

    async fn update_project(
        &self,
        request: UpdateProjectRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        let UpdateProjectRequest {
            project_id,
            actor,
            changes,
        } = request;
        if changes.is_empty() {
            return Err(Error::invalid_request("no fields to update"));
        }

        let project = self.load_project(&project_id).await?;
        if changes.featured.is_some() && !permissions::can_curate(&actor) {
            return Err(Error::forbidden("only the curator may feature artifacts"));
        }

        let changes = if permissions::can_mutate_content(&project, &actor) {
            changes
        } else if permissions::can_mutate_metadata(&project, &actor) {
            let stripped = changes.metadata_only();
            if stripped.is_empty() {
                return Err(Error::forbidden("only the owner may change the document"));
            }
            stripped
        } else {
            return Err(Error::forbidden("you do not own this artifact"));
        };

        let updated = self.apply_update(project, changes, false).await?;
        self.assemble_detail(&updated, actor.builder_id()).await
    }

    async fn generate_document(
        &self,
        request: GenerateDocumentRequest,
    ) -> Result<GenerateDocumentResponse, Error> {
        let GenerateDocumentRequest {
            project_id,
            actor,
            instruction,
        } = request;
        let instruction = instruction.trim().to_owned();
        if instruction.is_empty() {
            return Err(Error::invalid_request("instruction must not be empty"));
        }

        let project = self.load_project(&project_id).await?;
        if !permissions::can_mutate_content(&project, &actor) {
            return Err(Error::forbidden("only the owner may change the document"));
        }

        // Best effort. A broken language gate must not block creation.
        let (working_text, detected_language, was_translated) =
            match self.translator.ensure_working_language(&instruction).await {
                Ok(outcome) => (
                    outcome.text,
                    Some(outcome.detected_language),
                    outcome.was_translated,
                ),
                Err(error) => {
                    tracing::warn!(%error, "language gate failed, using the instruction as written");
                    (instruction.clone(), None, false)
                }
            };

        let prior_document = match project.content_state() {
            ContentState::Populated => Some(project.html_content().to_owned()),
            ContentState::Empty => None,
        };
        let revising = prior_document.is_some();
        let reply_language = if was_translated {
            detected_language.as_deref()
        } else {
            None
        };

        let raw = self
            .generator
            .complete(GenerationRequest {
                system: Some(prompts::document_system_prompt(revising)),
                user: prompts::document_user_message(
                    &working_text,
                    prior_document.as_deref(),
                    reply_language,
                ),
                max_tokens: prompts::DOCUMENT_MAX_TOKENS,
            })
            .await
            .map_err(map_generator_error)?;
        let document = prompts::strip_code_fences(&raw);
        if document.is_empty() {
            return Err(Error::upstream("generator returned an empty document"));
        }

        // A title is derived once, on the empty to populated transition.
        let name = if revising {
            None
        } else {
            self.derive_title(&working_text).await
        };

        let changes = ProjectChanges {
            name,
            html_content: Some(document),
            prompt: Some(instruction),
            ..ProjectChanges::default()
        };
        let updated = self.apply_update(project, changes, false).await?;
        tracing::info!(
            project_id = %updated.id(),
            revising,
            was_translated,
            "generated a document"
        );

        let project = self.assemble_detail(&updated, actor.builder_id()).await?;
        Ok(GenerateDocumentResponse {
            project,
            detected_language,
            was_translated,
        })
    }

    async fn restore_version(
        &self,
        request: RestoreVersionRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        let RestoreVersionRequest {
            project_id,
            version_id,
            actor,
        } = request;
        let project = self.load_project(&project_id).await?;
        if !permissions::can_mutate_content(&project, &actor) {
            return Err(Error::forbidden("only the owner may change the document"));
        }

        let version = self
            .versions
            .find_by_id(&version_id)
            .await
            .map_err(map_version_repository_error)?
            .filter(|version| version.project_id() == &project_id)
            .ok_or_else(|| Error::not_found(format!("version {version_id} not found")))?;

        let changes = ProjectChanges {
            html_content: Some(version.html_content().to_owned()),
            prompt: Some(version.prompt().to_owned()),
            ..ProjectChanges::default()
        };
        let updated = self.apply_update(project, changes, true).await?;
        tracing::info!(
            project_id = %updated.id(),
            version_id = %version_id,
            "restored a snapshot"
        );

        self.assemble_detail(&updated, actor.builder_id()).await
    }

    async fn toggle_featured(
        &self,
        request: ToggleFeaturedRequest,
    ) -> Result<ProjectDetailPayload, Error> {
        let ToggleFeaturedRequest { project_id, actor } = request;
        if !permissions::can_curate(&actor) {
            return Err(Error::forbidden("only the curator may feature artifacts"));
        }

        let project = self.load_project(&project_id).await?;
        let changes = ProjectChanges {
            featured: Some(!project.featured()),
            ..ProjectChanges::default()
        };
        let updated = self.apply_update(project, changes, false).await?;
        tracing::info!(
            project_id = %updated.id(),
            featured = updated.featured(),
            "toggled the featured flag"
        );

        self.assemble_detail(&updated, None).await
    }

    async fn delete_project(&self, request: DeleteProjectRequest) -> Result<(), Error> {
        let DeleteProjectRequest { project_id, actor } = request;
        let project = self.load_project(&project_id).await?;
        if !permissions::can_delete(&project, &actor) {
            return Err(Error::forbidden("you do not own this artifact"));
        }

        let removed = self
            .projects
            .delete(&project_id)
            .await
            .map_err(map_project_repository_error)?;
        if !removed {
            return Err(Error::not_found(format!("project {project_id} not found")));
        }
        tracing::info!(project_id = %project_id, "deleted an artifact");
        Ok(())
    }
}

#[cfg(test)]
#[path = "studio_service_tests.rs"]
mod tests;
