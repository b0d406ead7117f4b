//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod builder_query;
mod code_generator;
mod engagement_command;
mod engagement_repository;
mod gallery_query;
mod identity_command;
mod leaderboard_query;
mod project_repository;
mod studio_command;
mod transcriber;
mod translator;
mod user_repository;
mod version_repository;

#[cfg(test)]
pub use builder_query::MockBuilderQuery;
pub use builder_query::{
    BuilderProfilePayload, BuilderProfileRequest, BuilderProjectPayload, BuilderProjectsRequest,
    BuilderQuery, CreatorPayload, FixtureBuilderQuery,
};
#[cfg(test)]
pub use code_generator::MockCodeGenerator;
pub use code_generator::{
    CodeGenerator, CodeGeneratorError, FixtureCodeGenerator, GenerationRequest,
};
#[cfg(test)]
pub use engagement_command::MockEngagementCommand;
pub use engagement_command::{
    EngagementCommand, FixtureEngagementCommand, LikeOutcomePayload, PlayOutcomePayload,
    RecordPlayRequest, ToggleLikeRequest,
};
#[cfg(test)]
pub use engagement_repository::MockEngagementRepository;
pub use engagement_repository::{
    EngagementRepository, EngagementRepositoryError, FixtureEngagementRepository, LikeInsert,
};
#[cfg(test)]
pub use gallery_query::MockGalleryQuery;
pub use gallery_query::{
    FixtureGalleryQuery, GalleryQuery, OwnerProjectsRequest, PreviewDocument,
    ProjectDetailPayload, ProjectDetailRequest, ProjectSummaryPayload, VersionDetailPayload,
    VersionDetailRequest, VersionSummaryPayload,
};
#[cfg(test)]
pub use identity_command::MockIdentityCommand;
pub use identity_command::{
    FixtureIdentityCommand, IdentityCommand, ResolveIdentityRequest, ResolvedIdentity,
};
#[cfg(test)]
pub use leaderboard_query::MockLeaderboardQuery;
pub use leaderboard_query::{
    BuilderLeaderboardEntry, DEFAULT_LEADERBOARD_LIMIT, FixtureLeaderboardQuery,
    LeaderboardQuery, LeaderboardRequest, ProjectLeaderboardEntry,
};
#[cfg(test)]
pub use project_repository::MockProjectRepository;
pub use project_repository::{
    FixtureProjectRepository, ProjectCard, ProjectRepository, ProjectRepositoryError,
    ProjectSummary,
};
#[cfg(test)]
pub use studio_command::MockStudioCommand;
pub use studio_command::{
    CreateProjectRequest, DeleteProjectRequest, FixtureStudioCommand, GenerateDocumentRequest,
    GenerateDocumentResponse, RestoreVersionRequest, StudioCommand, ToggleFeaturedRequest,
    UpdateProjectRequest,
};
#[cfg(test)]
pub use transcriber::MockTranscriber;
pub use transcriber::{AudioUpload, FixtureTranscriber, Transcriber, TranscriberError};
#[cfg(test)]
pub use translator::MockTranslator;
pub use translator::{FixtureTranslator, TranslationOutcome, Translator, TranslatorError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use version_repository::MockVersionRepository;
pub use version_repository::{
    FixtureVersionRepository, VersionRepository, VersionRepositoryError,
};
