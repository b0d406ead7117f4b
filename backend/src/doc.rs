//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer plus the health
//!   probes
//! - **Schemas**: The domain error envelope and the payload types carried by
//!   the driving ports and the handler request bodies
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::ports::{
    BuilderLeaderboardEntry, BuilderProfilePayload, BuilderProjectPayload, CreatorPayload,
    GenerateDocumentResponse, LikeOutcomePayload, PlayOutcomePayload, ProjectDetailPayload,
    ProjectLeaderboardEntry, ProjectSummaryPayload, ResolveIdentityRequest, VersionDetailPayload,
    VersionSummaryPayload,
};
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::engagement::{RecordPlayBody, ToggleLikeBody};
use crate::inbound::http::projects::{
    CreateProjectBody, DeleteProjectBody, FeatureProjectBody, GenerateDocumentBody,
    UpdateProjectBody,
};
use crate::inbound::http::transcribe::TranscriptionBody;
use crate::inbound::http::users::ResolvedUserBody;
use crate::inbound::http::versions::RestoreVersionBody;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PlayForge backend API",
        description = "HTTP interface for describing, generating, playing, and ranking \
                       self-contained web artifacts.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::resolve_user,
        crate::inbound::http::users::builder_profile,
        crate::inbound::http::users::builder_projects,
        crate::inbound::http::projects::list_projects,
        crate::inbound::http::projects::create_project,
        crate::inbound::http::projects::project_detail,
        crate::inbound::http::projects::update_project,
        crate::inbound::http::projects::delete_project,
        crate::inbound::http::projects::generate_document,
        crate::inbound::http::projects::toggle_featured,
        crate::inbound::http::versions::list_versions,
        crate::inbound::http::versions::version_detail,
        crate::inbound::http::versions::restore_version,
        crate::inbound::http::engagement::record_play,
        crate::inbound::http::engagement::toggle_like,
        crate::inbound::http::leaderboard::top_projects,
        crate::inbound::http::leaderboard::top_builders,
        crate::inbound::http::transcribe::transcribe,
        crate::inbound::http::preview::preview,
        crate::api::health::ready,
        crate::api::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        ResolveIdentityRequest,
        ResolvedUserBody,
        CreatorPayload,
        BuilderProfilePayload,
        BuilderProjectPayload,
        ProjectSummaryPayload,
        ProjectDetailPayload,
        CreateProjectBody,
        UpdateProjectBody,
        DeleteProjectBody,
        GenerateDocumentBody,
        GenerateDocumentResponse,
        FeatureProjectBody,
        VersionSummaryPayload,
        VersionDetailPayload,
        RestoreVersionBody,
        RecordPlayBody,
        PlayOutcomePayload,
        ToggleLikeBody,
        LikeOutcomePayload,
        ProjectLeaderboardEntry,
        BuilderLeaderboardEntry,
        TranscriptionBody,
    )),
    tags(
        (name = "users", description = "Identity resolution and builder pages"),
        (name = "projects", description = "Artifact lifecycle and generation"),
        (name = "versions", description = "Version history and restores"),
        (name = "engagement", description = "Plays and likes"),
        (name = "leaderboard", description = "Popularity rankings"),
        (name = "transcribe", description = "Audio transcription"),
        (name = "preview", description = "Raw document rendering for the play surface"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.
    //!
    //! Schema registration and endpoint reference tests are covered by the
    //! BDD tests in `backend/tests/openapi_schemas_bdd.rs`.

    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    const ERROR_SCHEMA_NAME: &str = "Error";
    const DETAIL_SCHEMA_NAME: &str = "ProjectDetailPayload";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_detail_schema_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let detail_schema = schemas.get(DETAIL_SCHEMA_NAME).expect("detail schema");

        assert_object_schema_has_field(detail_schema, "htmlContent");
        assert_object_schema_has_field(detail_schema, "playCount");
        assert_object_schema_has_field(detail_schema, "isLikedByViewer");
    }
}
