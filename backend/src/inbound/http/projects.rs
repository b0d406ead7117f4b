//! Artifact lifecycle handlers.
//!
//! ```text
//! GET /api/v1/projects?userId=3fa85f64-5717-4562-b3fc-2c963f66afa6
//! POST /api/v1/projects {"userId":"...","name":"Space Blaster"}
//! GET /api/v1/projects/{id}?viewerId=...
//! PUT /api/v1/projects/{id} {"userId":"...","name":"Renamed"}
//! DELETE /api/v1/projects/{id} {"userId":"..."}
//! POST /api/v1/projects/{id}/generate {"userId":"...","instruction":"a bouncing ball"}
//! POST /api/v1/projects/{id}/featured {"userId":"iamthemostpowerfuluser"}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::identity::Identity;
use crate::domain::ports::{
    CreateProjectRequest, DeleteProjectRequest, GalleryQuery, GenerateDocumentRequest,
    GenerateDocumentResponse, OwnerProjectsRequest, ProjectDetailPayload, ProjectDetailRequest,
    ProjectSummaryPayload, StudioCommand, ToggleFeaturedRequest, UpdateProjectRequest,
};
use crate::domain::project::{Emoji, ProjectChanges, ProjectName, ProjectValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, missing_field_error, parse_acting_identity, parse_uuid, parse_viewer_id,
};

/// Request body for `POST /api/v1/projects`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectBody {
    /// Acting identity; the curator cannot own artifacts.
    pub user_id: String,
    /// Defaults to "Untitled Creation" when absent.
    pub name: Option<String>,
}

/// Request body for `PUT /api/v1/projects/{id}`.
///
/// Absent fields are left untouched. Whether a present field is applied
/// depends on who is asking; see the permission matrix in the studio
/// service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectBody {
    pub user_id: String,
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub html_content: Option<String>,
    pub prompt: Option<String>,
}

/// Request body for `DELETE /api/v1/projects/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteProjectBody {
    pub user_id: String,
}

/// Request body for `POST /api/v1/projects/{id}/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDocumentBody {
    pub user_id: String,
    /// What to build, in the creator's own words and language.
    pub instruction: String,
}

/// Request body for `POST /api/v1/projects/{id}/featured`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProjectBody {
    pub user_id: String,
}

fn map_name_error(err: ProjectValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "name", "code": "invalid_name" }))
}

fn map_emoji_error(err: ProjectValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": "emoji", "code": "invalid_emoji" }))
}

/// Query string for [`list_projects`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerProjectsQuery {
    user_id: Option<String>,
}

/// The owner's dashboard listing, most recently updated first.
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    params(
        ("userId" = String, Query, description = "Owner whose artifacts to list")
    ),
    responses(
        (status = 200, description = "Artifact summaries", body = [ProjectSummaryPayload]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "listProjects"
)]
#[get("/projects")]
pub async fn list_projects(
    state: web::Data<HttpState>,
    query: web::Query<OwnerProjectsQuery>,
) -> ApiResult<web::Json<Vec<ProjectSummaryPayload>>> {
    let raw = query
        .user_id
        .as_deref()
        .ok_or_else(|| missing_field_error(FieldName::new("userId")))?;
    let owner_id = match parse_acting_identity(raw, FieldName::new("userId"))? {
        Identity::Builder(id) => id,
        // The curator owns nothing, so its dashboard is empty.
        Identity::Curator => return Ok(web::Json(Vec::new())),
    };
    let summaries = state
        .gallery
        .owner_projects(OwnerProjectsRequest { owner_id })
        .await?;
    Ok(web::Json(summaries))
}

/// Create an empty artifact owned by the acting builder.
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectBody,
    responses(
        (status = 200, description = "Created artifact", body = ProjectDetailPayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "createProject"
)]
#[post("/projects")]
pub async fn create_project(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProjectBody>,
) -> ApiResult<web::Json<ProjectDetailPayload>> {
    let body = payload.into_inner();
    let actor = parse_acting_identity(&body.user_id, FieldName::new("userId"))?;
    let name = body
        .name
        .map(ProjectName::new)
        .transpose()
        .map_err(map_name_error)?;
    let detail = state
        .studio
        .create_project(CreateProjectRequest { actor, name })
        .await?;
    Ok(web::Json(detail))
}

/// Query string for [`project_detail`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetailQuery {
    viewer_id: Option<String>,
}

/// One artifact with document, counts, and creator summary.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = String, Path, description = "Artifact id"),
        ("viewerId" = Option<String>, Query, description = "Identity of whoever is looking")
    ),
    responses(
        (status = 200, description = "Artifact detail", body = ProjectDetailPayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "projectDetail"
)]
#[get("/projects/{id}")]
pub async fn project_detail(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ProjectDetailQuery>,
) -> ApiResult<web::Json<ProjectDetailPayload>> {
    let project_id = parse_uuid(&path, FieldName::new("id"))?;
    let viewer_id = parse_viewer_id(query.viewer_id.as_deref(), FieldName::new("viewerId"))?;
    let detail = state
        .gallery
        .project_detail(ProjectDetailRequest {
            project_id,
            viewer_id,
        })
        .await?;
    Ok(web::Json(detail))
}

/// Patch an artifact's name, emoji, or document.
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = String, Path, description = "Artifact id")
    ),
    request_body = UpdateProjectBody,
    responses(
        (status = 200, description = "Updated artifact", body = ProjectDetailPayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "updateProject"
)]
#[put("/projects/{id}")]
pub async fn update_project(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateProjectBody>,
) -> ApiResult<web::Json<ProjectDetailPayload>> {
    let project_id = parse_uuid(&path, FieldName::new("id"))?;
    let body = payload.into_inner();
    let actor = parse_acting_identity(&body.user_id, FieldName::new("userId"))?;
    let changes = ProjectChanges {
        name: body
            .name
            .map(ProjectName::new)
            .transpose()
            .map_err(map_name_error)?,
        emoji: body
            .emoji
            .map(Emoji::new)
            .transpose()
            .map_err(map_emoji_error)?,
        html_content: body.html_content,
        prompt: body.prompt,
        featured: None,
    };
    let detail = state
        .studio
        .update_project(UpdateProjectRequest {
            project_id,
            actor,
            changes,
        })
        .await?;
    Ok(web::Json(detail))
}

/// Delete an artifact along with its versions, likes, and plays.
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = String, Path, description = "Artifact id")
    ),
    request_body = DeleteProjectBody,
    responses(
        (status = 204, description = "Artifact deleted"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "deleteProject"
)]
#[delete("/projects/{id}")]
pub async fn delete_project(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<DeleteProjectBody>,
) -> ApiResult<HttpResponse> {
    let project_id = parse_uuid(&path, FieldName::new("id"))?;
    let actor = parse_acting_identity(&payload.user_id, FieldName::new("userId"))?;
    state
        .studio
        .delete_project(DeleteProjectRequest { project_id, actor })
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Run the translate, generate, title, persist pipeline for an artifact.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/generate",
    params(
        ("id" = String, Path, description = "Artifact id")
    ),
    request_body = GenerateDocumentBody,
    responses(
        (status = 200, description = "Generation outcome", body = GenerateDocumentResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 502, description = "Generator failure", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "generateDocument"
)]
#[post("/projects/{id}/generate")]
pub async fn generate_document(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<GenerateDocumentBody>,
) -> ApiResult<web::Json<GenerateDocumentResponse>> {
    let project_id = parse_uuid(&path, FieldName::new("id"))?;
    let body = payload.into_inner();
    let actor = parse_acting_identity(&body.user_id, FieldName::new("userId"))?;
    let response = state
        .studio
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor,
            instruction: body.instruction,
        })
        .await?;
    Ok(web::Json(response))
}

/// Flip the featured flag. Curator only.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/featured",
    params(
        ("id" = String, Path, description = "Artifact id")
    ),
    request_body = FeatureProjectBody,
    responses(
        (status = 200, description = "Updated artifact", body = ProjectDetailPayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projects"],
    operation_id = "toggleFeatured"
)]
#[post("/projects/{id}/featured")]
pub async fn toggle_featured(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<FeatureProjectBody>,
) -> ApiResult<web::Json<ProjectDetailPayload>> {
    let project_id = parse_uuid(&path, FieldName::new("id"))?;
    let actor = parse_acting_identity(&payload.user_id, FieldName::new("userId"))?;
    let detail = state
        .studio
        .toggle_featured(ToggleFeaturedRequest { project_id, actor })
        .await?;
    Ok(web::Json(detail))
}

#[cfg(test)]
#[path = "projects_tests.rs"]
mod tests;
