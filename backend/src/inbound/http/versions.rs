//! Version history handlers.
//!
//! ```text
//! GET /api/v1/projects/{id}/versions
//! GET /api/v1/projects/{id}/versions/{versionId}
//! POST /api/v1/projects/{id}/versions/{versionId}/restore {"userId":"..."}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{
    GalleryQuery, ProjectDetailPayload, RestoreVersionRequest, StudioCommand,
    VersionDetailPayload, VersionDetailRequest, VersionSummaryPayload,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_acting_identity, parse_uuid};

/// Request body for `POST /api/v1/projects/{id}/versions/{versionId}/restore`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestoreVersionBody {
    pub user_id: String,
}

/// History rows for an artifact, newest snapshot first.
///
/// Prompts arrive already decorated: snapshots taken just before a restore
/// carry a " (before restore)" suffix.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/versions",
    params(
        ("id" = String, Path, description = "Artifact id")
    ),
    responses(
        (status = 200, description = "Version history", body = [VersionSummaryPayload]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["versions"],
    operation_id = "listVersions"
)]
#[get("/projects/{id}/versions")]
pub async fn list_versions(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<VersionSummaryPayload>>> {
    let project_id = parse_uuid(&path, FieldName::new("id"))?;
    let rows = state.gallery.versions(&project_id).await?;
    Ok(web::Json(rows))
}

/// One full snapshot, document included.
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}/versions/{versionId}",
    params(
        ("id" = String, Path, description = "Artifact id"),
        ("versionId" = String, Path, description = "Snapshot id")
    ),
    responses(
        (status = 200, description = "Snapshot detail", body = VersionDetailPayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["versions"],
    operation_id = "versionDetail"
)]
#[get("/projects/{id}/versions/{version_id}")]
pub async fn version_detail(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<web::Json<VersionDetailPayload>> {
    let (raw_project, raw_version) = path.into_inner();
    let project_id = parse_uuid(&raw_project, FieldName::new("id"))?;
    let version_id = parse_uuid(&raw_version, FieldName::new("versionId"))?;
    let detail = state
        .gallery
        .version_detail(VersionDetailRequest {
            project_id,
            version_id,
        })
        .await?;
    Ok(web::Json(detail))
}

/// Copy a snapshot's document back onto its artifact.
///
/// The current document is snapshotted first, so a restore is always
/// reversible through the history it extends.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/versions/{versionId}/restore",
    params(
        ("id" = String, Path, description = "Artifact id"),
        ("versionId" = String, Path, description = "Snapshot id")
    ),
    request_body = RestoreVersionBody,
    responses(
        (status = 200, description = "Updated artifact", body = ProjectDetailPayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["versions"],
    operation_id = "restoreVersion"
)]
#[post("/projects/{id}/versions/{version_id}/restore")]
pub async fn restore_version(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
    payload: web::Json<RestoreVersionBody>,
) -> ApiResult<web::Json<ProjectDetailPayload>> {
    let (raw_project, raw_version) = path.into_inner();
    let project_id = parse_uuid(&raw_project, FieldName::new("id"))?;
    let version_id = parse_uuid(&raw_version, FieldName::new("versionId"))?;
    let actor = parse_acting_identity(&payload.user_id, FieldName::new("userId"))?;
    let detail = state
        .studio
        .restore_version(RestoreVersionRequest {
            project_id,
            version_id,
            actor,
        })
        .await?;
    Ok(web::Json(detail))
}
