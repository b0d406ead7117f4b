//! Play and like handlers.
//!
//! ```text
//! POST /api/v1/projects/{id}/plays {"userId":"..."}
//! POST /api/v1/projects/{id}/like {"userId":"...","liked":true}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{
    EngagementCommand, LikeOutcomePayload, PlayOutcomePayload, RecordPlayRequest,
    ToggleLikeRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_acting_identity, parse_uuid};

/// Request body for `POST /api/v1/projects/{id}/plays`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPlayBody {
    pub user_id: String,
}

/// Request body for `POST /api/v1/projects/{id}/like`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeBody {
    pub user_id: String,
    /// Desired like state; repeating the current state is a no-op success.
    pub liked: bool,
}

/// Record one play of an artifact.
///
/// Repeat plays inside the cooldown window are not an error: the response
/// says `counted: false` and the counter stays put.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/plays",
    params(
        ("id" = String, Path, description = "Artifact id")
    ),
    request_body = RecordPlayBody,
    responses(
        (status = 200, description = "Play outcome", body = PlayOutcomePayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["engagement"],
    operation_id = "recordPlay"
)]
#[post("/projects/{id}/plays")]
pub async fn record_play(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecordPlayBody>,
) -> ApiResult<web::Json<PlayOutcomePayload>> {
    let project_id = parse_uuid(&path, FieldName::new("id"))?;
    let actor = parse_acting_identity(&payload.user_id, FieldName::new("userId"))?;
    let outcome = state
        .engagement
        .record_play(RecordPlayRequest { project_id, actor })
        .await?;
    Ok(web::Json(outcome))
}

/// Drive a builder's like state for an artifact.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/like",
    params(
        ("id" = String, Path, description = "Artifact id")
    ),
    request_body = ToggleLikeBody,
    responses(
        (status = 200, description = "Like outcome", body = LikeOutcomePayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["engagement"],
    operation_id = "toggleLike"
)]
#[post("/projects/{id}/like")]
pub async fn toggle_like(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ToggleLikeBody>,
) -> ApiResult<web::Json<LikeOutcomePayload>> {
    let project_id = parse_uuid(&path, FieldName::new("id"))?;
    let body = payload.into_inner();
    let actor = parse_acting_identity(&body.user_id, FieldName::new("userId"))?;
    let outcome = state
        .engagement
        .toggle_like(ToggleLikeRequest {
            project_id,
            actor,
            liked: body.liked,
        })
        .await?;
    Ok(web::Json(outcome))
}
