//! Builder identity and profile handlers.
//!
//! ```text
//! POST /api/v1/users {"cachedId":"3fa85f64-5717-4562-b3fc-2c963f66afa6"}
//! GET /api/v1/users/{id}
//! GET /api/v1/users/{id}/projects?viewerId=3fa85f64-5717-4562-b3fc-2c963f66afa6
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::identity::{CURATOR_TOKEN, Identity};
use crate::domain::ports::{
    BuilderProfilePayload, BuilderProfileRequest, BuilderProjectPayload, BuilderProjectsRequest,
    BuilderQuery, IdentityCommand, ResolveIdentityRequest, ResolvedIdentity,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_acting_identity, parse_viewer_id};

/// Response body for `POST /api/v1/users`.
///
/// The `id` is the string the client should cache and replay: a plain UUID
/// for builders, the reserved token for the curator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedUserBody {
    pub id: String,
    pub username: String,
    #[schema(value_type = Option<String>, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    pub curator: bool,
    pub minted: bool,
}

impl From<ResolvedIdentity> for ResolvedUserBody {
    fn from(resolved: ResolvedIdentity) -> Self {
        match resolved {
            ResolvedIdentity::Builder { user, minted } => Self {
                id: user.id().to_string(),
                username: user.username().to_string(),
                created_at: Some(user.created_at()),
                curator: false,
                minted,
            },
            ResolvedIdentity::Curator => Self {
                id: CURATOR_TOKEN.to_owned(),
                username: "curator".to_owned(),
                created_at: None,
                curator: true,
                minted: false,
            },
        }
    }
}

/// Resolve a cached identity or mint a new builder.
///
/// Clients send whatever identity string they remembered; unknown or absent
/// ids always mint a fresh builder, so this endpoint cannot fail for want of
/// credentials.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = ResolveIdentityRequest,
    responses(
        (status = 200, description = "Resolved identity", body = ResolvedUserBody),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "resolveUser"
)]
#[post("/users")]
pub async fn resolve_user(
    state: web::Data<HttpState>,
    payload: web::Json<ResolveIdentityRequest>,
) -> ApiResult<web::Json<ResolvedUserBody>> {
    let resolved = state.identity.resolve_or_create(payload.into_inner()).await?;
    Ok(web::Json(ResolvedUserBody::from(resolved)))
}

/// A builder's public profile with aggregate statistics.
///
/// The curator has no account row, so looking it up is a plain not-found.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(
        ("id" = String, Path, description = "Builder id or the reserved identity")
    ),
    responses(
        (status = 200, description = "Builder profile", body = BuilderProfilePayload),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "builderProfile"
)]
#[get("/users/{id}")]
pub async fn builder_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BuilderProfilePayload>> {
    let builder_id = match parse_acting_identity(&path, FieldName::new("id"))? {
        Identity::Builder(id) => id,
        Identity::Curator => {
            return Err(Error::not_found("no builder account behind the reserved identity"));
        }
    };
    let profile = state
        .builders
        .profile(BuilderProfileRequest { builder_id })
        .await?;
    Ok(web::Json(profile))
}

/// Query string for [`builder_projects`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderProjectsQuery {
    viewer_id: Option<String>,
}

/// The artifact cards on a builder's public page, newest update first.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/projects",
    params(
        ("id" = String, Path, description = "Builder id or the reserved identity"),
        ("viewerId" = Option<String>, Query, description = "Identity of whoever is looking")
    ),
    responses(
        (status = 200, description = "Artifact cards", body = [BuilderProjectPayload]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "builderProjects"
)]
#[get("/users/{id}/projects")]
pub async fn builder_projects(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<BuilderProjectsQuery>,
) -> ApiResult<web::Json<Vec<BuilderProjectPayload>>> {
    let builder_id = match parse_acting_identity(&path, FieldName::new("id"))? {
        Identity::Builder(id) => id,
        // The curator owns no artifacts; its public page is empty.
        Identity::Curator => return Ok(web::Json(Vec::new())),
    };
    let viewer_id = parse_viewer_id(query.viewer_id.as_deref(), FieldName::new("viewerId"))?;
    let cards = state
        .builders
        .projects(BuilderProjectsRequest {
            builder_id,
            viewer_id,
        })
        .await?;
    Ok(web::Json(cards))
}
