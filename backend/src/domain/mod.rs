//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define the strongly typed core of the creation studio —
//! identities, artifacts, snapshots, engagement facts — plus the services
//! that orchestrate them behind the driving ports. Keep types immutable
//! and document invariants and serialisation contracts (serde) in each
//! type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode (aliases to `error::*`) — API error payload and its
//!   stable identifiers.
//! - Identity / UserId (aliases to `identity::*`) — who is acting, with
//!   the reserved curator token parsed at the edge.
//! - Project / Version (aliases to `project::*` / `version::*`) — the
//!   artifact aggregate and its history snapshots.
//! - The `*Service` types — port implementations wired up in
//!   `server::state_builders`.

pub mod engagement;
pub mod engagement_service;
pub mod error;
pub mod gallery_service;
pub mod identity;
pub mod identity_service;
pub mod leaderboard_service;
pub mod permissions;
pub mod ports;
pub mod project;
pub mod prompts;
pub mod ranking;
pub mod studio_service;
pub mod trace_id;
pub mod user;
pub mod version;

pub use self::engagement::{
    BuilderRanking, CreatorSummary, LikeOutcome, PlayOutcome, ProjectRanking,
};
pub use self::engagement_service::EngagementCommandService;
pub use self::error::{Error, ErrorCode};
pub use self::gallery_service::GalleryQueryService;
pub use self::identity::{CURATOR_TOKEN, Identity, IdentityValidationError, UserId};
pub use self::identity_service::{BuilderQueryService, IdentityCommandService};
pub use self::leaderboard_service::LeaderboardQueryService;
pub use self::project::{
    ContentState, Emoji, Project, ProjectChanges, ProjectName, ProjectRecord, ProjectSeed,
    ProjectValidationError,
};
pub use self::studio_service::StudioCommandService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{BuilderStats, User, UserValidationError, Username};
pub use self::version::{Version, VersionRecord, VersionSummary};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use playforge_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
