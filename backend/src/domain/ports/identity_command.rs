//! Driving port for resolving or minting builder identities.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::identity::{CURATOR_TOKEN, Identity, UserId};
use crate::domain::user::{User, Username};

/// Request to resolve a possibly stale cached identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveIdentityRequest {
    /// Identity string the client remembered, if any.
    pub cached_id: Option<String>,
}

/// A resolved acting identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedIdentity {
    /// A backed builder account, freshly minted when `minted` is set.
    Builder { user: User, minted: bool },
    /// The reserved curator; no account row exists for it.
    Curator,
}

/// Driving port for identity resolution.
///
/// A cached id that resolves to an existing builder (or is the reserved
/// token) is returned as-is; anything else mints a brand-new builder with
/// a generated username. Resolution never fails for want of a cached id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityCommand: Send + Sync {
    /// Resolve the cached identity or mint a new builder.
    async fn resolve_or_create(
        &self,
        request: ResolveIdentityRequest,
    ) -> Result<ResolvedIdentity, Error>;
}

/// Fixture command for tests and credential-free boots.
///
/// Echoes well-formed cached builders back without a store lookup and
/// mints an in-memory builder otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureIdentityCommand;

#[async_trait]
impl IdentityCommand for FixtureIdentityCommand {
    async fn resolve_or_create(
        &self,
        request: ResolveIdentityRequest,
    ) -> Result<ResolvedIdentity, Error> {
        let fixture_user = |id: UserId, minted: bool| -> Result<ResolvedIdentity, Error> {
            let username = Username::new("SwiftPhoenix7")
                .map_err(|err| Error::internal(format!("fixture username invalid: {err}")))?;
            Ok(ResolvedIdentity::Builder {
                user: User::new(id, username, chrono::Utc::now()),
                minted,
            })
        };

        match request.cached_id.as_deref().map(Identity::parse) {
            Some(Ok(Identity::Curator)) => Ok(ResolvedIdentity::Curator),
            Some(Ok(Identity::Builder(id))) => fixture_user(id, false),
            _ => fixture_user(UserId::random(), true),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_resolves_the_reserved_token_to_curator() {
        let command = FixtureIdentityCommand;
        let resolved = command
            .resolve_or_create(ResolveIdentityRequest {
                cached_id: Some(CURATOR_TOKEN.to_owned()),
            })
            .await
            .expect("fixture resolution succeeds");
        assert_eq!(resolved, ResolvedIdentity::Curator);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_echoes_a_cached_builder() {
        let command = FixtureIdentityCommand;
        let cached = UserId::random();
        let resolved = command
            .resolve_or_create(ResolveIdentityRequest {
                cached_id: Some(cached.to_string()),
            })
            .await
            .expect("fixture resolution succeeds");
        match resolved {
            ResolvedIdentity::Builder { user, minted } => {
                assert_eq!(user.id(), &cached);
                assert!(!minted);
            }
            ResolvedIdentity::Curator => panic!("expected builder"),
        }
    }

    #[rstest]
    #[case(None)]
    #[case(Some("not-a-uuid".to_owned()))]
    #[tokio::test]
    async fn fixture_mints_for_absent_or_malformed_ids(#[case] cached_id: Option<String>) {
        let command = FixtureIdentityCommand;
        let resolved = command
            .resolve_or_create(ResolveIdentityRequest { cached_id })
            .await
            .expect("fixture resolution succeeds");
        match resolved {
            ResolvedIdentity::Builder { minted, .. } => assert!(minted),
            ResolvedIdentity::Curator => panic!("expected builder"),
        }
    }
}
