//! Tests for identity services.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::identity::CURATOR_TOKEN;
use crate::domain::ports::{
    MockEngagementRepository, MockProjectRepository, MockUserRepository, ProjectCard,
};
use crate::domain::user::BuilderStats;
use crate::test_support::{MutableClock, fixture_timestamp};

fn service_with(users: MockUserRepository) -> IdentityCommandService<MockUserRepository> {
    IdentityCommandService::new(
        Arc::new(users),
        Arc::new(MutableClock::new(fixture_timestamp())),
    )
}

fn stored_user(id: UserId) -> User {
    User::new(
        id,
        Username::new("MightyDragon42").expect("valid username"),
        fixture_timestamp(),
    )
}

#[tokio::test]
async fn resolve_returns_the_curator_without_a_store_lookup() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);
    users.expect_insert().times(0);

    let resolved = service_with(users)
        .resolve_or_create(ResolveIdentityRequest {
            cached_id: Some(CURATOR_TOKEN.to_owned()),
        })
        .await
        .expect("curator resolves");

    assert_eq!(resolved, ResolvedIdentity::Curator);
}

#[tokio::test]
async fn resolve_returns_an_existing_builder_unchanged() {
    let cached = UserId::random();
    let expected = stored_user(cached.clone());
    let found = expected.clone();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    users.expect_insert().times(0);

    let resolved = service_with(users)
        .resolve_or_create(ResolveIdentityRequest {
            cached_id: Some(cached.to_string()),
        })
        .await
        .expect("builder resolves");

    assert_eq!(
        resolved,
        ResolvedIdentity::Builder {
            user: expected,
            minted: false,
        }
    );
}

#[tokio::test]
async fn resolve_mints_when_the_cached_id_is_stale() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));
    users.expect_insert().times(1).return_once(|_| Ok(()));

    let resolved = service_with(users)
        .resolve_or_create(ResolveIdentityRequest {
            cached_id: Some(UserId::random().to_string()),
        })
        .await
        .expect("stale id mints a new builder");

    match resolved {
        ResolvedIdentity::Builder { user, minted } => {
            assert!(minted);
            assert!(!user.username().as_ref().is_empty());
            assert_eq!(user.created_at(), fixture_timestamp());
        }
        ResolvedIdentity::Curator => panic!("expected builder"),
    }
}

#[tokio::test]
async fn resolve_mints_when_no_id_was_cached() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);
    users.expect_insert().times(1).return_once(|_| Ok(()));

    let resolved = service_with(users)
        .resolve_or_create(ResolveIdentityRequest { cached_id: None })
        .await
        .expect("absent id mints a new builder");

    assert!(matches!(
        resolved,
        ResolvedIdentity::Builder { minted: true, .. }
    ));
}

#[tokio::test]
async fn minting_retries_username_collisions() {
    let mut users = MockUserRepository::new();
    let mut collisions = 2;
    users
        .expect_insert()
        .times(3)
        .returning(move |user: &User| {
            if collisions > 0 {
                collisions -= 1;
                Err(UserRepositoryError::duplicate_username(
                    user.username().as_ref(),
                ))
            } else {
                Ok(())
            }
        });

    let resolved = service_with(users)
        .resolve_or_create(ResolveIdentityRequest { cached_id: None })
        .await
        .expect("collisions retried");

    assert!(matches!(
        resolved,
        ResolvedIdentity::Builder { minted: true, .. }
    ));
}

#[tokio::test]
async fn minting_gives_up_after_exhausting_attempts() {
    let mut users = MockUserRepository::new();
    users
        .expect_insert()
        .times(USERNAME_MINT_ATTEMPTS as usize)
        .returning(|user: &User| {
            Err(UserRepositoryError::duplicate_username(
                user.username().as_ref(),
            ))
        });

    let error = service_with(users)
        .resolve_or_create(ResolveIdentityRequest { cached_id: None })
        .await
        .expect_err("exhausted attempts fail");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[tokio::test]
async fn resolve_maps_connection_error_to_service_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Err(UserRepositoryError::connection("pool unavailable")));

    let error = service_with(users)
        .resolve_or_create(ResolveIdentityRequest {
            cached_id: Some(UserId::random().to_string()),
        })
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

fn profile_service(
    users: MockUserRepository,
    projects: MockProjectRepository,
    engagement: MockEngagementRepository,
) -> BuilderQueryService<MockUserRepository, MockProjectRepository, MockEngagementRepository> {
    BuilderQueryService::new(Arc::new(users), Arc::new(projects), Arc::new(engagement))
}

#[tokio::test]
async fn profile_returns_stats_for_an_existing_builder() {
    let builder_id = UserId::random();
    let found = stored_user(builder_id.clone());

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    users.expect_builder_stats().times(1).return_once(|_| {
        Ok(BuilderStats {
            game_count: 3,
            total_likes: 11,
        })
    });

    let profile = profile_service(users, MockProjectRepository::new(), MockEngagementRepository::new())
        .profile(BuilderProfileRequest {
            builder_id: builder_id.clone(),
        })
        .await
        .expect("profile resolves");

    assert_eq!(profile.id, builder_id);
    assert_eq!(profile.username, "MightyDragon42");
    assert_eq!(profile.game_count, 3);
    assert_eq!(profile.total_likes, 11);
}

#[tokio::test]
async fn profile_of_an_unknown_builder_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let error = profile_service(users, MockProjectRepository::new(), MockEngagementRepository::new())
        .profile(BuilderProfileRequest {
            builder_id: UserId::random(),
        })
        .await
        .expect_err("unknown builder");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

fn card(id: Uuid, creator_id: UserId) -> ProjectCard {
    ProjectCard {
        id,
        name: "Bouncy Ball Fun".to_owned(),
        emoji: "🎮".to_owned(),
        prompt: "make a bouncing ball game".to_owned(),
        play_count: 4,
        creator_id,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    }
}

#[tokio::test]
async fn project_cards_carry_likes_ownership_and_creator_summary() {
    let builder_id = UserId::random();
    let liked_id = Uuid::new_v4();
    let other_id = Uuid::new_v4();
    let creator = stored_user(builder_id.clone());

    let mut projects = MockProjectRepository::new();
    let cards = vec![
        card(liked_id, builder_id.clone()),
        card(other_id, builder_id.clone()),
    ];
    projects
        .expect_list_cards_for_creator()
        .times(1)
        .return_once(move |_| Ok(cards));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(creator)));

    let mut engagement = MockEngagementRepository::new();
    engagement
        .expect_like_counts()
        .times(1)
        .return_once(move |_| Ok(HashMap::from([(liked_id, 5)])));
    engagement
        .expect_liked_project_ids()
        .times(1)
        .return_once(move |_, _| Ok(HashSet::from([liked_id])));

    let listed = profile_service(users, projects, engagement)
        .projects(BuilderProjectsRequest {
            builder_id: builder_id.clone(),
            viewer_id: Some(builder_id.clone()),
        })
        .await
        .expect("cards resolve");

    assert_eq!(listed.len(), 2);
    let first = &listed[0];
    assert_eq!(first.like_count, 5);
    assert!(first.is_liked_by_viewer);
    assert!(first.is_owner);
    assert_eq!(first.creator.game_count, 2);
    assert_eq!(first.creator.username, "MightyDragon42");
    let second = &listed[1];
    assert_eq!(second.like_count, 0);
    assert!(!second.is_liked_by_viewer);
}

#[tokio::test]
async fn project_cards_without_a_viewer_skip_the_liked_lookup() {
    let builder_id = UserId::random();
    let creator = stored_user(builder_id.clone());

    let mut projects = MockProjectRepository::new();
    let cards = vec![card(Uuid::new_v4(), builder_id.clone())];
    projects
        .expect_list_cards_for_creator()
        .times(1)
        .return_once(move |_| Ok(cards));

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(creator)));

    let mut engagement = MockEngagementRepository::new();
    engagement
        .expect_like_counts()
        .times(1)
        .return_once(|_| Ok(HashMap::new()));
    engagement.expect_liked_project_ids().times(0);

    let listed = profile_service(users, projects, engagement)
        .projects(BuilderProjectsRequest {
            builder_id,
            viewer_id: None,
        })
        .await
        .expect("cards resolve");

    assert!(!listed[0].is_liked_by_viewer);
    assert!(!listed[0].is_owner);
}

#[tokio::test]
async fn an_empty_portfolio_short_circuits() {
    let mut projects = MockProjectRepository::new();
    projects
        .expect_list_cards_for_creator()
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);

    let listed = profile_service(users, projects, MockEngagementRepository::new())
        .projects(BuilderProjectsRequest {
            builder_id: UserId::random(),
            viewer_id: None,
        })
        .await
        .expect("empty portfolio resolves");

    assert!(listed.is_empty());
}
