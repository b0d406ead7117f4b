//! Tests for the studio command service.

use std::sync::Arc;

use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{
    MockCodeGenerator, MockEngagementRepository, MockProjectRepository, MockTranslator,
    MockUserRepository, MockVersionRepository, TranslationOutcome, TranslatorError,
};
use crate::domain::project::ProjectRecord;
use crate::domain::user::{BuilderStats, User, Username};
use crate::test_support::{MutableClock, fixture_timestamp};

struct Mocks {
    projects: MockProjectRepository,
    versions: MockVersionRepository,
    users: MockUserRepository,
    engagement: MockEngagementRepository,
    generator: MockCodeGenerator,
    translator: MockTranslator,
}

impl Default for Mocks {
    fn default() -> Self {
        Self {
            projects: MockProjectRepository::new(),
            versions: MockVersionRepository::new(),
            users: MockUserRepository::new(),
            engagement: MockEngagementRepository::new(),
            generator: MockCodeGenerator::new(),
            translator: MockTranslator::new(),
        }
    }
}

type Service = StudioCommandService<
    MockProjectRepository,
    MockVersionRepository,
    MockUserRepository,
    MockEngagementRepository,
    MockCodeGenerator,
    MockTranslator,
>;

fn service(mocks: Mocks) -> Service {
    StudioCommandService::new(
        Arc::new(mocks.projects),
        Arc::new(mocks.versions),
        Arc::new(mocks.users),
        Arc::new(mocks.engagement),
        Arc::new(mocks.generator),
        Arc::new(mocks.translator),
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

fn stored_project(id: Uuid, creator_id: UserId, html_content: &str) -> Project {
    Project::from_record(ProjectRecord {
        id,
        name: ProjectName::new("Bouncy Ball Fun").expect("valid name"),
        emoji: Emoji::default(),
        html_content: html_content.to_owned(),
        prompt: "make a bouncing ball game".to_owned(),
        play_count: 2,
        featured: false,
        creator_id,
        created_at: fixture_timestamp(),
        updated_at: fixture_timestamp(),
    })
}

/// Wire up the reads behind the detail payload returned by mutations.
fn expect_detail_assembly(mocks: &mut Mocks, creator: User, with_viewer: bool) {
    mocks
        .users
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(creator)));
    mocks.users.expect_builder_stats().times(1).return_once(|_| {
        Ok(BuilderStats {
            game_count: 1,
            total_likes: 0,
        })
    });
    mocks
        .engagement
        .expect_like_count()
        .times(1)
        .return_once(|_| Ok(0));
    if with_viewer {
        mocks
            .engagement
            .expect_is_liked_by()
            .times(1)
            .return_once(|_, _| Ok(false));
    }
}

fn passthrough_translation(outcome_text: &str) -> TranslationOutcome {
    TranslationOutcome {
        text: outcome_text.to_owned(),
        detected_language: "english".to_owned(),
        was_translated: false,
    }
}

#[tokio::test]
async fn create_project_persists_an_empty_artifact() {
    let owner = UserId::random();
    let creator = stored_user(owner.clone());

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_insert()
        .times(1)
        .withf(|project: &Project| {
            project.html_content().is_empty() && !project.featured() && project.play_count() == 0
        })
        .return_once(|_| Ok(()));
    expect_detail_assembly(&mut mocks, creator, true);

    let detail = service(mocks)
        .create_project(CreateProjectRequest {
            actor: Identity::Builder(owner.clone()),
            name: None,
        })
        .await
        .expect("create succeeds");

    assert_eq!(detail.name, "Untitled Creation");
    assert_eq!(detail.emoji, "🎮");
    assert!(detail.html_content.is_empty());
    assert_eq!(detail.is_liked_by_viewer, Some(false));
    assert_eq!(detail.created_at, fixture_timestamp());
}

#[tokio::test]
async fn create_project_rejects_the_curator() {
    let error = service(Mocks::default())
        .create_project(CreateProjectRequest {
            actor: Identity::Curator,
            name: None,
        })
        .await
        .expect_err("curator cannot own artifacts");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn empty_update_is_invalid() {
    let error = service(Mocks::default())
        .update_project(UpdateProjectRequest {
            project_id: Uuid::new_v4(),
            actor: Identity::Builder(UserId::random()),
            changes: ProjectChanges::default(),
        })
        .await
        .expect_err("empty patch rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn metadata_update_skips_the_snapshot() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>ball</p>");
    let updated = found.clone();

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.versions.expect_insert().times(0);
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| changes.name.is_some() && changes.html_content.is_none())
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    service(mocks)
        .update_project(UpdateProjectRequest {
            project_id,
            actor: Identity::Builder(owner),
            changes: ProjectChanges {
                name: Some(ProjectName::new("Dragon Dash").expect("valid name")),
                ..ProjectChanges::default()
            },
        })
        .await
        .expect("metadata patch succeeds");
}

#[tokio::test]
async fn content_update_snapshots_the_populated_document() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>old</p>");
    let updated = stored_project(project_id, owner.clone(), "<p>new</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .versions
        .expect_insert()
        .times(1)
        .withf(move |snapshot: &Version| {
            snapshot.project_id() == &project_id
                && snapshot.html_content() == "<p>old</p>"
                && !snapshot.pre_restore()
        })
        .return_once(|_| Ok(()));
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| changes.html_content.as_deref() == Some("<p>new</p>"))
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    service(mocks)
        .update_project(UpdateProjectRequest {
            project_id,
            actor: Identity::Builder(owner),
            changes: ProjectChanges {
                html_content: Some("<p>new</p>".to_owned()),
                prompt: Some("now with two balls".to_owned()),
                ..ProjectChanges::default()
            },
        })
        .await
        .expect("content patch succeeds");
}

#[tokio::test]
async fn first_content_write_skips_the_snapshot() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "");
    let updated = stored_project(project_id, owner.clone(), "<p>first</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.versions.expect_insert().times(0);
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    service(mocks)
        .update_project(UpdateProjectRequest {
            project_id,
            actor: Identity::Builder(owner),
            changes: ProjectChanges {
                html_content: Some("<p>first</p>".to_owned()),
                ..ProjectChanges::default()
            },
        })
        .await
        .expect("first content patch succeeds");
}

#[tokio::test]
async fn curator_update_applies_metadata_and_drops_content() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>ball</p>");
    let updated = found.clone();

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.versions.expect_insert().times(0);
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| {
            changes.name.is_some() && changes.html_content.is_none() && changes.prompt.is_none()
        })
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner), false);

    service(mocks)
        .update_project(UpdateProjectRequest {
            project_id,
            actor: Identity::Curator,
            changes: ProjectChanges {
                name: Some(ProjectName::new("Renamed by the curator").expect("valid name")),
                html_content: Some("<p>sneaky overwrite</p>".to_owned()),
                ..ProjectChanges::default()
            },
        })
        .await
        .expect("curator metadata patch succeeds");
}

#[tokio::test]
async fn curator_content_only_update_is_forbidden() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner, "<p>ball</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.projects.expect_update_fields().times(0);

    let error = service(mocks)
        .update_project(UpdateProjectRequest {
            project_id,
            actor: Identity::Curator,
            changes: ProjectChanges {
                html_content: Some("<p>overwrite</p>".to_owned()),
                ..ProjectChanges::default()
            },
        })
        .await
        .expect_err("curator cannot touch documents");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn unrelated_builder_update_is_forbidden() {
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, UserId::random(), "<p>ball</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));

    let error = service(mocks)
        .update_project(UpdateProjectRequest {
            project_id,
            actor: Identity::Builder(UserId::random()),
            changes: ProjectChanges {
                name: Some(ProjectName::new("Mine now").expect("valid name")),
                ..ProjectChanges::default()
            },
        })
        .await
        .expect_err("strangers cannot patch");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn owners_cannot_set_the_featured_flag() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>ball</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.projects.expect_update_fields().times(0);

    let error = service(mocks)
        .update_project(UpdateProjectRequest {
            project_id,
            actor: Identity::Builder(owner),
            changes: ProjectChanges {
                featured: Some(true),
                ..ProjectChanges::default()
            },
        })
        .await
        .expect_err("featuring is curator-only");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn update_of_a_missing_project_is_not_found() {
    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let error = service(mocks)
        .update_project(UpdateProjectRequest {
            project_id: Uuid::new_v4(),
            actor: Identity::Builder(UserId::random()),
            changes: ProjectChanges {
                name: Some(ProjectName::new("Ghost").expect("valid name")),
                ..ProjectChanges::default()
            },
        })
        .await
        .expect_err("missing project");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn first_generation_writes_a_document_and_derives_a_title() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "");
    let updated = stored_project(project_id, owner.clone(), "<!DOCTYPE html><html></html>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .translator
        .expect_ensure_working_language()
        .times(1)
        .return_once(|text| Ok(passthrough_translation(text)));
    mocks
        .generator
        .expect_complete()
        .times(2)
        .returning(|request| {
            if request.max_tokens == prompts::DOCUMENT_MAX_TOKENS {
                assert_eq!(
                    request.user,
                    "Create this for me: make a bouncing ball game"
                );
                Ok("```html\n<!DOCTYPE html><html></html>\n```".to_owned())
            } else {
                Ok("\"Bouncy Ball Fun\"".to_owned())
            }
        });
    mocks.versions.expect_insert().times(0);
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| {
            changes.name.as_ref().map(AsRef::as_ref) == Some("Bouncy Ball Fun")
                && changes.html_content.as_deref() == Some("<!DOCTYPE html><html></html>")
                && changes.prompt.as_deref() == Some("make a bouncing ball game")
        })
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    let response = service(mocks)
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor: Identity::Builder(owner),
            instruction: "  make a bouncing ball game  ".to_owned(),
        })
        .await
        .expect("generation succeeds");

    assert_eq!(response.detected_language.as_deref(), Some("english"));
    assert!(!response.was_translated);
}

#[tokio::test]
async fn revisions_snapshot_and_keep_the_existing_name() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>old</p>");
    let updated = stored_project(project_id, owner.clone(), "<p>revised</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .translator
        .expect_ensure_working_language()
        .times(1)
        .return_once(|text| Ok(passthrough_translation(text)));
    mocks
        .generator
        .expect_complete()
        .times(1)
        .withf(|request| {
            request
                .system
                .as_deref()
                .is_some_and(|system| system.contains("MODIFYING EXISTING CODE"))
                && request.user.contains("```html\n<p>old</p>\n```")
        })
        .return_once(|_| Ok("<p>revised</p>".to_owned()));
    mocks
        .versions
        .expect_insert()
        .times(1)
        .withf(|snapshot: &Version| {
            snapshot.html_content() == "<p>old</p>" && !snapshot.pre_restore()
        })
        .return_once(|_| Ok(()));
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| {
            changes.name.is_none() && changes.html_content.as_deref() == Some("<p>revised</p>")
        })
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    service(mocks)
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor: Identity::Builder(owner),
            instruction: "add a second ball".to_owned(),
        })
        .await
        .expect("revision succeeds");
}

#[tokio::test]
async fn blank_instructions_are_invalid() {
    let error = service(Mocks::default())
        .generate_document(GenerateDocumentRequest {
            project_id: Uuid::new_v4(),
            actor: Identity::Builder(UserId::random()),
            instruction: "   ".to_owned(),
        })
        .await
        .expect_err("blank instruction rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn generation_by_a_non_owner_is_forbidden() {
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, UserId::random(), "");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));

    let error = service(mocks)
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor: Identity::Curator,
            instruction: "make it mine".to_owned(),
        })
        .await
        .expect_err("only the owner generates");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn translated_instructions_reach_the_generator_in_english() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "");
    let updated = stored_project(project_id, owner.clone(), "<p>gato</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .translator
        .expect_ensure_working_language()
        .times(1)
        .return_once(|_| {
            Ok(TranslationOutcome {
                text: "make a cat game".to_owned(),
                detected_language: "spanish".to_owned(),
                was_translated: true,
            })
        });
    mocks
        .generator
        .expect_complete()
        .times(2)
        .returning(|request| {
            if request.max_tokens == prompts::DOCUMENT_MAX_TOKENS {
                assert!(request.user.starts_with("Create this for me: make a cat game"));
                assert!(
                    request
                        .user
                        .contains("originally wrote their request in spanish")
                );
                Ok("<p>gato</p>".to_owned())
            } else {
                Ok("Cat Game".to_owned())
            }
        });
    mocks.versions.expect_insert().times(0);
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| changes.prompt.as_deref() == Some("haz un juego de gatos"))
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    let response = service(mocks)
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor: Identity::Builder(owner),
            instruction: "haz un juego de gatos".to_owned(),
        })
        .await
        .expect("translated generation succeeds");

    assert_eq!(response.detected_language.as_deref(), Some("spanish"));
    assert!(response.was_translated);
}

#[tokio::test]
async fn a_failing_language_gate_does_not_block_generation() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>old</p>");
    let updated = stored_project(project_id, owner.clone(), "<p>new</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .translator
        .expect_ensure_working_language()
        .times(1)
        .return_once(|_| Err(TranslatorError::transport("connection refused")));
    mocks
        .generator
        .expect_complete()
        .times(1)
        .withf(|request| request.user.contains("add a second ball"))
        .return_once(|_| Ok("<p>new</p>".to_owned()));
    mocks.versions.expect_insert().times(1).return_once(|_| Ok(()));
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    let response = service(mocks)
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor: Identity::Builder(owner),
            instruction: "add a second ball".to_owned(),
        })
        .await
        .expect("generation survives the gate failure");

    assert_eq!(response.detected_language, None);
    assert!(!response.was_translated);
}

#[tokio::test]
async fn generator_failures_surface_as_upstream_errors() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>old</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .translator
        .expect_ensure_working_language()
        .times(1)
        .return_once(|text| Ok(passthrough_translation(text)));
    mocks
        .generator
        .expect_complete()
        .times(1)
        .return_once(|_| Err(CodeGeneratorError::status(429_u16, "rate limited")));
    mocks.versions.expect_insert().times(0);
    mocks.projects.expect_update_fields().times(0);

    let error = service(mocks)
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor: Identity::Builder(owner),
            instruction: "add a second ball".to_owned(),
        })
        .await
        .expect_err("generator failure propagates");

    assert_eq!(error.code(), ErrorCode::Upstream);
}

#[tokio::test]
async fn an_empty_generated_document_is_an_upstream_error() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>old</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .translator
        .expect_ensure_working_language()
        .times(1)
        .return_once(|text| Ok(passthrough_translation(text)));
    mocks
        .generator
        .expect_complete()
        .times(1)
        .return_once(|_| Ok("```html\n```".to_owned()));
    mocks.versions.expect_insert().times(0);
    mocks.projects.expect_update_fields().times(0);

    let error = service(mocks)
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor: Identity::Builder(owner),
            instruction: "add a second ball".to_owned(),
        })
        .await
        .expect_err("empty document rejected");

    assert_eq!(error.code(), ErrorCode::Upstream);
}

#[tokio::test]
async fn a_failed_title_call_keeps_the_default_name() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "");
    let updated = stored_project(project_id, owner.clone(), "<p>first</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .translator
        .expect_ensure_working_language()
        .times(1)
        .return_once(|text| Ok(passthrough_translation(text)));
    mocks
        .generator
        .expect_complete()
        .times(2)
        .returning(|request| {
            if request.max_tokens == prompts::DOCUMENT_MAX_TOKENS {
                Ok("<p>first</p>".to_owned())
            } else {
                Err(CodeGeneratorError::timeout("title took too long"))
            }
        });
    mocks.versions.expect_insert().times(0);
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| changes.name.is_none())
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    service(mocks)
        .generate_document(GenerateDocumentRequest {
            project_id,
            actor: Identity::Builder(owner),
            instruction: "make a bouncing ball game".to_owned(),
        })
        .await
        .expect("creation survives the title failure");
}

#[tokio::test]
async fn restore_snapshots_the_current_document_as_pre_restore() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let version_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>current</p>");
    let updated = stored_project(project_id, owner.clone(), "<p>older</p>");
    let snapshot_source = stored_project(project_id, owner.clone(), "<p>older</p>");
    let version = Version::snapshot_of(&snapshot_source, false, version_id, fixture_timestamp());

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .versions
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(version)));
    mocks
        .versions
        .expect_insert()
        .times(1)
        .withf(|snapshot: &Version| {
            snapshot.html_content() == "<p>current</p>" && snapshot.pre_restore()
        })
        .return_once(|_| Ok(()));
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| {
            changes.html_content.as_deref() == Some("<p>older</p>")
                && changes.prompt.as_deref() == Some("make a bouncing ball game")
                && changes.name.is_none()
                && changes.featured.is_none()
        })
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner.clone()), true);

    service(mocks)
        .restore_version(RestoreVersionRequest {
            project_id,
            version_id,
            actor: Identity::Builder(owner),
        })
        .await
        .expect("restore succeeds");
}

#[tokio::test]
async fn restoring_another_projects_version_is_not_found() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>current</p>");
    let foreign = stored_project(Uuid::new_v4(), owner.clone(), "<p>foreign</p>");
    let version = Version::snapshot_of(&foreign, false, Uuid::new_v4(), fixture_timestamp());

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks
        .versions
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(version)));
    mocks.versions.expect_insert().times(0);

    let error = service(mocks)
        .restore_version(RestoreVersionRequest {
            project_id,
            version_id: Uuid::new_v4(),
            actor: Identity::Builder(owner),
        })
        .await
        .expect_err("foreign version rejected");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn restore_by_a_non_owner_is_forbidden() {
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, UserId::random(), "<p>current</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));

    let error = service(mocks)
        .restore_version(RestoreVersionRequest {
            project_id,
            version_id: Uuid::new_v4(),
            actor: Identity::Curator,
        })
        .await
        .expect_err("only the owner restores");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn the_curator_toggles_the_featured_flag() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>ball</p>");
    let updated = found.clone();

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.versions.expect_insert().times(0);
    mocks
        .projects
        .expect_update_fields()
        .times(1)
        .withf(|_, changes, _| changes.featured == Some(true) && changes.html_content.is_none())
        .return_once(move |_, _, _| Ok(Some(updated)));
    expect_detail_assembly(&mut mocks, stored_user(owner), false);

    service(mocks)
        .toggle_featured(ToggleFeaturedRequest {
            project_id,
            actor: Identity::Curator,
        })
        .await
        .expect("toggle succeeds");
}

#[tokio::test]
async fn builders_cannot_toggle_the_featured_flag() {
    let error = service(Mocks::default())
        .toggle_featured(ToggleFeaturedRequest {
            project_id: Uuid::new_v4(),
            actor: Identity::Builder(UserId::random()),
        })
        .await
        .expect_err("featuring is curator-only");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn the_owner_deletes_their_artifact() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>ball</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.projects.expect_delete().times(1).return_once(|_| Ok(true));

    service(mocks)
        .delete_project(DeleteProjectRequest {
            project_id,
            actor: Identity::Builder(owner),
        })
        .await
        .expect("delete succeeds");
}

#[tokio::test]
async fn the_curator_deletes_any_artifact() {
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, UserId::random(), "<p>ball</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.projects.expect_delete().times(1).return_once(|_| Ok(true));

    service(mocks)
        .delete_project(DeleteProjectRequest {
            project_id,
            actor: Identity::Curator,
        })
        .await
        .expect("curator delete succeeds");
}

#[tokio::test]
async fn strangers_cannot_delete() {
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, UserId::random(), "<p>ball</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.projects.expect_delete().times(0);

    let error = service(mocks)
        .delete_project(DeleteProjectRequest {
            project_id,
            actor: Identity::Builder(UserId::random()),
        })
        .await
        .expect_err("strangers cannot delete");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn deleting_a_vanished_row_is_not_found() {
    let owner = UserId::random();
    let project_id = Uuid::new_v4();
    let found = stored_project(project_id, owner.clone(), "<p>ball</p>");

    let mut mocks = Mocks::default();
    mocks
        .projects
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(found)));
    mocks.projects.expect_delete().times(1).return_once(|_| Ok(false));

    let error = service(mocks)
        .delete_project(DeleteProjectRequest {
            project_id,
            actor: Identity::Builder(owner),
        })
        .await
        .expect_err("row already gone");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
