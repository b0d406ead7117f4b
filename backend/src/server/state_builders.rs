//! Builders for HTTP state ports backed by the database and hosted
//! collaborators, with fixture fallbacks for credential-free boots.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use playforge_backend::domain::ports::{
    CodeGenerator, FixtureCodeGenerator, FixtureTranscriber, FixtureTranslator, StudioCommand,
    Transcriber, Translator,
};
use playforge_backend::domain::{
    BuilderQueryService, EngagementCommandService, GalleryQueryService, IdentityCommandService,
    LeaderboardQueryService, StudioCommandService,
};
use playforge_backend::inbound::http::state::HttpState;
use playforge_backend::outbound::anthropic::AnthropicHttpGenerator;
use playforge_backend::outbound::openai::{OpenAiHttpTranscriber, OpenAiHttpTranslator};
use playforge_backend::outbound::persistence::{
    DbPool, DieselEngagementRepository, DieselProjectRepository, DieselUserRepository,
    DieselVersionRepository,
};

use super::ServerConfig;

/// SQL-backed repositories shared by the domain services.
struct Repositories {
    users: Arc<DieselUserRepository>,
    projects: Arc<DieselProjectRepository>,
    versions: Arc<DieselVersionRepository>,
    engagement: Arc<DieselEngagementRepository>,
}

impl Repositories {
    fn new(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            projects: Arc::new(DieselProjectRepository::new(pool.clone())),
            versions: Arc::new(DieselVersionRepository::new(pool.clone())),
            engagement: Arc::new(DieselEngagementRepository::new(pool.clone())),
        }
    }
}

/// Assemble the studio service over the given generator and translator.
fn build_studio_service<G, T>(
    repos: &Repositories,
    generator: Arc<G>,
    translator: Arc<T>,
    clock: Arc<dyn Clock>,
) -> Arc<dyn StudioCommand>
where
    G: CodeGenerator + 'static,
    T: Translator + 'static,
{
    Arc::new(StudioCommandService::new(
        repos.projects.clone(),
        repos.versions.clone(),
        repos.users.clone(),
        repos.engagement.clone(),
        generator,
        translator,
        clock,
    ))
}

/// Select the studio collaborators from configured credentials.
///
/// Generation and translation degrade independently: either can run against
/// the hosted API while the other serves fixture output.
fn build_studio(
    config: &ServerConfig,
    repos: &Repositories,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Arc<dyn StudioCommand>> {
    let generator = config
        .generator
        .clone()
        .map(AnthropicHttpGenerator::new)
        .transpose()
        .map_err(|err| {
            std::io::Error::other(format!("generator client construction failed: {err}"))
        })?;
    let translator = config
        .speech
        .clone()
        .map(OpenAiHttpTranslator::new)
        .transpose()
        .map_err(|err| {
            std::io::Error::other(format!("translator client construction failed: {err}"))
        })?;

    Ok(match (generator, translator) {
        (Some(generator), Some(translator)) => {
            build_studio_service(repos, Arc::new(generator), Arc::new(translator), clock)
        }
        (Some(generator), None) => {
            build_studio_service(repos, Arc::new(generator), Arc::new(FixtureTranslator), clock)
        }
        (None, Some(translator)) => build_studio_service(
            repos,
            Arc::new(FixtureCodeGenerator),
            Arc::new(translator),
            clock,
        ),
        (None, None) => build_studio_service(
            repos,
            Arc::new(FixtureCodeGenerator),
            Arc::new(FixtureTranslator),
            clock,
        ),
    })
}

fn build_transcriber(config: &ServerConfig) -> std::io::Result<Arc<dyn Transcriber>> {
    match &config.speech {
        Some(settings) => {
            let transcriber = OpenAiHttpTranscriber::new(settings.clone()).map_err(|err| {
                std::io::Error::other(format!("transcription client construction failed: {err}"))
            })?;
            Ok(Arc::new(transcriber))
        }
        None => Ok(Arc::new(FixtureTranscriber)),
    }
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
///
/// Transcription only needs credentials, so it can go live without a
/// database; every other port needs the store behind it.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let transcriber = build_transcriber(config)?;
    let state = match &config.db_pool {
        Some(pool) => {
            let repos = Repositories::new(pool);
            let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
            let studio = build_studio(config, &repos, clock.clone())?;
            HttpState {
                identity: Arc::new(IdentityCommandService::new(
                    repos.users.clone(),
                    clock.clone(),
                )),
                builders: Arc::new(BuilderQueryService::new(
                    repos.users.clone(),
                    repos.projects.clone(),
                    repos.engagement.clone(),
                )),
                studio,
                gallery: Arc::new(GalleryQueryService::new(
                    repos.projects.clone(),
                    repos.versions.clone(),
                    repos.users.clone(),
                    repos.engagement.clone(),
                )),
                engagement: Arc::new(EngagementCommandService::new(
                    repos.projects.clone(),
                    repos.engagement.clone(),
                    clock,
                )),
                leaderboard: Arc::new(LeaderboardQueryService::new(repos.engagement.clone())),
                transcriber,
            }
        }
        None => HttpState {
            transcriber,
            ..HttpState::fixtures()
        },
    };
    Ok(web::Data::new(state))
}
