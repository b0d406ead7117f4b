//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BuilderQuery, EngagementCommand, FixtureBuilderQuery, FixtureEngagementCommand,
    FixtureGalleryQuery, FixtureIdentityCommand, FixtureLeaderboardQuery, FixtureStudioCommand,
    FixtureTranscriber, GalleryQuery, IdentityCommand, LeaderboardQuery, StudioCommand,
    Transcriber,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use playforge_backend::inbound::http::state::HttpState;
///
/// let state = HttpState::fixtures();
/// let _identity = state.identity.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub identity: Arc<dyn IdentityCommand>,
    pub builders: Arc<dyn BuilderQuery>,
    pub studio: Arc<dyn StudioCommand>,
    pub gallery: Arc<dyn GalleryQuery>,
    pub engagement: Arc<dyn EngagementCommand>,
    pub leaderboard: Arc<dyn LeaderboardQuery>,
    pub transcriber: Arc<dyn Transcriber>,
}

impl HttpState {
    /// State backed entirely by fixture ports.
    ///
    /// Used for credential-free boots and as a base for handler tests,
    /// which override individual ports with mocks.
    pub fn fixtures() -> Self {
        Self {
            identity: Arc::new(FixtureIdentityCommand),
            builders: Arc::new(FixtureBuilderQuery),
            studio: Arc::new(FixtureStudioCommand),
            gallery: Arc::new(FixtureGalleryQuery),
            engagement: Arc::new(FixtureEngagementCommand),
            leaderboard: Arc::new(FixtureLeaderboardQuery),
            transcriber: Arc::new(FixtureTranscriber),
        }
    }
}
