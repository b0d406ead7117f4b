//! Social engagement facts: likes, plays, and ranking rows.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::identity::UserId;

/// Seconds a builder must wait between counted plays of one artifact.
pub const PLAY_COOLDOWN_SECONDS: i64 = 5 * 60;

/// Cooldown window between counted plays of one artifact by one builder.
pub fn play_cooldown() -> Duration {
    Duration::seconds(PLAY_COOLDOWN_SECONDS)
}

/// Result of attempting to record a play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Whether this play incremented the counter.
    pub counted: bool,
    /// The artifact's play count after the attempt.
    pub play_count: i32,
}

/// Result of a like toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeOutcome {
    /// The builder's like state after the toggle.
    pub liked: bool,
    /// The artifact's like count after the toggle.
    pub like_count: i64,
}

/// Creator summary embedded in ranking rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatorSummary {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub game_count: i64,
}

/// One artifact's aggregated engagement, ready for ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRanking {
    pub id: Uuid,
    pub name: String,
    pub emoji: String,
    pub like_count: i64,
    pub play_count: i64,
    pub created_at: DateTime<Utc>,
    pub creator: CreatorSummary,
}

/// One builder's aggregated engagement, ready for ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderRanking {
    pub id: UserId,
    pub username: String,
    pub game_count: i64,
    pub total_likes: i64,
    pub total_plays: i64,
}

/// Whether a play attempted at `now` falls inside the cooldown window
/// opened by `last_play`.
pub fn within_cooldown(last_play: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_play.is_some_and(|at| now.signed_duration_since(at) < play_cooldown())
}
