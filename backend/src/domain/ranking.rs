//! Leaderboard ordering rules.
//!
//! Ranking happens over fully aggregated rows: filter out entries with no
//! engagement, apply the tie-break chain, then truncate to the requested
//! size. Truncating before aggregation would let inactive rows crowd out
//! active ones.

use std::cmp::Ordering;

use crate::domain::engagement::{BuilderRanking, ProjectRanking};

fn compare_projects(a: &ProjectRanking, b: &ProjectRanking) -> Ordering {
    b.like_count
        .cmp(&a.like_count)
        .then_with(|| b.play_count.cmp(&a.play_count))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

fn compare_builders(a: &BuilderRanking, b: &BuilderRanking) -> Ordering {
    b.total_likes
        .cmp(&a.total_likes)
        .then_with(|| b.game_count.cmp(&a.game_count))
        .then_with(|| b.total_plays.cmp(&a.total_plays))
}

/// Rank artifacts by likes, then plays, then recency.
///
/// Artifacts with zero likes and zero plays are omitted entirely.
pub fn rank_projects(mut rows: Vec<ProjectRanking>, limit: usize) -> Vec<ProjectRanking> {
    rows.retain(|row| row.like_count > 0 || row.play_count > 0);
    rows.sort_by(compare_projects);
    rows.truncate(limit);
    rows
}

/// Rank builders by total likes, then artifact count, then total plays.
///
/// Builders with no artifacts, likes, or plays are omitted entirely.
pub fn rank_builders(mut rows: Vec<BuilderRanking>, limit: usize) -> Vec<BuilderRanking> {
    rows.retain(|row| row.game_count > 0 || row.total_likes > 0 || row.total_plays > 0);
    rows.sort_by(compare_builders);
    rows.truncate(limit);
    rows
}
