//! PostgreSQL-backed `EngagementRepository` implementation using Diesel ORM.
//!
//! Owns the like and play tables plus the leaderboard aggregates. Play
//! recording bumps the artifact counter and writes the event row in one
//! transaction so the counter never drifts from the event log. Leaderboard
//! reads run their SELECTs in one transaction so all aggregates observe a
//! consistent MVCC snapshot.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::{count_star, exists, max, sum};
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::engagement::{BuilderRanking, CreatorSummary, ProjectRanking};
use crate::domain::ports::{EngagementRepository, EngagementRepositoryError, LikeInsert};

use super::diesel_error_mapping::{is_unique_violation, map_checkout_error, map_statement_error};
use super::models::{NewLikeRow, NewPlayRow, RankedProjectRow};
use super::pool::{DbPool, PoolError};
use super::schema::{likes, plays, projects, users};

/// Diesel-backed implementation of the engagement port.
#[derive(Clone)]
pub struct DieselEngagementRepository {
    pool: DbPool,
}

impl DieselEngagementRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain engagement repository errors.
fn map_pool_error(error: PoolError) -> EngagementRepositoryError {
    map_checkout_error(error, EngagementRepositoryError::connection)
}

/// Map Diesel errors to domain engagement repository errors.
fn map_diesel_error(error: diesel::result::Error) -> EngagementRepositoryError {
    map_statement_error(
        error,
        EngagementRepositoryError::query,
        EngagementRepositoryError::connection,
    )
}

/// Interpret a like insert, folding the composite-key race into the
/// idempotent outcome.
fn like_insert_outcome(
    result: Result<usize, diesel::result::Error>,
) -> Result<LikeInsert, EngagementRepositoryError> {
    match result {
        Ok(_) => Ok(LikeInsert::Created),
        Err(error) if is_unique_violation(&error) => Ok(LikeInsert::AlreadyLiked),
        Err(error) => Err(map_diesel_error(error)),
    }
}

#[async_trait]
impl EngagementRepository for DieselEngagementRepository {
    async fn insert_like(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
        created_at: DateTime<Utc>,
    ) -> Result<LikeInsert, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewLikeRow {
            user_id: *user_id.as_uuid(),
            project_id: *project_id,
            created_at,
        };

        let result = diesel::insert_into(likes::table)
            .values(&new_row)
            .execute(&mut conn)
            .await;

        like_insert_outcome(result)
    }

    async fn delete_like(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
    ) -> Result<bool, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            likes::table.filter(
                likes::project_id
                    .eq(project_id)
                    .and(likes::user_id.eq(user_id.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn like_count(&self, project_id: &Uuid) -> Result<i64, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        likes::table
            .filter(likes::project_id.eq(project_id))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn like_counts(
        &self,
        project_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, i64>, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(Uuid, i64)> = likes::table
            .filter(likes::project_id.eq_any(project_ids))
            .group_by(likes::project_id)
            .select((likes::project_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().collect())
    }

    async fn liked_project_ids(
        &self,
        viewer_id: &UserId,
        project_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<Uuid> = likes::table
            .filter(
                likes::user_id
                    .eq(viewer_id.as_uuid())
                    .and(likes::project_id.eq_any(project_ids)),
            )
            .select(likes::project_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().collect())
    }

    async fn is_liked_by(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
    ) -> Result<bool, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            likes::table.filter(
                likes::project_id
                    .eq(project_id)
                    .and(likes::user_id.eq(user_id.as_uuid())),
            ),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn last_play(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<DateTime<Utc>>, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        plays::table
            .filter(
                plays::project_id
                    .eq(project_id)
                    .and(plays::user_id.eq(user_id.as_uuid())),
            )
            .select(max(plays::played_at))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn record_play(
        &self,
        project_id: &Uuid,
        user_id: &UserId,
        played_at: DateTime<Utc>,
    ) -> Result<Option<i32>, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewPlayRow {
            id: Uuid::new_v4(),
            user_id: *user_id.as_uuid(),
            project_id: *project_id,
            played_at,
        };

        conn.transaction(|conn| {
            async move {
                let play_count: Option<i32> =
                    diesel::update(projects::table.filter(projects::id.eq(new_row.project_id)))
                        .set(projects::play_count.eq(projects::play_count + 1))
                        .returning(projects::play_count)
                        .get_result(conn)
                        .await
                        .optional()?;

                let Some(play_count) = play_count else {
                    return Ok(None);
                };

                diesel::insert_into(plays::table)
                    .values(&new_row)
                    .execute(conn)
                    .await?;

                Ok(Some(play_count))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn project_rankings(&self) -> Result<Vec<ProjectRanking>, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (project_rows, like_rows, game_rows) = conn
            .transaction(|conn| {
                async move {
                    let project_rows: Vec<RankedProjectRow> = projects::table
                        .inner_join(users::table)
                        .select((
                            projects::id,
                            projects::name,
                            projects::emoji,
                            projects::play_count,
                            projects::created_at,
                            users::id,
                            users::username,
                            users::created_at,
                        ))
                        .load(conn)
                        .await?;
                    let like_rows: Vec<(Uuid, i64)> = likes::table
                        .group_by(likes::project_id)
                        .select((likes::project_id, count_star()))
                        .load(conn)
                        .await?;
                    let game_rows: Vec<(Uuid, i64)> = projects::table
                        .group_by(projects::creator_id)
                        .select((projects::creator_id, count_star()))
                        .load(conn)
                        .await?;
                    Ok((project_rows, like_rows, game_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let like_counts: HashMap<Uuid, i64> = like_rows.into_iter().collect();
        let games_per_creator: HashMap<Uuid, i64> = game_rows.into_iter().collect();

        Ok(project_rows
            .into_iter()
            .map(|row| ProjectRanking {
                id: row.id,
                name: row.name,
                emoji: row.emoji,
                like_count: like_counts.get(&row.id).copied().unwrap_or(0),
                play_count: i64::from(row.play_count),
                created_at: row.created_at,
                creator: CreatorSummary {
                    id: UserId::from_uuid(row.creator_id),
                    username: row.creator_username,
                    created_at: row.creator_since,
                    game_count: games_per_creator.get(&row.creator_id).copied().unwrap_or(0),
                },
            })
            .collect())
    }

    async fn builder_rankings(&self) -> Result<Vec<BuilderRanking>, EngagementRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (user_rows, game_rows, like_rows, play_rows) = conn
            .transaction(|conn| {
                async move {
                    let user_rows: Vec<(Uuid, String)> = users::table
                        .select((users::id, users::username))
                        .load(conn)
                        .await?;
                    let game_rows: Vec<(Uuid, i64)> = projects::table
                        .group_by(projects::creator_id)
                        .select((projects::creator_id, count_star()))
                        .load(conn)
                        .await?;
                    let like_rows: Vec<(Uuid, i64)> = likes::table
                        .inner_join(projects::table)
                        .group_by(projects::creator_id)
                        .select((projects::creator_id, count_star()))
                        .load(conn)
                        .await?;
                    let play_rows: Vec<(Uuid, Option<i64>)> = projects::table
                        .group_by(projects::creator_id)
                        .select((projects::creator_id, sum(projects::play_count)))
                        .load(conn)
                        .await?;
                    Ok((user_rows, game_rows, like_rows, play_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let games_per_creator: HashMap<Uuid, i64> = game_rows.into_iter().collect();
        let likes_per_creator: HashMap<Uuid, i64> = like_rows.into_iter().collect();
        let plays_per_creator: HashMap<Uuid, i64> = play_rows
            .into_iter()
            .map(|(creator_id, total)| (creator_id, total.unwrap_or(0)))
            .collect();

        Ok(user_rows
            .into_iter()
            .map(|(id, username)| BuilderRanking {
                id: UserId::from_uuid(id),
                username,
                game_count: games_per_creator.get(&id).copied().unwrap_or(0),
                total_likes: likes_per_creator.get(&id).copied().unwrap_or(0),
                total_plays: plays_per_creator.get(&id).copied().unwrap_or(0),
            })
            .collect())
    }
}
