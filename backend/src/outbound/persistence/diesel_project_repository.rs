//! PostgreSQL-backed `ProjectRepository` implementation using Diesel ORM.
//!
//! Loads artifacts through validated domain constructors and applies
//! partial updates through a skip-`None` changeset. Updates return the
//! fresh row via `RETURNING` so callers never read a stale document.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{
    ProjectCard, ProjectRepository, ProjectRepositoryError, ProjectSummary,
};
use crate::domain::project::{Emoji, Project, ProjectChanges, ProjectName, ProjectRecord};

use super::diesel_error_mapping::{map_checkout_error, map_statement_error};
use super::models::{
    NewProjectRow, ProjectCardRow, ProjectChangesRow, ProjectRow, ProjectSummaryRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::projects;

/// Diesel-backed implementation of the artifact persistence port.
#[derive(Clone)]
pub struct DieselProjectRepository {
    pool: DbPool,
}

impl DieselProjectRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain project repository errors.
fn map_pool_error(error: PoolError) -> ProjectRepositoryError {
    map_checkout_error(error, ProjectRepositoryError::connection)
}

/// Map Diesel errors to domain project repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ProjectRepositoryError {
    map_statement_error(
        error,
        ProjectRepositoryError::query,
        ProjectRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain artifact.
fn row_to_project(row: ProjectRow) -> Result<Project, ProjectRepositoryError> {
    let name =
        ProjectName::new(row.name).map_err(|err| ProjectRepositoryError::query(err.to_string()))?;
    let emoji =
        Emoji::new(row.emoji).map_err(|err| ProjectRepositoryError::query(err.to_string()))?;

    Ok(Project::from_record(ProjectRecord {
        id: row.id,
        name,
        emoji,
        html_content: row.html_content,
        prompt: row.prompt,
        play_count: row.play_count,
        featured: row.featured,
        creator_id: UserId::from_uuid(row.creator_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn row_to_summary(row: ProjectSummaryRow) -> ProjectSummary {
    ProjectSummary {
        id: row.id,
        name: row.name,
        emoji: row.emoji,
        prompt: row.prompt,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn row_to_card(row: ProjectCardRow) -> ProjectCard {
    ProjectCard {
        id: row.id,
        name: row.name,
        emoji: row.emoji,
        prompt: row.prompt,
        play_count: row.play_count,
        creator_id: UserId::from_uuid(row.creator_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

#[async_trait]
impl ProjectRepository for DieselProjectRepository {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewProjectRow {
            id: *project.id(),
            name: project.name().as_ref(),
            emoji: project.emoji().as_ref(),
            html_content: project.html_content(),
            prompt: project.prompt(),
            play_count: project.play_count(),
            featured: project.featured(),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
            creator_id: *project.creator_id().as_uuid(),
        };

        diesel::insert_into(projects::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = projects::table
            .filter(projects::id.eq(id))
            .select(ProjectRow::as_select())
            .first::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_project).transpose()
    }

    async fn list_summaries_for_creator(
        &self,
        creator_id: &UserId,
    ) -> Result<Vec<ProjectSummary>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProjectSummaryRow> = projects::table
            .filter(projects::creator_id.eq(creator_id.as_uuid()))
            .order((projects::updated_at.desc(), projects::id.desc()))
            .select(ProjectSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_summary).collect())
    }

    async fn list_cards_for_creator(
        &self,
        creator_id: &UserId,
    ) -> Result<Vec<ProjectCard>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProjectCardRow> = projects::table
            .filter(projects::creator_id.eq(creator_id.as_uuid()))
            .order((projects::updated_at.desc(), projects::id.desc()))
            .select(ProjectCardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_card).collect())
    }

    async fn update_fields(
        &self,
        id: &Uuid,
        changes: ProjectChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Project>, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes_row = ProjectChangesRow {
            name: changes.name.as_ref().map(AsRef::as_ref),
            emoji: changes.emoji.as_ref().map(AsRef::as_ref),
            html_content: changes.html_content.as_deref(),
            prompt: changes.prompt.as_deref(),
            featured: changes.featured,
            updated_at,
        };

        let row = diesel::update(projects::table.filter(projects::id.eq(id)))
            .set(&changes_row)
            .returning(ProjectRow::as_returning())
            .get_result::<ProjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_project).transpose()
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, ProjectRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(projects::table.filter(projects::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> ProjectRow {
        let created_at = Utc::now();
        ProjectRow {
            id: Uuid::new_v4(),
            name: "Bouncy Ball Fun".to_owned(),
            emoji: "🎮".to_owned(),
            html_content: "<p>hello</p>".to_owned(),
            prompt: "make a bouncing ball game".to_owned(),
            play_count: 3,
            featured: false,
            created_at,
            updated_at: created_at,
            creator_id: Uuid::new_v4(),
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));

        assert!(matches!(
            repo_err,
            ProjectRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, ProjectRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_produces_the_domain_artifact(valid_row: ProjectRow) {
        let id = valid_row.id;

        let project = row_to_project(valid_row).expect("valid row converts");

        assert_eq!(project.id(), &id);
        assert_eq!(project.name().as_ref(), "Bouncy Ball Fun");
        assert_eq!(project.play_count(), 3);
    }

    #[rstest]
    fn row_conversion_rejects_blank_names(mut valid_row: ProjectRow) {
        valid_row.name = "   ".to_owned();

        let error = row_to_project(valid_row).expect_err("blank name should fail");
        assert!(matches!(error, ProjectRepositoryError::Query { .. }));
    }

    #[rstest]
    fn row_conversion_rejects_blank_emoji(mut valid_row: ProjectRow) {
        valid_row.emoji = String::new();

        let error = row_to_project(valid_row).expect_err("blank emoji should fail");
        assert!(matches!(error, ProjectRepositoryError::Query { .. }));
    }
}
