//! PostgreSQL-backed `VersionRepository` implementation using Diesel ORM.
//!
//! Snapshots are written once and never updated; the caller awaits the
//! insert before overwriting the document it protects, so commit order is
//! the write order.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{VersionRepository, VersionRepositoryError};
use crate::domain::version::{Version, VersionRecord, VersionSummary};

use super::diesel_error_mapping::{map_checkout_error, map_statement_error};
use super::models::{NewVersionRow, VersionRow, VersionSummaryRow};
use super::pool::{DbPool, PoolError};
use super::schema::versions;

/// Diesel-backed implementation of the version history port.
#[derive(Clone)]
pub struct DieselVersionRepository {
    pool: DbPool,
}

impl DieselVersionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain version repository errors.
fn map_pool_error(error: PoolError) -> VersionRepositoryError {
    map_checkout_error(error, VersionRepositoryError::connection)
}

/// Map Diesel errors to domain version repository errors.
fn map_diesel_error(error: diesel::result::Error) -> VersionRepositoryError {
    map_statement_error(
        error,
        VersionRepositoryError::query,
        VersionRepositoryError::connection,
    )
}

fn row_to_version(row: VersionRow) -> Version {
    Version::from_record(VersionRecord {
        id: row.id,
        project_id: row.project_id,
        html_content: row.html_content,
        prompt: row.prompt,
        pre_restore: row.pre_restore,
        created_at: row.created_at,
    })
}

fn row_to_summary(row: VersionSummaryRow) -> VersionSummary {
    VersionSummary {
        id: row.id,
        prompt: row.prompt,
        pre_restore: row.pre_restore,
        created_at: row.created_at,
    }
}

#[async_trait]
impl VersionRepository for DieselVersionRepository {
    async fn insert(&self, version: &Version) -> Result<(), VersionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewVersionRow {
            id: *version.id(),
            project_id: *version.project_id(),
            html_content: version.html_content(),
            prompt: version.prompt(),
            pre_restore: version.pre_restore(),
            created_at: version.created_at(),
        };

        diesel::insert_into(versions::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_summaries_for_project(
        &self,
        project_id: &Uuid,
    ) -> Result<Vec<VersionSummary>, VersionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VersionSummaryRow> = versions::table
            .filter(versions::project_id.eq(project_id))
            .order((versions::created_at.desc(), versions::id.desc()))
            .select(VersionSummaryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_summary).collect())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Version>, VersionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = versions::table
            .filter(versions::id.eq(id))
            .select(VersionRow::as_select())
            .first::<VersionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_version))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::build("bad database url"));

        assert!(matches!(
            repo_err,
            VersionRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("bad database url"));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);

        assert!(matches!(repo_err, VersionRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rows_convert_without_touching_the_prompt() {
        let row = VersionRow {
            id: Uuid::new_v4(),
            project_id: Uuid::new_v4(),
            html_content: "<p>older</p>".to_owned(),
            prompt: "make it blue".to_owned(),
            pre_restore: true,
            created_at: Utc::now(),
        };

        let version = row_to_version(row);

        assert_eq!(version.prompt(), "make it blue");
        assert!(version.pre_restore());
        assert_eq!(version.displayed_prompt(), "make it blue (before restore)");
    }
}
