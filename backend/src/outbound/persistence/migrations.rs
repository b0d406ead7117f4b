//! Boot-time schema migration runner.
//!
//! Migrations are compiled into the binary from `backend/migrations/` and
//! applied over a blocking connection before the async pool starts serving.
//! `diesel-async` connections cannot drive the migration harness, so the
//! run happens on the blocking thread pool.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations bundled at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be established.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },

    /// A migration failed to apply.
    #[error("failed to run pending migrations: {message}")]
    Execution { message: String },
}

impl MigrationError {
    fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }
}

/// Apply pending migrations against the given database.
///
/// # Errors
///
/// Returns [`MigrationError::Connection`] when the database is unreachable
/// and [`MigrationError::Execution`] when a migration fails or the blocking
/// task is cancelled.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();

    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|err| MigrationError::connection(err.to_string()))?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::execution(err.to_string()))?;

        if !applied.is_empty() {
            info!(count = applied.len(), "applied pending database migrations");
        }
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::execution(err.to_string()))?
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn errors_carry_their_message() {
        assert!(
            MigrationError::connection("no route to host")
                .to_string()
                .contains("no route to host")
        );
        assert!(
            MigrationError::execution("relation already exists")
                .to_string()
                .contains("relation already exists")
        );
    }
}
