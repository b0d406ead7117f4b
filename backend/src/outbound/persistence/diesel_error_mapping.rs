//! Shared Diesel error mapping for the repository adapters.
//!
//! Each repository exposes its own error enum through its port; the mapping
//! from pool and Diesel failures into those enums is the same everywhere, so
//! it lives here behind constructor parameters.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_checkout_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Build { message } | PoolError::Checkout { message } => message,
    };
    connection(message)
}

/// Map common Diesel failures into query/connection constructors.
///
/// Unique violations are deliberately not special-cased here; adapters that
/// give them meaning (duplicate usernames, repeated likes) match them before
/// falling back to this mapping.
pub(super) fn map_statement_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Whether the error is a unique constraint violation.
pub(super) fn is_unique_violation(error: &diesel::result::Error) -> bool {
    matches!(
        error,
        diesel::result::Error::DatabaseError(diesel::result::DatabaseErrorKind::UniqueViolation, _)
    )
}

#[cfg(test)]
mod tests {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    fn query(message: &'static str) -> Mapped {
        Mapped::Query(message.to_owned())
    }

    fn connection(message: &'static str) -> Mapped {
        Mapped::Connection(message.to_owned())
    }

    #[rstest]
    #[case::build(PoolError::build("no route to host"))]
    #[case::checkout(PoolError::checkout("no route to host"))]
    fn pool_failures_become_connection_errors(#[case] error: PoolError) {
        let mapped = map_checkout_error(error, Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("no route to host".to_owned()));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let mapped = map_statement_error(DieselError::NotFound, query, connection);
        assert_eq!(mapped, Mapped::Query("record not found".to_owned()));
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("closed".to_string()),
        );
        let mapped = map_statement_error(error, query, connection);
        assert_eq!(
            mapped,
            Mapped::Connection("database connection error".to_owned())
        );
    }

    #[rstest]
    fn unique_violations_are_recognised() {
        let unique = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        );
        assert!(is_unique_violation(&unique));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }
}
