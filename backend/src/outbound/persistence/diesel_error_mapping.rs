//! Shared Diesel error mapping for the repository adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Which port error a Diesel failure should become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// The connection is gone; callers see a connection error.
    Connection(&'static str),
    /// A unique index rejected the write.
    UniqueViolation,
    /// Anything else; callers see a query error.
    Query(&'static str),
}

/// Classify a Diesel error, logging driver details at debug level.
pub(crate) fn classify_diesel_error(error: &DieselError) -> DieselFailure {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        _ => DieselFailure::Query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new("driver message".to_string()))
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::UniqueViolation), DieselFailure::UniqueViolation)]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection),
        DieselFailure::Connection("database connection error")
    )]
    #[case(
        database_error(DatabaseErrorKind::ForeignKeyViolation),
        DieselFailure::Query("database error")
    )]
    #[case(DieselError::NotFound, DieselFailure::Query("record not found"))]
    fn classifies_diesel_errors(#[case] error: DieselError, #[case] expected: DieselFailure) {
        assert_eq!(classify_diesel_error(&error), expected);
    }
}
