use tracing::debug;

use crate::application::ports::RepositoryError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub(crate) const DUPLICATE_VALUE: &str = "A record with this value already exists";
pub(crate) const MISSING_REFERENCE: &str = "A referenced record does not exist";

/// Classify a driver error for a write statement.
///
/// Constraint violations surface as `Conflict`; everything else stays a
/// `Database` error.
pub(crate) fn classify(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(code) = db_err.code() {
            if let Some(conflict) = constraint_conflict(&code, db_err.constraint()) {
                return conflict;
            }
        }
    }

    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound("row".to_string()),
        other => RepositoryError::Database(other),
    }
}

/// Map a constraint violation to a client-safe conflict.
///
/// The constraint name is logged, never returned.
fn constraint_conflict(code: &str, constraint: Option<&str>) -> Option<RepositoryError> {
    let message = match code {
        UNIQUE_VIOLATION => DUPLICATE_VALUE,
        FOREIGN_KEY_VIOLATION => MISSING_REFERENCE,
        _ => return None,
    };
    debug!(sqlstate = code, constraint = ?constraint, "constraint violation");
    Some(RepositoryError::Conflict(message.to_string()))
}
