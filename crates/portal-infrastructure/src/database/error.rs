//! sqlx error translation

use portal_core::error::DomainError;
use tracing::error;

/// Connection-level failures become `Unavailable` so callers can degrade.
pub(crate) fn map_sqlx_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    match &e {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => DomainError::Unavailable(e.to_string()),
        sqlx::Error::Database(db) if db.code().is_some_and(|c| is_connection_state(&c)) => {
            DomainError::Unavailable(e.to_string())
        }
        _ => DomainError::DatabaseError(e.to_string()),
    }
}

/// Connection exceptions (class 08) and server shutdown or startup (57P01..57P03).
fn is_connection_state(sqlstate: &str) -> bool {
    sqlstate.starts_with("08") || matches!(sqlstate, "57P01" | "57P02" | "57P03")
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_unavailable() {
        assert!(matches!(
            map_sqlx_error("finding role", sqlx::Error::PoolTimedOut),
            DomainError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error("finding role", sqlx::Error::PoolClosed),
            DomainError::Unavailable(_)
        ));
    }

    #[test]
    fn test_server_shutdown_states_are_unavailable() {
        for code in ["08000", "08006", "08P01", "57P01", "57P02", "57P03"] {
            assert!(is_connection_state(code), "{} should be unavailable", code);
        }
    }

    #[test]
    fn test_statement_errors_are_not_unavailable() {
        // unique violation, undefined table, query canceled
        for code in ["23505", "42P01", "57014"] {
            assert!(!is_connection_state(code), "{} should not be unavailable", code);
        }
    }

    #[test]
    fn test_row_errors_are_database_errors() {
        assert!(matches!(
            map_sqlx_error("finding role", sqlx::Error::RowNotFound),
            DomainError::DatabaseError(_)
        ));
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
    }
}
