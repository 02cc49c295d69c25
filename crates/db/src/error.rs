//! Classification of database errors into retryable and fatal failures.

use explora_core::store::StoreError;

/// SQLSTATE codes that signal a retryable condition: statement timeout,
/// serialization failure, deadlock, lock not available.
const TRANSIENT_SQLSTATES: [&str; 4] = ["57014", "40001", "40P01", "55P03"];

/// Whether `err` is a timeout, dropped connection, or lost concurrency race
/// that a client may retry.
pub fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => true,
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| TRANSIENT_SQLSTATES.contains(&&*code)),
        _ => false,
    }
}

/// Map a sqlx error onto the engine's store error.
pub fn store_error(err: sqlx::Error) -> StoreError {
    if is_transient(&err) {
        tracing::warn!(error = %err, "Transient database error");
        StoreError::Transient(err.to_string())
    } else {
        tracing::error!(error = %err, "Database error");
        StoreError::Failure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn pool_timeout_is_transient() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert_matches!(
            store_error(sqlx::Error::PoolTimedOut),
            StoreError::Transient(_)
        );
    }

    #[test]
    fn missing_row_is_not_transient() {
        assert!(!is_transient(&sqlx::Error::RowNotFound));
        assert_matches!(store_error(sqlx::Error::RowNotFound), StoreError::Failure(_));
    }
}
