//! SQLite error classification.
//!
//! Raw `DbErr` text never reaches API callers. Each failure is reduced to a
//! [`DbErrorKind`] plus a message naming the operation, and unique
//! violations keep the offending `table.column` when SQLite reports it.

use sea_orm::DbErr;

const UNIQUE_FAILED: &str = "unique constraint failed:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    NotFound,
    UniqueViolation,
    /// `SQLITE_BUSY` / locked database; retrying may succeed
    Busy,
    /// Pool or connection failure
    Unavailable,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbFailure {
    pub kind: DbErrorKind,
    pub message: String,
    /// `table.column` of a unique violation
    pub column: Option<String>,
}

/// Classify `err`, raised while performing `operation`.
pub fn classify(operation: &str, err: &DbErr) -> DbFailure {
    let text = err.to_string();
    let lower = text.to_lowercase();

    let (kind, column) = match err {
        DbErr::RecordNotFound(_) => (DbErrorKind::NotFound, None),
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => (DbErrorKind::Unavailable, None),
        _ if lower.contains(UNIQUE_FAILED) => (DbErrorKind::UniqueViolation, unique_column(&text)),
        _ if lower.contains("database is locked") || lower.contains("database is busy") => {
            (DbErrorKind::Busy, None)
        }
        _ => (DbErrorKind::Other, None),
    };

    let message = match kind {
        DbErrorKind::NotFound => format!("{}: record not found", operation),
        DbErrorKind::UniqueViolation => format!("{}: duplicate value", operation),
        DbErrorKind::Busy => format!("{}: database busy", operation),
        DbErrorKind::Unavailable => format!("{}: database unavailable", operation),
        DbErrorKind::Other => format!("{}: database error - {}", operation, text),
    };

    DbFailure {
        kind,
        message,
        column,
    }
}

/// `"UNIQUE constraint failed: users.username"` -> `users.username`
fn unique_column(text: &str) -> Option<String> {
    let start = text.to_lowercase().find(UNIQUE_FAILED)? + UNIQUE_FAILED.len();
    text.get(start..)?
        .split(|c: char| c == ',' || c.is_whitespace())
        .find(|part| !part.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    fn exec_err(message: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(message.to_string()))
    }

    #[test]
    fn test_unique_violation_keeps_column() {
        let err = exec_err("error returned from database: UNIQUE constraint failed: farmer_profiles.uuid");
        let failure = classify("insert farmer_profiles", &err);

        assert_eq!(failure.kind, DbErrorKind::UniqueViolation);
        assert_eq!(failure.column.as_deref(), Some("farmer_profiles.uuid"));
        assert_eq!(failure.message, "insert farmer_profiles: duplicate value");
    }

    #[test]
    fn test_locked_database_is_busy() {
        let failure = classify("commit import", &exec_err("database is locked"));
        assert_eq!(failure.kind, DbErrorKind::Busy);
    }

    #[test]
    fn test_record_not_found() {
        let err = DbErr::RecordNotFound("user_sessions".to_string());
        let failure = classify("close session", &err);

        assert_eq!(failure.kind, DbErrorKind::NotFound);
        assert_eq!(failure.message, "close session: record not found");
    }
}
