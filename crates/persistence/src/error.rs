// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage failures.
//!
//! Diesel errors are sorted on the way in: a missing row and a rejected
//! constraint get their own variants so callers can answer them, every
//! other driver failure is carried as text.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The database could not be opened or configured.
    #[error("cannot open database {url}: {reason}")]
    Open {
        /// Connection URL or file path.
        url: String,
        /// Driver message.
        reason: String,
    },
    /// Schema migrations did not apply.
    #[error("schema migration failed: {0}")]
    Migration(String),
    /// The connection does not enforce foreign keys.
    #[error("foreign key enforcement is off for this connection")]
    ForeignKeysDisabled,
    /// A write broke a unique, foreign key, not-null or check constraint.
    #[error("constraint violated: {0}")]
    ConstraintViolation(String),
    /// No row matched.
    #[error("not found: {0}")]
    NotFound(String),
    /// No audit event has this id.
    #[error("audit event {0} does not exist")]
    EventNotFound(i64),
    /// A stored row no longer describes a valid value.
    #[error("stored data is invalid: {0}")]
    ReconstructionError(String),
    /// An audit payload could not be encoded or decoded.
    #[error("audit payload is malformed: {0}")]
    Payload(String),
    /// Any other driver failure.
    #[error("database error: {0}")]
    Database(String),
}

impl From<DieselError> for PersistenceError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound(String::from("no matching row")),
            DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation
                | DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::NotNullViolation
                | DatabaseErrorKind::CheckViolation,
                info,
            ) => Self::ConstraintViolation(String::from(info.message())),
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_row_is_not_found() {
        assert_eq!(
            PersistenceError::from(DieselError::NotFound),
            PersistenceError::NotFound(String::from("no matching row"))
        );
    }

    #[test]
    fn test_other_driver_failures_keep_their_message() {
        let err: PersistenceError = PersistenceError::from(DieselError::RollbackTransaction);
        assert!(matches!(err, PersistenceError::Database(_)));
    }

    #[test]
    fn test_bad_payload_is_reported_as_payload() {
        let Err(json_err) = serde_json::from_str::<u8>("not json") else {
            panic!("expected a parse failure");
        };
        assert!(matches!(
            PersistenceError::from(json_err),
            PersistenceError::Payload(_)
        ));
    }

    #[test]
    fn test_open_failure_names_the_target() {
        let err: PersistenceError = PersistenceError::Open {
            url: String::from("/no/such/dir/shop.db"),
            reason: String::from("unable to open database file"),
        };
        assert_eq!(
            err.to_string(),
            "cannot open database /no/such/dir/shop.db: unable to open database file"
        );
    }
}
