//! Storage-specific error types for SQLite operations.
//!
//! Diesel and r2d2 failures are wrapped here and converted to the
//! database-agnostic errors of `navfolio_core` at the crate boundary.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use navfolio_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-specific errors that wrap Diesel and r2d2 types.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[from] diesel::ConnectionError),

    #[error("Connection pool error: {0}")]
    PoolError(#[from] r2d2::Error),

    #[error("Query execution failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Invalid stored value for {column}: '{value}'")]
    InvalidValue { column: String, value: String },

    #[error("Core error: {0}")]
    CoreError(String),
}

/// Lets the writer actor run core-returning jobs inside a Diesel transaction.
impl From<Error> for StorageError {
    fn from(err: Error) -> Self {
        StorageError::CoreError(err.to_string())
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(e) => {
                Error::Database(DatabaseError::ConnectionFailed(e.to_string()))
            }
            StorageError::PoolError(e) => {
                Error::Database(DatabaseError::PoolCreationFailed(e.to_string()))
            }
            StorageError::QueryFailed(DieselError::NotFound) => {
                Error::Database(DatabaseError::NotFound("Record not found".to_string()))
            }
            StorageError::QueryFailed(DieselError::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                info,
            )) => Error::Database(DatabaseError::UniqueViolation(info.message().to_string())),
            StorageError::QueryFailed(e @ DieselError::RollbackTransaction)
            | StorageError::QueryFailed(e @ DieselError::AlreadyInTransaction) => {
                Error::Database(DatabaseError::TransactionFailed(e.to_string()))
            }
            StorageError::QueryFailed(e) => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::MigrationFailed(e) => Error::Database(DatabaseError::MigrationFailed(e)),
            e @ StorageError::InvalidValue { .. } => {
                Error::Database(DatabaseError::QueryFailed(e.to_string()))
            }
            StorageError::CoreError(e) => Error::Database(DatabaseError::Internal(e)),
        }
    }
}

/// True when SQLite reports that the queried table has not been created yet.
pub fn is_missing_table(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(_, info) => info.message().contains("no such table"),
        _ => false,
    }
}

/// Extension trait for converting Diesel and r2d2 results to core results.
///
/// Orphan rules forbid `From<DieselError> for Error`, so the conversion goes
/// through [`StorageError`].
pub trait IntoCore<T> {
    fn into_core(self) -> navfolio_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, DieselError> {
    fn into_core(self) -> navfolio_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}

impl<T> IntoCore<T> for std::result::Result<T, r2d2::Error> {
    fn into_core(self) -> navfolio_core::Result<T> {
        self.map_err(|e| StorageError::from(e).into())
    }
}
