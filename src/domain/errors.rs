//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.

use std::fmt;

use sea_orm::{DbErr, SqlErr};

#[derive(Debug)]
pub enum DomainError {
    /// Referenced row does not exist
    NotFound,
    /// Unique or foreign-key constraint violated on write
    Conflict(String),
    /// Validation error with message
    Validation(String),
    /// Database/persistence error
    Database(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound => write!(f, "Resource not found"),
            DomainError::Conflict(msg) => write!(f, "Constraint violation: {}", msg),
            DomainError::Validation(msg) => write!(f, "Validation error: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return DomainError::Conflict(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return DomainError::Conflict(msg);
            }
            _ => {}
        }

        match e {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => DomainError::NotFound,
            other => DomainError::Database(other.to_string()),
        }
    }
}
