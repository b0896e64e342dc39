use core_types::{Entity, ErrorKind};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Failed to load configuration for database connection: {0}")]
    ConnectionConfigError(String),

    #[error("{0} already exists")]
    AlreadyExists(Entity),

    #[error("{0} does not exist")]
    DoesNotExist(Entity),

    /// The row cannot be removed while other rows still reference it. When the
    /// caller did not know the entity, this names the referencing table instead.
    #[error("{0} is still referenced by other records")]
    ForeignKeyConstraint(Entity),

    #[error("The database is unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("Database operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("{context}: {source}")]
    Unknown {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl DbError {
    /// Wraps an unclassified driver failure with the operation that hit it.
    pub fn unknown(context: &'static str, source: sqlx::Error) -> Self {
        DbError::Unknown { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::AlreadyExists(entity) => ErrorKind::AlreadyExists(*entity),
            DbError::DoesNotExist(entity) => ErrorKind::DoesNotExist(*entity),
            DbError::ForeignKeyConstraint(entity) => ErrorKind::ForeignKeyConstraint(*entity),
            DbError::ConnectionConfigError(_) | DbError::Unavailable(_) => ErrorKind::Unavailable,
            DbError::Timeout(_) => ErrorKind::Timeout,
            DbError::Unknown { .. } => ErrorKind::Unknown,
        }
    }
}
