use crate::enums::Entity;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),
}

/// The classification every error above the driver reduces to.
///
/// This is what callers compare against. Error values themselves carry
/// context and causes and are not comparable; their `kind()` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A unique constraint on the entity rejected the write.
    AlreadyExists(Entity),
    /// No row of the entity matched, or a reference pointed at a missing one.
    DoesNotExist(Entity),
    /// The row is still referenced by dependent rows.
    ForeignKeyConstraint(Entity),
    /// Input was rejected before reaching the store.
    ValidationFailed,
    /// The store could not be reached.
    Unavailable,
    /// The operation ran past its deadline and was abandoned.
    Timeout,
    /// Anything the translator could not classify.
    Unknown,
}
