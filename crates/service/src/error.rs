use core_types::ErrorKind;
use database::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Input rejected before any store call.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// A repository failure, with the operation that hit it.
    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: DbError,
    },
}

impl ServiceError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        ServiceError::Validation { field, reason: reason.into() }
    }

    /// Wraps a repository error with `context`, keeping its kind.
    pub fn repository(context: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| ServiceError::Repository { context, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation { .. } => ErrorKind::ValidationFailed,
            ServiceError::Repository { source, .. } => source.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Entity;

    #[test]
    fn wrapping_keeps_the_repository_kind() {
        let err = ServiceError::repository("could not update sheet by id")(DbError::DoesNotExist(
            Entity::Sheet,
        ));
        assert_eq!(err.kind(), ErrorKind::DoesNotExist(Entity::Sheet));
        assert_eq!(err.to_string(), "could not update sheet by id: sheet does not exist");
    }

    #[test]
    fn validation_has_its_own_kind() {
        let err = ServiceError::validation("rating", "must be between 0 and 10");
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.to_string(), "invalid rating: must be between 0 and 10");
    }
}
