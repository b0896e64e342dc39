//! Classification of raw store failures into [`DbError`].
//!
//! Repositories hand every write-path failure to an [`ErrorTranslator`] together
//! with the entity they are operating on, when they know it. Callers that pass
//! the entity never touch the message text. Callers that do not, rely on the
//! engine message to name the table involved, which ties that path to one
//! engine's wording. That coupling stays inside this module: another engine
//! plugs in its own translator behind the same trait.

use crate::DbError;
use core_types::Entity;
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::mysql::MySqlDatabaseError;
use std::fmt;
use tracing::debug;

/// Duplicate entry for a unique key.
pub const ER_DUP_ENTRY: u16 = 1062;
/// A parent row cannot be deleted or updated because a child row references it.
pub const ER_ROW_IS_REFERENCED_2: u16 = 1451;
/// A child row cannot be written because the row it references is missing.
pub const ER_NO_REFERENCED_ROW_2: u16 = 1452;

// "... a foreign key constraint fails (`crema`.`beans`, CONSTRAINT ..."
static REFERENCING_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"foreign key constraint fails \(`[^`]+`\.`([^`]+)`").expect("valid regex")
});

// "... FOREIGN KEY (`beans_id`) REFERENCES `beans` (`id`))"
static REFERENCED_TABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"FOREIGN KEY \(.*?\) REFERENCES `([^`]+)`").expect("valid regex")
});

/// Turns a raw driver error into a domain error.
///
/// `entity` is the entity the caller is operating on, if known. `fallback` is
/// the context attached to the [`DbError::Unknown`] returned when no rule
/// applies; the raw error is kept as its source.
pub trait ErrorTranslator: Send + Sync + fmt::Debug {
    fn translate(&self, raw: sqlx::Error, entity: Option<Entity>, fallback: &'static str) -> DbError;
}

/// Applies a translator to the error side of a driver result.
pub trait TranslateExt<T> {
    fn or_translate(
        self,
        translator: &dyn ErrorTranslator,
        entity: Option<Entity>,
        fallback: &'static str,
    ) -> Result<T, DbError>;
}

impl<T> TranslateExt<T> for Result<T, sqlx::Error> {
    fn or_translate(
        self,
        translator: &dyn ErrorTranslator,
        entity: Option<Entity>,
        fallback: &'static str,
    ) -> Result<T, DbError> {
        self.map_err(|raw| translator.translate(raw, entity, fallback))
    }
}

/// Translator for MySQL and MariaDB error numbers and messages.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlErrorTranslator;

impl ErrorTranslator for MySqlErrorTranslator {
    fn translate(&self, raw: sqlx::Error, entity: Option<Entity>, fallback: &'static str) -> DbError {
        let classified = raw
            .as_database_error()
            .and_then(|err| err.try_downcast_ref::<MySqlDatabaseError>())
            .and_then(|err| {
                debug!(code = err.number(), ?entity, message = err.message(), "classifying store error");
                classify(err.number(), err.message(), entity)
            });

        classified.unwrap_or_else(|| DbError::unknown(fallback, raw))
    }
}

/// The MySQL rules applied to an error number and message. Returns `None`
/// when the caller should fall back.
pub fn classify(code: u16, message: &str, entity: Option<Entity>) -> Option<DbError> {
    match code {
        // Which unique key fired cannot be told reliably from the message.
        ER_DUP_ENTRY => entity.map(DbError::AlreadyExists),
        ER_ROW_IS_REFERENCED_2 => entity
            .or_else(|| referencing_entity(message))
            .map(DbError::ForeignKeyConstraint),
        ER_NO_REFERENCED_ROW_2 => entity
            .or_else(|| referenced_entity(message))
            .map(DbError::DoesNotExist),
        _ => None,
    }
}

/// The child table, named as the subject of the failed constraint.
fn referencing_entity(message: &str) -> Option<Entity> {
    table_entity(&REFERENCING_TABLE, message)
}

/// The parent table, named inside the constraint's REFERENCES clause.
fn referenced_entity(message: &str) -> Option<Entity> {
    table_entity(&REFERENCED_TABLE, message)
}

fn table_entity(pattern: &Regex, message: &str) -> Option<Entity> {
    let table = pattern.captures(message)?.get(1)?.as_str();
    Entity::from_table(table)
}
