//! Shared domain vocabulary for crema: the brewing entities, their enums, and
//! the error kinds every layer above the database agrees on.

pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Comparison, Entity, RoastLevel};
pub use error::{CoreError, ErrorKind};
pub use structs::{Beans, Roaster, Sheet, Shot};
