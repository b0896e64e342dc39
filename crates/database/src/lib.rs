//! # Crema Database Crate
//!
//! This crate is the data-access layer of crema: every SQL statement the
//! application issues lives here, and every store failure is classified here
//! before it leaves.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** Services see repository traits and `DbError`; no `sqlx` type
//!   crosses the repository signatures.
//! - **One statement per step:** Each repository call is an independent
//!   statement on the shared pool. There are no transactions spanning calls.
//! - **Classified errors:** Write-path failures go through an
//!   [`ErrorTranslator`], so a duplicate name or a dangling reference arrives
//!   upstream as a typed `DbError` rather than as driver text.
//!
//! ## Public API
//!
//! - `connect`: builds the MySQL connection pool from the settings.
//! - `DbContext`: the pool, translator and per-operation deadline handed to
//!   each repository at construction.
//! - `SheetRepository`, `RoasterRepository`, `BeansRepository`,
//!   `ShotRepository` and their MySQL implementations.
//! - `DbError`: the error taxonomy returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod models;
pub mod repository;
pub mod translator;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use models::{BeansRecord, RoasterRecord, SheetRecord, ShotRecord};
pub use repository::{
    BeansRepository, DbContext, MySqlBeansRepository, MySqlRoasterRepository,
    MySqlSheetRepository, MySqlShotRepository, RoasterRepository, SheetRepository,
    ShotRepository,
};
pub use translator::{ErrorTranslator, MySqlErrorTranslator};

#[cfg(any(test, feature = "mocks"))]
pub use repository::{
    MockBeansRepository, MockRoasterRepository, MockSheetRepository, MockShotRepository,
};
