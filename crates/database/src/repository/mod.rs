//! Repository traits, one per entity, and the MySQL implementations behind
//! them.
//!
//! Every operation is a single statement against the shared pool, bounded by
//! the context's deadline. Dropping a returned future cancels the statement
//! in flight.

use crate::models::{BeansRecord, RoasterRecord, SheetRecord, ShotRecord};
use crate::translator::{ErrorTranslator, MySqlErrorTranslator};
use crate::DbError;
use async_trait::async_trait;
use core_types::{Beans, Entity, Roaster, Sheet, Shot};
use sqlx::mysql::{MySqlPool, MySqlQueryResult};
use sqlx::Connection;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

mod beans;
mod roasters;
mod sheets;
mod shots;

pub use beans::MySqlBeansRepository;
pub use roasters::MySqlRoasterRepository;
pub use sheets::MySqlSheetRepository;
pub use shots::MySqlShotRepository;

/// Handles every repository is built from: the pool, the translator that
/// classifies its failures, and the deadline applied to each operation.
#[derive(Debug, Clone)]
pub struct DbContext {
    pool: MySqlPool,
    translator: Arc<dyn ErrorTranslator>,
    query_timeout: Duration,
}

impl DbContext {
    /// Creates a context using the MySQL error translator.
    pub fn new(pool: MySqlPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            translator: Arc::new(MySqlErrorTranslator),
            query_timeout,
        }
    }

    /// Replaces the error translator, for a store whose engine reports
    /// constraint failures differently.
    pub fn with_translator(mut self, translator: Arc<dyn ErrorTranslator>) -> Self {
        self.translator = translator;
        self
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub(crate) fn translator(&self) -> &dyn ErrorTranslator {
        self.translator.as_ref()
    }

    /// Liveness check: acquires a pooled connection and pings the server.
    pub async fn ping(&self) -> Result<(), DbError> {
        self.run(async {
            let mut conn = self.pool.acquire().await.map_err(DbError::Unavailable)?;
            conn.ping().await.map_err(DbError::Unavailable)
        })
        .await
    }

    /// Runs one operation under the deadline. On expiry the operation's future
    /// is dropped, abandoning the statement.
    pub(crate) async fn run<T, F>(&self, op: F) -> Result<T, DbError>
    where
        F: Future<Output = Result<T, DbError>>,
    {
        match tokio::time::timeout(self.query_timeout, op).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(timeout = ?self.query_timeout, "Database operation timed out.");
                Err(DbError::Timeout(self.query_timeout))
            }
        }
    }
}

/// Read-path mapping: a missing row is `DoesNotExist`, anything else is
/// wrapped with the operation's context.
pub(crate) fn read_error(entity: Entity, context: &'static str) -> impl FnOnce(sqlx::Error) -> DbError {
    move |e| match e {
        sqlx::Error::RowNotFound => DbError::DoesNotExist(entity),
        other => DbError::unknown(context, other),
    }
}

/// Update and delete must touch exactly the addressed row.
pub(crate) fn expect_single_row(result: MySqlQueryResult, entity: Entity) -> Result<(), DbError> {
    match result.rows_affected() {
        1 => Ok(()),
        affected => {
            tracing::debug!(affected, %entity, "Statement did not affect exactly one row.");
            Err(DbError::DoesNotExist(entity))
        }
    }
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait SheetRepository: Send + Sync {
    /// Inserts a sheet and returns its assigned id.
    async fn create(&self, sheet: &SheetRecord) -> Result<u64, DbError>;
    async fn get_by_id(&self, id: u64) -> Result<Sheet, DbError>;
    /// Looks a sheet up by its unique name.
    async fn get_by_name(&self, name: &str) -> Result<Sheet, DbError>;
    async fn get_all(&self) -> Result<Vec<Sheet>, DbError>;
    /// Rewrites the sheet addressed by `id` and returns the stored row.
    async fn update_by_id(&self, id: u64, sheet: &SheetRecord) -> Result<Sheet, DbError>;
    async fn delete_by_id(&self, id: u64) -> Result<(), DbError>;
    async fn ping(&self) -> Result<(), DbError>;
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait RoasterRepository: Send + Sync {
    async fn create(&self, roaster: &RoasterRecord) -> Result<u64, DbError>;
    async fn get_by_id(&self, id: u64) -> Result<Roaster, DbError>;
    async fn get_by_name(&self, name: &str) -> Result<Roaster, DbError>;
    async fn get_all(&self) -> Result<Vec<Roaster>, DbError>;
    async fn update_by_id(&self, id: u64, roaster: &RoasterRecord) -> Result<Roaster, DbError>;
    async fn delete_by_id(&self, id: u64) -> Result<(), DbError>;
    async fn ping(&self) -> Result<(), DbError>;
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BeansRepository: Send + Sync {
    async fn create(&self, beans: &BeansRecord) -> Result<u64, DbError>;
    /// Reads the beans together with their roaster.
    async fn get_by_id(&self, id: u64) -> Result<Beans, DbError>;
    async fn get_all(&self) -> Result<Vec<Beans>, DbError>;
    async fn update_by_id(&self, id: u64, beans: &BeansRecord) -> Result<Beans, DbError>;
    async fn delete_by_id(&self, id: u64) -> Result<(), DbError>;
    async fn ping(&self) -> Result<(), DbError>;
}

#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ShotRepository: Send + Sync {
    async fn create(&self, shot: &ShotRecord) -> Result<u64, DbError>;
    /// Reads the full aggregate. Shots whose sheet, beans or roaster are gone
    /// are not reachable.
    async fn get_by_id(&self, id: u64) -> Result<Shot, DbError>;
    async fn get_all(&self) -> Result<Vec<Shot>, DbError>;
    async fn get_all_by_sheet(&self, sheet_id: u64) -> Result<Vec<Shot>, DbError>;
    /// The statement does not return the row; read it back with `get_by_id`.
    async fn update_by_id(&self, id: u64, shot: &ShotRecord) -> Result<(), DbError>;
    async fn delete_by_id(&self, id: u64) -> Result<(), DbError>;
    async fn ping(&self) -> Result<(), DbError>;
}
