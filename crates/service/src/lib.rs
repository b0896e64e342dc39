//! # Crema Service Crate
//!
//! The use cases of crema: each service validates its input, calls its
//! repository and hands back the entity as stored. Services hold their
//! repository behind a trait object, so tests swap in mocks and the binary
//! wires in the MySQL implementations through [`Services::mysql`].

pub mod beans;
pub mod dto;
pub mod error;
pub mod roasters;
pub mod sheets;
pub mod shots;

#[cfg(test)]
mod test_support;

pub use beans::BeansService;
pub use dto::{BeansRequest, RoasterRequest, SheetRequest, ShotRequest};
pub use error::ServiceError;
pub use roasters::RoasterService;
pub use sheets::SheetService;
pub use shots::ShotService;

use database::{
    DbContext, MySqlBeansRepository, MySqlRoasterRepository, MySqlSheetRepository,
    MySqlShotRepository,
};
use std::sync::Arc;

/// Every service the application exposes, built once at startup.
#[derive(Clone)]
pub struct Services {
    pub sheets: SheetService,
    pub roasters: RoasterService,
    pub beans: BeansService,
    pub shots: ShotService,
}

impl Services {
    /// Wires each service to its MySQL repository over one shared context.
    pub fn mysql(ctx: DbContext) -> Self {
        Self {
            sheets: SheetService::new(Arc::new(MySqlSheetRepository::new(ctx.clone()))),
            roasters: RoasterService::new(Arc::new(MySqlRoasterRepository::new(ctx.clone()))),
            beans: BeansService::new(Arc::new(MySqlBeansRepository::new(ctx.clone()))),
            shots: ShotService::new(Arc::new(MySqlShotRepository::new(ctx))),
        }
    }

    /// Reachability of the store. Every repository shares the pool, so asking
    /// one is enough.
    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.sheets.ping().await
    }
}
