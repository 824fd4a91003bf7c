//! User data access
//!
//! [`DataAccess`] is implemented by a MySQL backend ([`UserStorage`]) and an
//! in-memory backend ([`UserMemory`]); [`init_data_access`] picks one.

mod memory;
mod storage;

pub use memory::UserMemory;
pub use storage::UserStorage;

use async_trait::async_trait;
use config::AppConfig;
use metrics_system::Context;

use crate::domain::{User, UserPages};
use crate::errors::DaoError;
use crate::filters::Filters;

#[async_trait]
pub trait DataAccess: Send + Sync {
    async fn search(&self, ctx: &Context, filters: Filters) -> Result<UserPages, DaoError>;

    async fn create(&self, ctx: &Context, user: User) -> Result<(), DaoError>;

    async fn update(&self, ctx: &Context, user: User) -> Result<(), DaoError>;
}

/// Backend behind [`DataAccess`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    MySql,
    Memory,
}

pub async fn init_data_access(
    storage_type: StorageType,
    config: &AppConfig,
) -> Result<Box<dyn DataAccess>, DaoError> {
    match storage_type {
        StorageType::MySql => {
            let storage = UserStorage::connect(config).await?;
            Ok(Box::new(storage))
        }
        StorageType::Memory => Ok(Box::new(UserMemory::new(config.memory.clone()))),
    }
}
