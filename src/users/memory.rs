//! In-memory user backend

use async_trait::async_trait;
use config::MemoryConfig;
use memory_store::{MemoryError, MemoryStore};
use metrics_system::{start_store_segment, Context, Platform, Segment};
use type_mapping::BindValue;

use super::DataAccess;
use crate::domain::{User, UserPages};
use crate::errors::{DaoError, ErrorCode};
use crate::filters::{Filters, KeyOperator};
use crate::statements::USERS_TABLE;

/// User storage kept in process memory, keyed by `<id>-<name>`
#[derive(Debug, Clone, Default)]
pub struct UserMemory {
    store: MemoryStore,
}

impl UserMemory {
    pub fn new(config: MemoryConfig) -> Self {
        Self::with_store(MemoryStore::new(config))
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    pub fn user_key(user: &User) -> String {
        format!("{}-{}", user.id, user.name)
    }

    fn filter_key(filters: &Filters) -> Result<String, DaoError> {
        match (key_value(&filters.id), key_value(&filters.name)) {
            (Some(id), Some(name)) => Ok(format!("{}-{}", id, name)),
            _ => Err(DaoError::errorf(
                ErrorCode::ClientSide,
                "memory search requires id and name filters",
            )),
        }
    }

    fn segment(action: &str) -> Segment {
        Segment::new()
            .with_action(action)
            .with_resource(USERS_TABLE)
            .with_platform(Platform::Cache)
    }
}

fn key_value(key: &KeyOperator) -> Option<&BindValue> {
    if key.has_value() {
        key.value.as_ref()
    } else {
        None
    }
}

#[async_trait]
impl DataAccess for UserMemory {
    async fn search(&self, ctx: &Context, filters: Filters) -> Result<UserPages, DaoError> {
        let key = Self::filter_key(&filters)?;
        let user: User =
            start_store_segment(ctx, Self::segment("get"), self.store.get::<User>(&key)).await?;

        Ok(UserPages {
            limit: 0,
            offset: 0,
            total: 1,
            users: vec![user],
        })
    }

    async fn create(&self, ctx: &Context, user: User) -> Result<(), DaoError> {
        let key = Self::user_key(&user);
        start_store_segment(ctx, Self::segment("save"), self.store.save(&key, &user)).await?;
        Ok(())
    }

    async fn update(&self, ctx: &Context, user: User) -> Result<(), DaoError> {
        let key = Self::user_key(&user);
        if !self.store.exists(&key).await {
            return Err(MemoryError::KeyNotFound(key).into());
        }
        start_store_segment(ctx, Self::segment("save"), self.store.save(&key, &user)).await?;
        Ok(())
    }
}
