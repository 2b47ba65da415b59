//! Persistence contract for session records.
//!
//! The core depends only on this contract, never on a concrete storage
//! technology. Calls are asynchronous and may be slow or fail; callers
//! treat persistence as best-effort with in-memory state as the source
//! of truth.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;
use vodnote_model::Vodding;

/// Failure at the storage boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Load/save/list/delete by id, the whole contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoddingStore: Send + Sync {
    async fn save(&self, record: &Vodding) -> Result<(), StoreError>;
    async fn load_by_id(&self, id: Uuid) -> Result<Option<Vodding>, StoreError>;
    async fn list_all(&self) -> Result<Vec<Vodding>, StoreError>;
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;
}

/// In-memory store for tests and offline sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<Uuid, Vodding>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoddingStore for MemoryStore {
    async fn save(&self, record: &Vodding) -> Result<(), StoreError> {
        self.records.lock().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load_by_id(&self, id: Uuid) -> Result<Option<Vodding>, StoreError> {
        Ok(self.records.lock().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Vodding>, StoreError> {
        Ok(self.records.lock().await.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        self.records.lock().await.remove(&id);
        Ok(())
    }
}

/// Thin view over the store for the saved-sessions list.
#[derive(Debug, Clone, Copy)]
pub struct SessionCatalog<'a, S: VoddingStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: VoddingStore + ?Sized> SessionCatalog<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All saved sessions, most recently updated first.
    pub async fn sessions(&self) -> Result<Vec<Vodding>, StoreError> {
        let mut sessions = self.store.list_all().await?;
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.store.delete_by_id(id).await
    }
}
