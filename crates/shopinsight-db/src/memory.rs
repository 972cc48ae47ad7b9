//! In-process [`StoreRepository`] used when no database is configured, and in tests.

use std::collections::HashMap;
use std::sync::Arc;

use shopinsight_core::StoreRecord;
use tokio::sync::RwLock;

use crate::repository::{StoreId, StoreRepository};
use crate::DbError;

#[derive(Debug, Default)]
struct MemoryState {
    next_id: StoreId,
    stores: HashMap<String, (StoreId, StoreRecord)>,
}

/// Mirrors the Postgres repository's replace semantics, including product
/// re-homing, without a database. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStoreRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStoreRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stores currently held.
    pub async fn len(&self) -> usize {
        self.state.read().await.stores.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl StoreRepository for MemoryStoreRepository {
    async fn save(&self, record: &StoreRecord) -> Result<StoreId, DbError> {
        let mut record = record.clone();
        record.normalize();
        record.success = true;

        let mut state = self.state.write().await;
        state.stores.remove(&record.website_url);

        // Product IDs are globally unique; saving a product moves it here.
        for (_, other) in state.stores.values_mut() {
            other
                .product_catalog
                .retain(|p| !record.product_catalog.iter().any(|mine| mine.id == p.id));
            other
                .hero_products
                .retain(|p| !record.hero_products.iter().any(|mine| mine.id == p.id));
        }

        state.next_id += 1;
        let id = state.next_id;
        tracing::debug!(store_id = id, website_url = %record.website_url, "store saved in memory");
        state.stores.insert(record.website_url.clone(), (id, record));
        Ok(id)
    }

    async fn load(&self, website_url: &str) -> Result<Option<StoreRecord>, DbError> {
        let state = self.state.read().await;
        Ok(state
            .stores
            .get(website_url)
            .map(|(_, record)| record.clone()))
    }

    async fn health_check(&self) -> Result<(), DbError> {
        Ok(())
    }
}
