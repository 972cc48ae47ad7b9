//! The persistence seam the extraction service writes through.

use std::future::Future;

use shopinsight_core::StoreRecord;

use crate::memory::MemoryStoreRepository;
use crate::stores::PgStoreRepository;
use crate::DbError;

/// Database identifier of a saved store.
pub type StoreId = i64;

/// Durable storage for extracted [`StoreRecord`]s, keyed by canonical site URL.
///
/// `save` has replace semantics: whatever was stored for the record's
/// `website_url` is discarded and the new record takes its place, atomically.
pub trait StoreRepository: Send + Sync {
    /// Persists `record`, replacing any earlier record for the same site.
    fn save(&self, record: &StoreRecord) -> impl Future<Output = Result<StoreId, DbError>> + Send;

    /// Returns the stored record for `website_url`, if any.
    fn load(
        &self,
        website_url: &str,
    ) -> impl Future<Output = Result<Option<StoreRecord>, DbError>> + Send;

    fn health_check(&self) -> impl Future<Output = Result<(), DbError>> + Send;
}

/// Runtime choice between the Postgres and in-memory repositories.
#[derive(Debug, Clone)]
pub enum AnyStoreRepository {
    Postgres(PgStoreRepository),
    Memory(MemoryStoreRepository),
}

impl AnyStoreRepository {
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        match self {
            AnyStoreRepository::Postgres(_) => "postgres",
            AnyStoreRepository::Memory(_) => "memory",
        }
    }
}

impl StoreRepository for AnyStoreRepository {
    async fn save(&self, record: &StoreRecord) -> Result<StoreId, DbError> {
        match self {
            AnyStoreRepository::Postgres(repo) => repo.save(record).await,
            AnyStoreRepository::Memory(repo) => repo.save(record).await,
        }
    }

    async fn load(&self, website_url: &str) -> Result<Option<StoreRecord>, DbError> {
        match self {
            AnyStoreRepository::Postgres(repo) => repo.load(website_url).await,
            AnyStoreRepository::Memory(repo) => repo.load(website_url).await,
        }
    }

    async fn health_check(&self) -> Result<(), DbError> {
        match self {
            AnyStoreRepository::Postgres(repo) => repo.health_check().await,
            AnyStoreRepository::Memory(repo) => repo.health_check().await,
        }
    }
}
