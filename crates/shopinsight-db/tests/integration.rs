//! Offline tests for shopinsight-db pool configuration and the repository
//! dispatch. These tests do not require a live database connection.

use shopinsight_core::{AppConfig, Environment, StoreRecord};
use shopinsight_db::{AnyStoreRepository, MemoryStoreRepository, PoolConfig, StoreRepository};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

fn app_config(database_url: Option<&str>) -> AppConfig {
    AppConfig {
        database_url: database_url.map(str::to_string),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        fetch_timeout_secs: 10,
        user_agent: "ua".to_string(),
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config(Some("postgres://example")));
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[tokio::test]
async fn connect_pool_from_config_requires_database_url() {
    let result = shopinsight_db::connect_pool_from_config(&app_config(None)).await;
    assert!(matches!(
        result,
        Err(shopinsight_db::DbError::MissingDatabaseUrl)
    ));
}

#[tokio::test]
async fn any_repository_dispatches_to_memory_backend() {
    let repo = AnyStoreRepository::Memory(MemoryStoreRepository::new());
    assert_eq!(repo.backend_name(), "memory");

    let mut record = StoreRecord::new("https://glow.example");
    record.brand_name = Some("Glow Co".to_string());
    record.success = true;

    repo.save(&record).await.expect("save");
    repo.health_check().await.expect("health");
    let loaded = repo
        .load("https://glow.example")
        .await
        .expect("load")
        .expect("record present");
    assert_eq!(loaded.brand_name.as_deref(), Some("Glow Co"));
}
