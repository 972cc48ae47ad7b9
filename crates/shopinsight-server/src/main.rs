mod api;
mod middleware;

use shopinsight_core::AppConfig;
use shopinsight_db::{AnyStoreRepository, MemoryStoreRepository, PgStoreRepository};
use shopinsight_scraper::InsightExtractor;
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopinsight_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let repo = build_repository(&config).await?;
    let extractor = InsightExtractor::with_settings(config.fetch_timeout_secs, &config.user_agent)?;
    let app = build_app(AppState { extractor, repo });

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = %config.env, "shopinsight-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Postgres when `DATABASE_URL` is set, otherwise an in-memory store.
async fn build_repository(config: &AppConfig) -> anyhow::Result<AnyStoreRepository> {
    if config.database_url.is_none() {
        tracing::warn!("DATABASE_URL not set; extracted records are kept in memory only");
        return Ok(AnyStoreRepository::Memory(MemoryStoreRepository::new()));
    }

    let pool = shopinsight_db::connect_pool_from_config(config).await?;
    let applied = shopinsight_db::run_migrations(&pool).await?;
    tracing::info!(applied, "database migrations complete");
    Ok(AnyStoreRepository::Postgres(PgStoreRepository::new(pool)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
