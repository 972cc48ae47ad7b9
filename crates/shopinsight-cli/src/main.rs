use clap::{Parser, Subcommand};
use shopinsight_core::{canonical_site_url, AppConfig, StoreRecord};
use shopinsight_db::{PgStoreRepository, StoreRepository};
use shopinsight_scraper::InsightExtractor;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopinsight-cli")]
#[command(about = "Extract brand insights from Shopify storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract insights for a storefront and print them as JSON
    Extract {
        /// Any URL on the storefront; only its origin is used
        url: String,

        /// Persist the record to Postgres (requires `DATABASE_URL`)
        #[arg(long)]
        save: bool,
    },
    /// Print the stored record for a storefront
    Show {
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = shopinsight_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON output; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract { url, save } => run_extract(&config, &url, save).await,
        Commands::Show { url } => run_show(&config, &url).await,
    }
}

async fn run_extract(config: &AppConfig, url: &str, save: bool) -> anyhow::Result<()> {
    // Connect first so a bad DATABASE_URL fails before any scraping.
    let repo = if save {
        Some(connect_repository(config).await?)
    } else {
        None
    };

    let extractor = InsightExtractor::with_settings(config.fetch_timeout_secs, &config.user_agent)?;
    let record = extractor.extract_insights(url).await?;

    if let Some(repo) = repo {
        let store_id = repo.save(&record).await?;
        tracing::info!(store_id, website_url = %record.website_url, "store record saved");
    }

    print_record(&record)
}

async fn run_show(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let site_url = canonical_site_url(url)?;
    let repo = connect_repository(config).await?;
    let record = repo
        .load(&site_url)
        .await?
        .ok_or_else(|| anyhow::anyhow!("no stored record for {site_url}"))?;
    print_record(&record)
}

async fn connect_repository(config: &AppConfig) -> anyhow::Result<PgStoreRepository> {
    let pool = shopinsight_db::connect_pool_from_config(config).await?;
    let applied = shopinsight_db::run_migrations(&pool).await?;
    tracing::debug!(applied, "database migrations complete");
    Ok(PgStoreRepository::new(pool))
}

fn print_record(record: &StoreRecord) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}
