pub mod app_config;
pub mod config;
pub mod site_url;
pub mod store;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use site_url::{canonical_site_url, SiteUrlError};
pub use store::{dedupe_by_id, dedupe_values, FaqEntry, PolicyKind, Product, StoreRecord};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
