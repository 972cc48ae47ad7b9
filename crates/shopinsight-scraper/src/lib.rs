//! Storefront extraction pipeline: fetch a fixed set of public pages and
//! merge what they reveal into one [`shopinsight_core::StoreRecord`].

pub mod catalog;
mod dom;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod policy;
pub mod signals;
pub mod types;

pub use catalog::{fetch_catalog, parse_catalog};
pub use error::{ExtractError, ScraperError};
pub use extract::InsightExtractor;
pub use fetch::{FetchedPage, Fetcher};
pub use normalize::normalize_feed_product;
pub use policy::{fetch_policy, policy_paths, policy_text};
pub use signals::{extract_page_signals, PageSignals};
pub use types::{FeedImage, FeedProduct, FeedResponse, FeedScalar, FeedVariant};
