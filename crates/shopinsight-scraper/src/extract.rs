//! Extraction orchestration for one storefront.
//!
//! `extract_insights` drives homepage fetch → page signals → catalog and
//! policy lookups → record assembly. Only two exits are failures: an
//! unreachable homepage and an internal error. Every other step degrades its
//! own field to empty instead of failing the request.

use reqwest::Url;
use shopinsight_core::{canonical_site_url, PolicyKind, StoreRecord};

use crate::catalog::fetch_catalog;
use crate::error::{ExtractError, ScraperError};
use crate::fetch::Fetcher;
use crate::policy::fetch_policy;
use crate::signals::extract_page_signals;

/// Runs the extraction pipeline. Cheap to clone; clones share one
/// connection pool.
#[derive(Debug, Clone)]
pub struct InsightExtractor {
    fetcher: Fetcher,
}

impl InsightExtractor {
    #[must_use]
    pub fn new(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Builds an extractor with its own [`Fetcher`].
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn with_settings(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        Ok(Self::new(Fetcher::new(timeout_secs, user_agent)?))
    }

    /// Extracts a [`StoreRecord`] for `website_url`.
    ///
    /// # Errors
    ///
    /// - [`ExtractError::Unreachable`] if the homepage fetch failed or was not 200.
    /// - [`ExtractError::Internal`] if the input URL is malformed or the
    ///   pipeline hit an unexpected failure.
    pub async fn extract_insights(&self, website_url: &str) -> Result<StoreRecord, ExtractError> {
        let site_url = canonical_site_url(website_url)?;
        let base = Url::parse(&site_url).map_err(|e| ExtractError::Internal {
            reason: format!("canonical URL {site_url} does not parse: {e}"),
        })?;

        tracing::info!(site_url = %site_url, "extracting storefront insights");

        let homepage = self.fetcher.fetch(base.as_str()).await;
        if !homepage.has_status(200) {
            tracing::warn!(site_url = %site_url, status = ?homepage.status, "homepage unreachable");
            return Err(ExtractError::Unreachable {
                url: site_url,
                status: homepage.status,
            });
        }

        // The parsed document is not `Send`; it lives only inside this call.
        let signals = extract_page_signals(&homepage.body, &base);
        drop(homepage);

        let (catalog, privacy, returns, refund) = futures::join!(
            fetch_catalog(&self.fetcher, &site_url),
            fetch_policy(&self.fetcher, &site_url, PolicyKind::Privacy),
            fetch_policy(&self.fetcher, &site_url, PolicyKind::Return),
            fetch_policy(&self.fetcher, &site_url, PolicyKind::Refund),
        );

        let mut record = StoreRecord::new(site_url);
        record.brand_name = signals.brand_name;
        record.product_catalog = catalog;
        record.hero_products = signals.hero_products;
        record.set_policy(PolicyKind::Privacy, privacy);
        record.set_policy(PolicyKind::Return, returns);
        record.set_policy(PolicyKind::Refund, refund);
        record.faq = signals.faq;
        record.social_handles = signals.social_handles;
        record.contact_details = signals.contact_details;
        record.about_brand = signals.about_brand;
        record.important_links = signals.important_links;
        record.normalize();
        record.success = true;

        tracing::info!(
            site_url = %record.website_url,
            products = record.product_catalog.len(),
            hero_products = record.hero_products.len(),
            socials = record.social_handles.len(),
            contacts = record.contact_details.len(),
            links = record.important_links.len(),
            "extraction complete"
        );

        Ok(record)
    }
}
