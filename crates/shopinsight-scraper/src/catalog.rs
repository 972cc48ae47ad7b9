//! Product catalog from the storefront's `products.json` feed.

use shopinsight_core::Product;

use crate::error::ScraperError;
use crate::fetch::Fetcher;
use crate::normalize::normalize_feed_product;
use crate::types::{FeedProduct, FeedResponse};

/// Page size requested from the feed. The storefront caps it at 250.
const FEED_PAGE_LIMIT: u32 = 250;

/// Builds the feed URL for `site_url`.
#[must_use]
pub fn products_url(site_url: &str) -> String {
    format!(
        "{}/products.json?limit={FEED_PAGE_LIMIT}",
        site_url.trim_end_matches('/')
    )
}

/// Fetches and parses the product feed.
///
/// Best-effort: an unreachable endpoint, a non-2xx status, or an unparseable
/// body all yield an empty catalog.
pub async fn fetch_catalog(fetcher: &Fetcher, site_url: &str) -> Vec<Product> {
    let url = products_url(site_url);
    let page = fetcher.fetch(&url).await;
    if !page.is_ok() {
        tracing::info!(url = %url, status = ?page.status, "product feed unavailable");
        return Vec::new();
    }

    match parse_catalog(&page.body, site_url) {
        Ok(products) => products,
        Err(e) => {
            tracing::warn!(url = %url, error = %e, "product feed is not valid JSON");
            Vec::new()
        }
    }
}

/// Parses a feed body into products, skipping items that do not deserialize.
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] if the body is not a JSON object of
/// the expected top-level shape.
pub fn parse_catalog(body: &str, site_url: &str) -> Result<Vec<Product>, ScraperError> {
    let response =
        serde_json::from_str::<FeedResponse>(body).map_err(|e| ScraperError::Deserialize {
            context: format!("product feed from {site_url}"),
            source: e,
        })?;

    let items = response.products.unwrap_or_default();
    let total = items.len();
    let products: Vec<Product> = items
        .into_iter()
        .enumerate()
        .filter_map(
            |(idx, item)| match serde_json::from_value::<FeedProduct>(item) {
                Ok(raw) => Some(normalize_feed_product(raw, site_url)),
                Err(e) => {
                    tracing::warn!(site_url, index = idx, error = %e, "skipping malformed feed item");
                    None
                }
            },
        )
        .collect();

    tracing::debug!(site_url, total, kept = products.len(), "parsed product feed");
    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn products_url_for_bare_origin() {
        assert_eq!(
            products_url("https://colourpop.com"),
            "https://colourpop.com/products.json?limit=250"
        );
    }

    #[test]
    fn products_url_strips_trailing_slash() {
        assert_eq!(
            products_url("https://colourpop.com/"),
            "https://colourpop.com/products.json?limit=250"
        );
    }

    #[test]
    fn parse_catalog_keeps_feed_order() {
        let body = r#"{"products": [
            {"id": 2, "title": "B", "handle": "b"},
            {"id": 1, "title": "A", "handle": "a"}
        ]}"#;
        let products = parse_catalog(body, "https://example.com").unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn parse_catalog_skips_malformed_items() {
        let body = r#"{"products": [
            {"id": 1, "title": "Good", "handle": "good"},
            {"title": "No id"},
            {"id": 3, "title": null},
            "not an object",
            {"id": 4, "title": "Also good"}
        ]}"#;
        let products = parse_catalog(body, "https://example.com").unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn parse_catalog_without_products_key_is_empty() {
        let products = parse_catalog(r#"{"collections": []}"#, "https://example.com").unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn parse_catalog_rejects_html() {
        let result = parse_catalog("<html>nope</html>", "https://example.com");
        assert!(matches!(result, Err(ScraperError::Deserialize { .. })));
    }
}
