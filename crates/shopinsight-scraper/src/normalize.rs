//! Normalization from raw feed items to [`shopinsight_core::Product`].

use shopinsight_core::Product;

use crate::types::FeedProduct;

/// Normalizes a raw [`FeedProduct`] into a [`Product`].
///
/// - `url` is `<site_url>/products/<handle>`, absent when the item has no handle.
/// - `price` is the first variant's price as text, absent without variants.
/// - `image` is the first gallery image, falling back to the primary image.
#[must_use]
pub fn normalize_feed_product(product: FeedProduct, site_url: &str) -> Product {
    let url = product
        .handle
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(|handle| format!("{}/products/{handle}", site_url.trim_end_matches('/')));

    let price = product
        .variants
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|variant| variant.price)
        .map(|price| price.to_string());

    let image = product
        .images
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|img| img.src)
        .or_else(|| product.image.and_then(|img| img.src))
        .filter(|src| !src.is_empty());

    Product {
        id: product.id.to_string(),
        title: product.title,
        url,
        price,
        image,
        description: product.body_html,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
