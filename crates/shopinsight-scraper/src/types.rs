//! Response types for the public `products.json` feed.
//!
//! The feed is modeled loosely on purpose. Storefront themes and apps
//! rewrite this endpoint in surprising ways, so every field beyond `id` and
//! `title` is optional and `null` is treated like a missing field:
//!
//! - `id` is numeric on stock stores but some proxies stringify it.
//! - `variants[].price` is a decimal string (`"12.99"`) on stock stores and a
//!   bare JSON number on a few headless setups.
//! - `images` is an array of image objects; `image` is the primary image
//!   object and is only consulted when `images` is empty.
//! - `body_html` is raw markup and is passed through untouched.

use serde::Deserialize;

/// Top-level response from `GET /products.json`.
///
/// Items are kept as raw JSON so one malformed product cannot fail the page.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub products: Option<Vec<serde_json::Value>>,
}

/// A single product from the feed.
#[derive(Debug, Deserialize)]
pub struct FeedProduct {
    pub id: FeedScalar,

    pub title: String,

    /// URL slug for the product page, e.g. `"black-lengthening-mascara"`.
    #[serde(default)]
    pub handle: Option<String>,

    #[serde(default)]
    pub body_html: Option<String>,

    #[serde(default)]
    pub variants: Option<Vec<FeedVariant>>,

    #[serde(default)]
    pub images: Option<Vec<FeedImage>>,

    #[serde(default)]
    pub image: Option<FeedImage>,
}

#[derive(Debug, Deserialize)]
pub struct FeedVariant {
    #[serde(default)]
    pub price: Option<FeedScalar>,
}

#[derive(Debug, Deserialize)]
pub struct FeedImage {
    #[serde(default)]
    pub src: Option<String>,
}

/// A JSON value that may arrive either as a number or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeedScalar {
    Number(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for FeedScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedScalar::Number(n) => write!(f, "{n}"),
            FeedScalar::Text(s) => f.write_str(s),
        }
    }
}
