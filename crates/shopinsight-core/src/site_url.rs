//! Canonical site identity for storefronts.
//!
//! Two extraction requests refer to the "same site" when their canonical URLs
//! are equal. The canonical form is the lowercased `scheme://host[:port]`
//! origin with no path, query, fragment, or trailing slash, so
//! `https://Shop.Example.com/products/mascara?x=1` and `https://shop.example.com/`
//! collapse to `https://shop.example.com`.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteUrlError {
    #[error("invalid site URL \"{url}\": {reason}")]
    Malformed { url: String, reason: String },

    #[error("unsupported scheme \"{scheme}\" in site URL \"{url}\"")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("site URL \"{url}\" has no host")]
    MissingHost { url: String },
}

/// Normalizes `website_url` into its canonical site URL.
///
/// # Errors
///
/// Returns [`SiteUrlError`] if the input does not parse as an absolute
/// `http`/`https` URL with a host.
pub fn canonical_site_url(website_url: &str) -> Result<String, SiteUrlError> {
    let trimmed = website_url.trim();
    let parsed = Url::parse(trimmed).map_err(|e| SiteUrlError::Malformed {
        url: trimmed.to_owned(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(SiteUrlError::UnsupportedScheme {
                url: trimmed.to_owned(),
                scheme: other.to_owned(),
            })
        }
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(SiteUrlError::MissingHost {
            url: trimmed.to_owned(),
        });
    }

    // `Url` already lowercases scheme and host and drops default ports.
    Ok(parsed.origin().ascii_serialization())
}
