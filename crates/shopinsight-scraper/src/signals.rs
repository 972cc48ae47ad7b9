//! Homepage heuristics: brand name, hero products, links, socials, contacts,
//! the "about" snippet, and the synthetic FAQ entry.
//!
//! Everything is derived in one traversal of the parsed document. Each anchor
//! and text node is offered to a set of independent predicates; nothing here
//! can fail, a missing signal is simply absent.

use reqwest::Url;
use scraper::Html;
use shopinsight_core::{dedupe_values, FaqEntry, Product};

use crate::dom::{element_text, walk, Visit};

/// Anchor text keywords that mark a navigation link worth keeping.
const IMPORTANT_LINK_KEYWORDS: [&str; 4] = ["track", "contact", "blog", "faq"];

/// Platform keywords matched against anchor hrefs and text.
const SOCIAL_KEYWORDS: [&str; 5] = ["instagram", "facebook", "tiktok", "twitter", "linkedin"];

const CONTACT_SCHEMES: [&str; 2] = ["mailto:", "tel:"];

const PRODUCT_PATH_MARKER: &str = "/products/";

/// The hero scan stops once more than this many products are collected.
const HERO_SCAN_LIMIT: usize = 8;

/// Signals derived from a storefront homepage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSignals {
    pub brand_name: Option<String>,
    pub hero_products: Vec<Product>,
    pub important_links: Vec<String>,
    pub social_handles: Vec<String>,
    pub contact_details: Vec<String>,
    pub about_brand: Option<String>,
    pub faq: Vec<FaqEntry>,
}

/// Parses `html` and extracts every homepage signal, resolving relative
/// links against `base`.
#[must_use]
pub fn extract_page_signals(html: &str, base: &Url) -> PageSignals {
    let document = Html::parse_document(html);
    let mut signals = PageSignals::default();
    let mut saw_title = false;

    walk(&document, |visit| match visit {
        Visit::Element(element) => match element.value().name() {
            "title" if !saw_title => {
                saw_title = true;
                signals.brand_name = brand_name_from_title(&element.text().collect::<String>());
            }
            "a" => {
                if let Some(href) = element.value().attr("href") {
                    let text = element_text(element);
                    offer_anchor(&mut signals, href, &text, base);
                }
            }
            _ => {}
        },
        Visit::Text(text) => offer_text(&mut signals, text),
    });

    signals.important_links = dedupe_values(signals.important_links);
    signals.social_handles = dedupe_values(signals.social_handles);
    signals.contact_details = dedupe_values(signals.contact_details);
    signals
}

fn offer_anchor(signals: &mut PageSignals, href: &str, text: &str, base: &Url) {
    let href = href.trim();
    let text_lower = text.to_lowercase();

    if is_important_link_text(&text_lower) {
        signals.important_links.push(resolve_href(base, href));
    }
    if is_social_reference(href, &text_lower) {
        signals.social_handles.push(href.to_owned());
    }
    if is_contact_href(href) {
        signals.contact_details.push(href.to_owned());
    }
    if signals.hero_products.len() <= HERO_SCAN_LIMIT && is_product_href(href) {
        if let Some(id) = product_id_from_href(href) {
            signals.hero_products.push(Product {
                id,
                title: text.to_owned(),
                url: Some(resolve_href(base, href)),
                price: None,
                image: None,
                description: None,
            });
        }
    }
}

fn offer_text(signals: &mut PageSignals, text: &str) {
    if signals.about_brand.is_none() && mentions_about(text) {
        signals.about_brand = Some(text.trim().to_owned());
    }
    if signals.faq.is_empty() && mentions_faq(text) {
        signals.faq.push(FaqEntry::placeholder(text.trim()));
    }
}

/// Brand name from a `<title>`: the part before the first `|`, trimmed.
pub(crate) fn brand_name_from_title(title: &str) -> Option<String> {
    let name = title.split('|').next().unwrap_or(title).trim();
    (!name.is_empty()).then(|| name.to_owned())
}

pub(crate) fn is_important_link_text(text_lower: &str) -> bool {
    IMPORTANT_LINK_KEYWORDS
        .iter()
        .any(|keyword| text_lower.contains(keyword))
}

pub(crate) fn is_social_reference(href: &str, text_lower: &str) -> bool {
    let href_lower = href.to_lowercase();
    SOCIAL_KEYWORDS
        .iter()
        .any(|keyword| href_lower.contains(keyword) || text_lower.contains(keyword))
}

pub(crate) fn is_contact_href(href: &str) -> bool {
    let href_lower = href.to_lowercase();
    CONTACT_SCHEMES
        .iter()
        .any(|scheme| href_lower.starts_with(scheme))
}

pub(crate) fn is_product_href(href: &str) -> bool {
    href.contains(PRODUCT_PATH_MARKER)
}

pub(crate) fn mentions_about(text: &str) -> bool {
    text.to_lowercase().contains("about")
}

pub(crate) fn mentions_faq(text: &str) -> bool {
    text.to_lowercase().contains("faq")
}

/// Last path segment of a product href, ignoring trailing slashes.
pub(crate) fn product_id_from_href(href: &str) -> Option<String> {
    let (_, tail) = href.rsplit_once(PRODUCT_PATH_MARKER)?;
    tail.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
}

/// Resolves a relative href against `base`; absolute hrefs are returned as-is.
pub(crate) fn resolve_href(base: &Url, href: &str) -> String {
    match Url::parse(href) {
        Ok(_) => href.to_owned(),
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(href)
            .map_or_else(|_| href.to_owned(), |resolved| resolved.to_string()),
        Err(e) => {
            tracing::debug!(href, error = %e, "keeping unparseable href as-is");
            href.to_owned()
        }
    }
}

#[cfg(test)]
#[path = "signals_test.rs"]
mod tests;
