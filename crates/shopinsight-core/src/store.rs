//! The per-site extraction result and its parts.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of a stored policy text.
pub const POLICY_TEXT_MAX_CHARS: usize = 2000;

/// Fixed answer paired with the single synthetic FAQ entry.
pub const FAQ_PLACEHOLDER_ANSWER: &str = "See website for details";

/// A product from the storefront catalog or the homepage hero section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Storefront product ID (numeric feed ID or the URL slug for hero products).
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    /// Price exactly as the storefront renders it, e.g. `"12.99"`. Never parsed:
    /// currency and formatting vary per store.
    pub price: Option<String>,
    pub image: Option<String>,
    /// Raw `body_html`; may contain markup.
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl FaqEntry {
    /// Builds the synthetic entry produced by the homepage FAQ heuristic.
    #[must_use]
    pub fn placeholder(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: FAQ_PLACEHOLDER_ANSWER.to_string(),
        }
    }
}

/// The three policy documents looked up on every storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Privacy,
    Return,
    Refund,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Privacy, PolicyKind::Return, PolicyKind::Refund];

    /// Path slug used in the conventional policy URLs.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            PolicyKind::Privacy => "privacy",
            PolicyKind::Return => "return",
            PolicyKind::Refund => "refund",
        }
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Structured brand intelligence for one storefront.
///
/// Built fresh per extraction request and handed once to the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRecord {
    pub brand_name: Option<String>,
    /// Canonical site URL; the identity used for "same site" comparisons.
    pub website_url: String,
    pub product_catalog: Vec<Product>,
    pub hero_products: Vec<Product>,
    pub privacy_policy: Option<String>,
    pub return_policy: Option<String>,
    pub refund_policy: Option<String>,
    pub faq: Vec<FaqEntry>,
    pub social_handles: Vec<String>,
    pub contact_details: Vec<String>,
    pub about_brand: Option<String>,
    pub important_links: Vec<String>,
    pub success: bool,
}

impl StoreRecord {
    /// An empty, not-yet-successful record for `website_url`.
    #[must_use]
    pub fn new(website_url: impl Into<String>) -> Self {
        Self {
            brand_name: None,
            website_url: website_url.into(),
            product_catalog: Vec::new(),
            hero_products: Vec::new(),
            privacy_policy: None,
            return_policy: None,
            refund_policy: None,
            faq: Vec::new(),
            social_handles: Vec::new(),
            contact_details: Vec::new(),
            about_brand: None,
            important_links: Vec::new(),
            success: false,
        }
    }

    #[must_use]
    pub fn policy(&self, kind: PolicyKind) -> Option<&str> {
        match kind {
            PolicyKind::Privacy => self.privacy_policy.as_deref(),
            PolicyKind::Return => self.return_policy.as_deref(),
            PolicyKind::Refund => self.refund_policy.as_deref(),
        }
    }

    /// Stores a policy text, truncated to [`POLICY_TEXT_MAX_CHARS`].
    pub fn set_policy(&mut self, kind: PolicyKind, text: Option<String>) {
        let text = text.map(|t| truncate_chars(t, POLICY_TEXT_MAX_CHARS));
        match kind {
            PolicyKind::Privacy => self.privacy_policy = text,
            PolicyKind::Return => self.return_policy = text,
            PolicyKind::Refund => self.refund_policy = text,
        }
    }

    /// Re-applies the collection invariants: unique product IDs, unique
    /// set values, bounded policy length.
    pub fn normalize(&mut self) {
        self.product_catalog = dedupe_by_id(std::mem::take(&mut self.product_catalog));
        self.hero_products = dedupe_by_id(std::mem::take(&mut self.hero_products));
        self.faq = dedupe_values(std::mem::take(&mut self.faq));
        self.social_handles = dedupe_values(std::mem::take(&mut self.social_handles));
        self.contact_details = dedupe_values(std::mem::take(&mut self.contact_details));
        self.important_links = dedupe_values(std::mem::take(&mut self.important_links));
        for kind in PolicyKind::ALL {
            let current = self.policy(kind).map(str::to_owned);
            self.set_policy(kind, current);
        }
    }
}

/// Deduplicates products by ID with last-write-wins: each ID keeps the slot of
/// its first occurrence and the fields of its last.
#[must_use]
pub fn dedupe_by_id(products: Vec<Product>) -> Vec<Product> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(products.len());
    let mut out: Vec<Product> = Vec::with_capacity(products.len());
    for product in products {
        if let Some(&idx) = slots.get(&product.id) {
            out[idx] = product;
        } else {
            slots.insert(product.id.clone(), out.len());
            out.push(product);
        }
    }
    out
}

/// Drops repeated values, keeping first-seen order.
#[must_use]
pub fn dedupe_values<T>(values: Vec<T>) -> Vec<T>
where
    T: Eq + std::hash::Hash + Clone,
{
    let mut seen: HashSet<T> = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text,
    }
}
