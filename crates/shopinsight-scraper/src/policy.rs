//! Policy documents looked up at conventional storefront paths.

use scraper::Html;
use shopinsight_core::store::POLICY_TEXT_MAX_CHARS;
use shopinsight_core::PolicyKind;

use crate::dom::{walk, Visit};
use crate::fetch::Fetcher;

/// Candidate paths for `kind`, in lookup order.
#[must_use]
pub fn policy_paths(kind: PolicyKind) -> [String; 3] {
    let slug = kind.slug();
    [
        format!("/pages/{slug}"),
        format!("/policies/{slug}-policy"),
        format!("/{slug}-policy"),
    ]
}

/// Returns the text of the first candidate page that answers 200 with
/// non-empty text, or `None` when every candidate misses.
pub async fn fetch_policy(fetcher: &Fetcher, site_url: &str, kind: PolicyKind) -> Option<String> {
    let base = site_url.trim_end_matches('/');
    for path in policy_paths(kind) {
        let url = format!("{base}{path}");
        let page = fetcher.fetch(&url).await;
        if !page.has_status(200) {
            tracing::debug!(url = %url, status = ?page.status, policy = %kind, "policy candidate missed");
            continue;
        }
        if let Some(text) = policy_text(&page.body) {
            tracing::debug!(url = %url, policy = %kind, chars = text.chars().count(), "policy found");
            return Some(text);
        }
    }
    tracing::info!(site_url, policy = %kind, "no policy page found");
    None
}

/// Visible text of an HTML document, one trimmed text node per line,
/// truncated to the policy length limit. `None` when the page has no text.
#[must_use]
pub fn policy_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let mut lines: Vec<&str> = Vec::new();
    walk(&document, |visit| {
        if let Visit::Text(text) = visit {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed);
            }
        }
    });

    if lines.is_empty() {
        return None;
    }
    Some(lines.join("\n").chars().take(POLICY_TEXT_MAX_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_paths_in_lookup_order() {
        assert_eq!(
            policy_paths(PolicyKind::Privacy),
            [
                "/pages/privacy".to_string(),
                "/policies/privacy-policy".to_string(),
                "/privacy-policy".to_string(),
            ]
        );
        assert_eq!(policy_paths(PolicyKind::Refund)[1], "/policies/refund-policy");
    }

    #[test]
    fn policy_text_strips_markup() {
        let html = "<html><head><title>Refunds</title><style>p{}</style></head>\
                    <body><h1>Refund policy</h1><p>Within <b>30</b> days.</p></body></html>";
        assert_eq!(
            policy_text(html).as_deref(),
            Some("Refunds\nRefund policy\nWithin\n30\ndays.")
        );
    }

    #[test]
    fn policy_text_truncates_to_limit() {
        let text = policy_text(&"X".repeat(3000)).expect("text");
        assert_eq!(text, "X".repeat(2000));
    }

    #[test]
    fn policy_text_empty_document_is_none() {
        assert!(policy_text("<html><body>   </body></html>").is_none());
        assert!(policy_text("").is_none());
    }
}
