use std::fmt::Write as _;

use super::*;

fn base() -> Url {
    Url::parse("https://shop.example.com").unwrap()
}

fn signals(body: &str) -> PageSignals {
    let html = format!("<html><head><title>Example | Shop</title></head><body>{body}</body></html>");
    extract_page_signals(&html, &base())
}

// ---------------------------------------------------------------------------
// brand name
// ---------------------------------------------------------------------------

#[test]
fn brand_name_before_pipe() {
    assert_eq!(
        brand_name_from_title("Foo Bar | Official Site").as_deref(),
        Some("Foo Bar")
    );
}

#[test]
fn brand_name_without_pipe_is_whole_title() {
    assert_eq!(
        brand_name_from_title("Plain Title").as_deref(),
        Some("Plain Title")
    );
}

#[test]
fn brand_name_splits_on_first_pipe_only() {
    assert_eq!(brand_name_from_title(" A | B | C ").as_deref(), Some("A"));
}

#[test]
fn brand_name_blank_title_is_absent() {
    assert!(brand_name_from_title("   ").is_none());
    assert!(brand_name_from_title("| Official Site").is_none());
}

#[test]
fn brand_name_from_document_title() {
    let html = "<html><head><title>\n  Foo Bar | Official Site\n</title></head><body></body></html>";
    let extracted = extract_page_signals(html, &base());
    assert_eq!(extracted.brand_name.as_deref(), Some("Foo Bar"));
}

#[test]
fn no_title_means_no_brand_name() {
    let extracted = extract_page_signals("<html><body><p>hi</p></body></html>", &base());
    assert!(extracted.brand_name.is_none());
}

// ---------------------------------------------------------------------------
// important links
// ---------------------------------------------------------------------------

#[test]
fn important_links_match_keywords_case_insensitively() {
    let extracted = signals(
        r#"<a href="/pages/contact">Contact Us</a>
           <a href="/blogs/news">BLOG</a>
           <a href="/apps/track">Track your order</a>
           <a href="/pages/faq">FAQs</a>
           <a href="/collections/all">Shop all</a>"#,
    );
    assert_eq!(
        extracted.important_links,
        vec![
            "https://shop.example.com/pages/contact",
            "https://shop.example.com/blogs/news",
            "https://shop.example.com/apps/track",
            "https://shop.example.com/pages/faq",
        ]
    );
}

#[test]
fn important_links_keep_absolute_hrefs() {
    let extracted = signals(r#"<a href="https://help.example.org/faq">Help &amp; FAQ</a>"#);
    assert_eq!(
        extracted.important_links,
        vec!["https://help.example.org/faq"]
    );
}

#[test]
fn important_links_match_on_text_not_href() {
    let extracted = signals(r#"<a href="/pages/contact">Reach us</a>"#);
    assert!(extracted.important_links.is_empty());
}

// ---------------------------------------------------------------------------
// social and contact references
// ---------------------------------------------------------------------------

#[test]
fn social_references_keep_raw_href() {
    let extracted = signals(
        r#"<a href="https://www.instagram.com/example">IG</a>
           <a href="/social/fb">Facebook</a>
           <a href="https://example.com/about">About</a>"#,
    );
    assert_eq!(
        extracted.social_handles,
        vec!["https://www.instagram.com/example", "/social/fb"]
    );
}

#[test]
fn contact_references_require_scheme_prefix() {
    let extracted = signals(
        r#"<a href="mailto:hello@example.com">Email</a>
           <a href="TEL:+15551234">Call</a>
           <a href="/pages/mailto-info">Info</a>"#,
    );
    assert_eq!(
        extracted.contact_details,
        vec!["mailto:hello@example.com", "TEL:+15551234"]
    );
}

#[test]
fn repeated_anchors_do_not_duplicate_set_values() {
    let extracted = signals(
        r#"<header>
             <a href="https://instagram.com/example">Instagram</a>
             <a href="mailto:hi@example.com">Contact</a>
           </header>
           <footer>
             <a href="https://instagram.com/example">Instagram</a>
             <a href="mailto:hi@example.com">Contact</a>
             <a href="mailto:hi@example.com">Contact</a>
           </footer>"#,
    );
    assert_eq!(extracted.social_handles, vec!["https://instagram.com/example"]);
    assert_eq!(extracted.contact_details, vec!["mailto:hi@example.com"]);
    assert_eq!(extracted.important_links, vec!["mailto:hi@example.com"]);
}

#[test]
fn anchors_without_href_are_ignored() {
    let extracted = signals(r#"<a name="contact">Contact</a>"#);
    assert!(extracted.important_links.is_empty());
}

// ---------------------------------------------------------------------------
// about and FAQ
// ---------------------------------------------------------------------------

#[test]
fn about_is_first_matching_text_node() {
    let extracted = signals(
        "<p>Free shipping</p><p>  About our brand  </p><p>More about us</p>",
    );
    assert_eq!(extracted.about_brand.as_deref(), Some("About our brand"));
}

#[test]
fn about_absent_when_no_text_matches() {
    let extracted = signals("<p>Nothing to see</p>");
    assert!(extracted.about_brand.is_none());
}

#[test]
fn about_ignores_script_contents() {
    let extracted = signals(r#"<script>window.about = {};</script><p>About us</p>"#);
    assert_eq!(extracted.about_brand.as_deref(), Some("About us"));
}

#[test]
fn faq_produces_at_most_one_placeholder_entry() {
    let extracted = signals("<p>Read our FAQ</p><p>Another faq mention</p>");
    assert_eq!(
        extracted.faq,
        vec![FaqEntry::placeholder("Read our FAQ")]
    );
    assert_eq!(extracted.faq[0].answer, "See website for details");
}

#[test]
fn faq_absent_without_mention() {
    let extracted = signals("<p>Questions?</p>");
    assert!(extracted.faq.is_empty());
}

// ---------------------------------------------------------------------------
// hero products
// ---------------------------------------------------------------------------

#[test]
fn hero_scan_caps_at_nine_in_document_order() {
    let mut body = String::new();
    for i in 0..20 {
        let _ = write!(body, r#"<a href="/products/item-{i}">Item {i}</a>"#);
    }
    let extracted = signals(&body);
    assert_eq!(extracted.hero_products.len(), 9);
    for (i, hero) in extracted.hero_products.iter().enumerate() {
        assert_eq!(hero.id, format!("item-{i}"));
        assert_eq!(hero.title, format!("Item {i}"));
        assert_eq!(
            hero.url.as_deref(),
            Some(format!("https://shop.example.com/products/item-{i}").as_str())
        );
    }
}

#[test]
fn hero_keeps_absolute_product_urls() {
    let extracted = signals(
        r#"<a href="https://cdn.shop.example.com/products/lip-kit">Lip Kit</a>"#,
    );
    assert_eq!(extracted.hero_products.len(), 1);
    assert_eq!(extracted.hero_products[0].id, "lip-kit");
    assert_eq!(
        extracted.hero_products[0].url.as_deref(),
        Some("https://cdn.shop.example.com/products/lip-kit")
    );
}

#[test]
fn hero_scan_ignores_other_anchors() {
    let extracted = signals(
        r#"<a href="/collections/new">New</a><a href="/products/gloss">Gloss</a>"#,
    );
    let ids: Vec<_> = extracted.hero_products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["gloss"]);
}

#[test]
fn hero_products_carry_no_price_or_image() {
    let extracted = signals(r#"<a href="/products/gloss">Gloss</a>"#);
    let hero = &extracted.hero_products[0];
    assert!(hero.price.is_none());
    assert!(hero.image.is_none());
    assert!(hero.description.is_none());
}

// ---------------------------------------------------------------------------
// predicates
// ---------------------------------------------------------------------------

#[test]
fn product_id_is_last_path_segment() {
    assert_eq!(
        product_id_from_href("/collections/x/products/glow-serum").as_deref(),
        Some("glow-serum")
    );
    assert_eq!(
        product_id_from_href("/products/glow-serum/").as_deref(),
        Some("glow-serum")
    );
    assert!(product_id_from_href("/products/").is_none());
}

#[test]
fn social_predicate_checks_href_and_text() {
    assert!(is_social_reference("https://tiktok.com/@x", ""));
    assert!(is_social_reference("/s/1", "follow us on twitter"));
    assert!(!is_social_reference("/pages/about", "about"));
}

#[test]
fn contact_predicate() {
    assert!(is_contact_href("mailto:a@b.c"));
    assert!(is_contact_href("tel:123"));
    assert!(!is_contact_href("https://example.com/mailto:"));
}

#[test]
fn important_link_predicate() {
    assert!(is_important_link_text("track order"));
    assert!(is_important_link_text("our blog"));
    assert!(!is_important_link_text("shop"));
}

#[test]
fn resolve_href_variants() {
    let base = base();
    assert_eq!(
        resolve_href(&base, "/pages/faq"),
        "https://shop.example.com/pages/faq"
    );
    assert_eq!(
        resolve_href(&base, "pages/faq"),
        "https://shop.example.com/pages/faq"
    );
    assert_eq!(
        resolve_href(&base, "//cdn.example.com/a"),
        "https://cdn.example.com/a"
    );
    assert_eq!(
        resolve_href(&base, "https://other.example.com/blog"),
        "https://other.example.com/blog"
    );
}
