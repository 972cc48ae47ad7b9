use serde_json::json;

use super::*;

fn feed_product(value: serde_json::Value) -> FeedProduct {
    serde_json::from_value(value).expect("valid feed product fixture")
}

fn mascara() -> serde_json::Value {
    json!({
        "id": 123_456_789,
        "title": "Black Lengthening Mascara",
        "handle": "black-lengthening-mascara",
        "body_html": "<p>Long lashes.</p>",
        "variants": [
            {"id": 1, "price": "12.00"},
            {"id": 2, "price": "18.00"}
        ],
        "images": [
            {"src": "https://cdn.example.com/mascara-1.jpg"},
            {"src": "https://cdn.example.com/mascara-2.jpg"}
        ]
    })
}

#[test]
fn sets_identifier_from_numeric_id() {
    let product = normalize_feed_product(feed_product(mascara()), "https://colourpop.com");
    assert_eq!(product.id, "123456789");
    assert_eq!(product.title, "Black Lengthening Mascara");
}

#[test]
fn builds_url_from_handle() {
    let product = normalize_feed_product(feed_product(mascara()), "https://colourpop.com");
    assert_eq!(
        product.url.as_deref(),
        Some("https://colourpop.com/products/black-lengthening-mascara")
    );
}

#[test]
fn strips_trailing_slash_from_site_url() {
    let product = normalize_feed_product(feed_product(mascara()), "https://colourpop.com/");
    assert_eq!(
        product.url.as_deref(),
        Some("https://colourpop.com/products/black-lengthening-mascara")
    );
}

#[test]
fn price_comes_from_first_variant() {
    let product = normalize_feed_product(feed_product(mascara()), "https://colourpop.com");
    assert_eq!(product.price.as_deref(), Some("12.00"));
}

#[test]
fn missing_variants_means_no_price() {
    let mut value = mascara();
    value.as_object_mut().unwrap().remove("variants");
    let product = normalize_feed_product(feed_product(value), "https://colourpop.com");
    assert!(product.price.is_none());
}

#[test]
fn empty_variants_means_no_price() {
    let mut value = mascara();
    value["variants"] = json!([]);
    let product = normalize_feed_product(feed_product(value), "https://colourpop.com");
    assert!(product.price.is_none());
}

#[test]
fn image_is_first_gallery_entry() {
    let product = normalize_feed_product(feed_product(mascara()), "https://colourpop.com");
    assert_eq!(
        product.image.as_deref(),
        Some("https://cdn.example.com/mascara-1.jpg")
    );
}

#[test]
fn image_falls_back_to_primary_image() {
    let mut value = mascara();
    value["images"] = json!([]);
    value["image"] = json!({"src": "https://cdn.example.com/primary.jpg"});
    let product = normalize_feed_product(feed_product(value), "https://colourpop.com");
    assert_eq!(
        product.image.as_deref(),
        Some("https://cdn.example.com/primary.jpg")
    );
}

#[test]
fn no_images_means_no_image() {
    let mut value = mascara();
    value.as_object_mut().unwrap().remove("images");
    let product = normalize_feed_product(feed_product(value), "https://colourpop.com");
    assert!(product.image.is_none());
}

#[test]
fn missing_handle_means_no_url() {
    let mut value = mascara();
    value["handle"] = json!(null);
    let product = normalize_feed_product(feed_product(value), "https://colourpop.com");
    assert!(product.url.is_none());
}

#[test]
fn description_is_raw_body_html() {
    let product = normalize_feed_product(feed_product(mascara()), "https://colourpop.com");
    assert_eq!(product.description.as_deref(), Some("<p>Long lashes.</p>"));
}
