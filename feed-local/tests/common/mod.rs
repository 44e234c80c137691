#![allow(dead_code)]

use feed_core::models::ProductDraft;
use serde_json::json;

pub fn draft(id: &str, title: &str) -> ProductDraft {
    ProductDraft(json!({
        "id": id,
        "title": title,
        "description": format!("{title} description"),
        "price": { "value": 9.99, "currency": "USD" },
        "availability": "in_stock",
        "link": format!("https://shop.example/products/{id}"),
        "image_link": format!("https://shop.example/images/{id}.png"),
    }))
}

pub fn ids(products: &[feed_core::models::Product]) -> Vec<&str> {
    products.iter().map(|product| product.id.as_str()).collect()
}
