//! Product cards painted into the grid.
//!
//! Cards are built from raw documents rather than [`Product`](crate::domain::product::Product)
//! because a projected listing may omit any field.

use serde_json::Value as JsonValue;

pub const FEATURED_LABEL: &str = "★ Featured";
const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/400x260.png?text=";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub src: String,
    pub alt: String,
    /// True when no product image was available.
    pub placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub name: String,
    pub company: String,
    pub price: String,
    pub featured: String,
    pub image: CardImage,
}

impl ProductCard {
    pub fn from_document(doc: &JsonValue) -> Self {
        let name = doc
            .get("name")
            .and_then(JsonValue::as_str)
            .filter(|s| !s.is_empty());

        ProductCard {
            name: name.unwrap_or("Unnamed").to_string(),
            company: doc
                .get("company")
                .and_then(JsonValue::as_str)
                .unwrap_or_default()
                .to_string(),
            price: format_price(doc.get("price").and_then(JsonValue::as_f64)),
            featured: if doc.get("featured").and_then(JsonValue::as_bool) == Some(true) {
                FEATURED_LABEL.to_string()
            } else {
                String::new()
            },
            image: card_image(doc, name),
        }
    }
}

/// Minor units to `$x.yy`; zero or missing prices read as `Free`.
pub fn format_price(minor_units: Option<f64>) -> String {
    match minor_units {
        Some(p) if p != 0.0 => format!("${:.2}", p / 100.0),
        _ => "Free".to_string(),
    }
}

fn card_image(doc: &JsonValue, name: Option<&str>) -> CardImage {
    let first = doc
        .get("images")
        .and_then(JsonValue::as_array)
        .and_then(|images| images.first());
    let url = first
        .and_then(|img| img.get("url"))
        .and_then(JsonValue::as_str)
        .filter(|u| !u.is_empty());

    match (first, url) {
        (Some(img), Some(url)) => {
            let alt = img
                .get("alt")
                .and_then(JsonValue::as_str)
                .filter(|a| !a.is_empty())
                .or(name)
                .unwrap_or("Product image");
            CardImage {
                src: url.to_string(),
                alt: alt.to_string(),
                placeholder: false,
            }
        }
        _ => CardImage {
            src: format!(
                "{}{}",
                PLACEHOLDER_BASE,
                urlencoding::encode(name.unwrap_or("Product"))
            ),
            alt: name.unwrap_or("Product image").to_string(),
            placeholder: true,
        },
    }
}
