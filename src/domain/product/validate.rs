//! Schema validation for product bodies.
//!
//! Bodies arrive as loose JSON. Scalars are coerced where the intent is unambiguous
//! (`"1299"` -> 1299, `"true"` -> true) and every failing field contributes one message,
//! so a caller sees all problems at once.

use super::{Company, NewProduct, ProductImage, ProductPatch, DEFAULT_RATING, NAME_MAX_CHARS};
use serde_json::{Map, Value as JsonValue};

const MSG_NOT_OBJECT: &str = "Product data must be a JSON object";
const MSG_NAME_REQUIRED: &str = "Product name is required";
const MSG_NAME_TOO_LONG: &str = "Product name cannot exceed 100 characters";
const MSG_NAME_TYPE: &str = "Product name must be a string";
const MSG_PRICE_REQUIRED: &str = "Product price is required";
const MSG_PRICE_TYPE: &str = "Product price must be a number";
const MSG_FEATURED_TYPE: &str = "Featured must be a boolean";
const MSG_RATING_TYPE: &str = "Rating must be a number";
const MSG_IMAGES_TYPE: &str = "Images must be a list of image objects";
const MSG_IMAGE_URL: &str = "Image url is required";

impl NewProduct {
    /// Validates a create body. Absent optional fields take their defaults.
    pub fn from_json(body: &JsonValue) -> Result<NewProduct, Vec<String>> {
        let obj = body.as_object().ok_or_else(|| vec![MSG_NOT_OBJECT.to_string()])?;
        let mut errors = Vec::new();

        let name = collect(&mut errors, parse_name(field(obj, "name")));
        let price = collect(&mut errors, parse_price(field(obj, "price")));
        let featured = collect(&mut errors, parse_featured(field(obj, "featured")));
        let rating = collect(&mut errors, parse_rating(field(obj, "rating")));
        let company = collect(&mut errors, parse_company(field(obj, "company")));
        let images = collect(&mut errors, parse_images(field(obj, "images")));

        match (name, price, featured, rating, company, images) {
            (Some(name), Some(price), Some(featured), Some(rating), Some(company), Some(images))
                if errors.is_empty() =>
            {
                Ok(NewProduct {
                    name,
                    price,
                    featured,
                    rating,
                    company,
                    images,
                })
            }
            _ => Err(errors),
        }
    }
}

impl ProductPatch {
    /// Validates a partial update. Only keys present in the body are checked and applied;
    /// an explicit `null` is treated like the create path treats an absent value.
    pub fn from_json(body: &JsonValue) -> Result<ProductPatch, Vec<String>> {
        let obj = body.as_object().ok_or_else(|| vec![MSG_NOT_OBJECT.to_string()])?;
        let mut errors = Vec::new();
        let mut patch = ProductPatch::default();

        if obj.contains_key("name") {
            patch.name = collect(&mut errors, parse_name(field(obj, "name")));
        }
        if obj.contains_key("price") {
            patch.price = collect(&mut errors, parse_price(field(obj, "price")));
        }
        if obj.contains_key("featured") {
            patch.featured = collect(&mut errors, parse_featured(field(obj, "featured")));
        }
        if obj.contains_key("rating") {
            patch.rating = collect(&mut errors, parse_rating(field(obj, "rating")));
        }
        if obj.contains_key("company") {
            patch.company = collect(&mut errors, parse_company(field(obj, "company")));
        }
        if obj.contains_key("images") {
            patch.images = collect(&mut errors, parse_images(field(obj, "images")));
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

fn collect<T>(errors: &mut Vec<String>, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(msg) => {
            errors.push(msg);
            None
        }
    }
}

/// Absent and `null` are the same thing for validation purposes.
fn field<'a>(obj: &'a Map<String, JsonValue>, key: &str) -> Option<&'a JsonValue> {
    obj.get(key).filter(|v| !v.is_null())
}

fn parse_name(v: Option<&JsonValue>) -> Result<String, String> {
    let raw = match v {
        None => return Err(MSG_NAME_REQUIRED.to_string()),
        Some(JsonValue::String(s)) => s.clone(),
        // numbers/bools stringify, like a text column would
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Bool(b)) => b.to_string(),
        Some(_) => return Err(MSG_NAME_TYPE.to_string()),
    };
    let name = raw.trim();
    if name.is_empty() {
        return Err(MSG_NAME_REQUIRED.to_string());
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(MSG_NAME_TOO_LONG.to_string());
    }
    Ok(name.to_string())
}

fn parse_price(v: Option<&JsonValue>) -> Result<i64, String> {
    match v {
        None => Err(MSG_PRICE_REQUIRED.to_string()),
        Some(JsonValue::Number(n)) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
                _ => Err(MSG_PRICE_TYPE.to_string()),
            }
        }
        Some(JsonValue::String(s)) if s.trim().is_empty() => Err(MSG_PRICE_REQUIRED.to_string()),
        Some(JsonValue::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| MSG_PRICE_TYPE.to_string()),
        Some(_) => Err(MSG_PRICE_TYPE.to_string()),
    }
}

fn parse_featured(v: Option<&JsonValue>) -> Result<bool, String> {
    match v {
        None => Ok(false),
        Some(JsonValue::Bool(b)) => Ok(*b),
        Some(JsonValue::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(MSG_FEATURED_TYPE.to_string()),
        },
        Some(_) => Err(MSG_FEATURED_TYPE.to_string()),
    }
}

fn parse_rating(v: Option<&JsonValue>) -> Result<f64, String> {
    match v {
        None => Ok(DEFAULT_RATING),
        Some(JsonValue::Number(n)) => n.as_f64().ok_or_else(|| MSG_RATING_TYPE.to_string()),
        Some(JsonValue::String(s)) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(MSG_RATING_TYPE.to_string()),
        },
        Some(_) => Err(MSG_RATING_TYPE.to_string()),
    }
}

fn parse_company(v: Option<&JsonValue>) -> Result<Option<Company>, String> {
    match v {
        None => Ok(None),
        Some(JsonValue::String(s)) => Company::from_name(s)
            .map(Some)
            .ok_or_else(|| format!("{} is not supported", s)),
        Some(other) => Err(format!("{} is not supported", other)),
    }
}

fn parse_images(v: Option<&JsonValue>) -> Result<Vec<ProductImage>, String> {
    let items = match v {
        None => return Ok(Vec::new()),
        Some(JsonValue::Array(items)) => items,
        Some(_) => return Err(MSG_IMAGES_TYPE.to_string()),
    };

    let mut images = Vec::with_capacity(items.len());
    for item in items {
        let obj = item.as_object().ok_or_else(|| MSG_IMAGES_TYPE.to_string())?;
        let url = match field(obj, "url").and_then(JsonValue::as_str) {
            Some(u) if !u.trim().is_empty() => u.to_string(),
            _ => return Err(MSG_IMAGE_URL.to_string()),
        };
        let filename = field(obj, "filename")
            .and_then(JsonValue::as_str)
            .map(str::to_string);
        let alt = field(obj, "alt")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .to_string();
        images.push(ProductImage { url, filename, alt });
    }
    Ok(images)
}
