//! Product records as stored in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod id;
pub mod validate;

pub use id::ProductId;

/// Upper bound on product name length (in characters).
pub const NAME_MAX_CHARS: usize = 100;

/// Rating assigned when a body does not carry one.
pub const DEFAULT_RATING: f64 = 4.5;

/// The fixed set of companies a product may belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Company {
    Ikea,
    Liddy,
    Caressa,
    Marcos,
}

impl Company {
    pub const ALL: [Company; 4] = [
        Company::Ikea,
        Company::Liddy,
        Company::Caressa,
        Company::Marcos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Company::Ikea => "ikea",
            Company::Liddy => "liddy",
            Company::Caressa => "caressa",
            Company::Marcos => "marcos",
        }
    }

    /// Exact (case-sensitive) lookup, mirroring how the enumeration is enforced on write.
    pub fn from_name(name: &str) -> Option<Company> {
        Company::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductImage {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default)]
    pub alt: String,
}

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[schema(value_type = String, example = "65a1f0c2e4b0a1b2c3d4e5f6")]
    pub id: ProductId,
    pub name: String,
    /// Price in minor currency units (cents).
    pub price: i64,
    pub featured: bool,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated product body, before the store assigns identity and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub featured: bool,
    pub rating: f64,
    pub company: Option<Company>,
    pub images: Vec<ProductImage>,
}

impl NewProduct {
    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            featured: self.featured,
            rating: self.rating,
            company: self.company,
            images: self.images,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub featured: Option<bool>,
    pub rating: Option<f64>,
    /// `Some(None)` clears the company.
    pub company: Option<Option<Company>>,
    pub images: Option<Vec<ProductImage>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.featured.is_none()
            && self.rating.is_none()
            && self.company.is_none()
            && self.images.is_none()
    }

    /// Overwrites the provided fields and bumps `updated_at`.
    pub fn apply(&self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
        if let Some(rating) = self.rating {
            product.rating = rating;
        }
        if let Some(company) = self.company {
            product.company = company;
        }
        if let Some(images) = &self.images {
            product.images = images.clone();
        }
        product.updated_at = now;
    }
}
