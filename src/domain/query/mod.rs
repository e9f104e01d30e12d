//! Store-agnostic description of a catalog query.
//!
//! [`QueryParams`] is what arrives on the wire; [`build_query`] turns it into a
//! [`ProductQuery`] that each store translates into its own terms.

use crate::domain::product::Product;
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;

pub mod builder;
pub mod params;

pub use builder::{build_query, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use params::QueryParams;

/// Product fields addressable by `sort` and `fields`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Id,
    Name,
    Price,
    Featured,
    Rating,
    Company,
    Images,
    CreatedAt,
    UpdatedAt,
}

impl ProductField {
    /// Accepts the wire (camelCase) names plus `_id`.
    pub fn parse(name: &str) -> Option<ProductField> {
        let field = match name {
            "id" | "_id" => ProductField::Id,
            "name" => ProductField::Name,
            "price" => ProductField::Price,
            "featured" => ProductField::Featured,
            "rating" => ProductField::Rating,
            "company" => ProductField::Company,
            "images" => ProductField::Images,
            "createdAt" => ProductField::CreatedAt,
            "updatedAt" => ProductField::UpdatedAt,
            _ => return None,
        };
        Some(field)
    }

    /// Key used in the serialized product document.
    pub fn json_key(&self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Price => "price",
            ProductField::Featured => "featured",
            ProductField::Rating => "rating",
            ProductField::Company => "company",
            ProductField::Images => "images",
            ProductField::CreatedAt => "createdAt",
            ProductField::UpdatedAt => "updatedAt",
        }
    }

    pub fn is_sortable(&self) -> bool {
        !matches!(self, ProductField::Images)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: ProductField,
    pub direction: SortDirection,
}

/// Ordered list of sort keys; earlier keys take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec(pub Vec<SortKey>);

impl SortSpec {
    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    /// In-memory ordering. A missing company sorts before any present one.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        for key in &self.0 {
            let ord = match key.field {
                ProductField::Id => a.id.cmp(&b.id),
                ProductField::Name => a.name.cmp(&b.name),
                ProductField::Price => a.price.cmp(&b.price),
                ProductField::Featured => a.featured.cmp(&b.featured),
                ProductField::Rating => a.rating.total_cmp(&b.rating),
                ProductField::Company => a
                    .company
                    .map(|c| c.as_str())
                    .cmp(&b.company.map(|c| c.as_str())),
                ProductField::CreatedAt => a.created_at.cmp(&b.created_at),
                ProductField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                ProductField::Images => Ordering::Equal,
            };
            let ord = match key.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

/// Filter predicate. Every `Some` constraint must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Exact company value; may name a company outside the enumeration (matches nothing).
    pub company: Option<String>,
    pub featured: Option<bool>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.company.is_none() && self.featured.is_none()
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(needle) = &self.name {
            if !product.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        if let Some(company) = &self.company {
            if product.company.map(|c| c.as_str()) != Some(company.as_str()) {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if product.featured != featured {
                return false;
            }
        }
        true
    }
}

/// Which fields of each record are returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    All,
    /// Listed fields plus `id`.
    Include(Vec<ProductField>),
    Exclude(Vec<ProductField>),
}

impl Projection {
    pub fn includes(&self, field: ProductField) -> bool {
        match self {
            Projection::All => true,
            Projection::Include(fields) => field == ProductField::Id || fields.contains(&field),
            Projection::Exclude(fields) => !fields.contains(&field),
        }
    }

    /// Serializes `product` keeping only the projected keys.
    pub fn apply(&self, product: &Product) -> Map<String, JsonValue> {
        let mut doc = match serde_json::to_value(product) {
            Ok(JsonValue::Object(map)) => map,
            _ => Map::new(),
        };
        if *self != Projection::All {
            doc.retain(|key, _| {
                ProductField::parse(key).map_or(false, |field| self.includes(field))
            });
        }
        doc
    }
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// 1-based page the window was derived from.
    pub page: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub filter: ProductFilter,
    pub sort: SortSpec,
    pub projection: Projection,
    pub window: Window,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::{Company, NewProduct, ProductId};
    use chrono::Utc;

    fn product(name: &str, company: Option<Company>, featured: bool) -> Product {
        NewProduct {
            name: name.to_string(),
            price: 100,
            featured,
            rating: 4.5,
            company,
            images: vec![],
        }
        .into_product(ProductId::generate(), Utc::now())
    }

    #[test]
    fn test_filter_matches_all_constraints() {
        let filter = ProductFilter {
            name: Some("ABC".to_string()),
            company: Some("ikea".to_string()),
            featured: Some(true),
        };
        assert!(filter.matches(&product("xxabcxx", Some(Company::Ikea), true)));
        assert!(!filter.matches(&product("xxabcxx", Some(Company::Ikea), false)));
        assert!(!filter.matches(&product("xxabcxx", Some(Company::Liddy), true)));
        assert!(!filter.matches(&product("xxabxx", Some(Company::Ikea), true)));
        assert!(!filter.matches(&product("abc", None, true)));
    }

    #[test]
    fn test_missing_company_sorts_first_ascending() {
        let sort = SortSpec(vec![SortKey {
            field: ProductField::Company,
            direction: SortDirection::Asc,
        }]);
        let none = product("a", None, false);
        let ikea = product("b", Some(Company::Ikea), false);
        assert_eq!(sort.compare(&none, &ikea), Ordering::Less);

        let desc = SortSpec(vec![SortKey {
            field: ProductField::Company,
            direction: SortDirection::Desc,
        }]);
        assert_eq!(desc.compare(&none, &ikea), Ordering::Greater);
    }

    #[test]
    fn test_projection_keeps_id() {
        let p = product("lamp", Some(Company::Marcos), false);
        let doc = Projection::Include(vec![ProductField::Name]).apply(&p);
        let mut keys: Vec<&str> = doc.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["id", "name"]);

        let doc = Projection::Exclude(vec![ProductField::Images, ProductField::Rating]).apply(&p);
        assert!(doc.contains_key("name"));
        assert!(!doc.contains_key("images"));
        assert!(!doc.contains_key("rating"));
    }
}
