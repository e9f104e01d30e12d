//! Product store backed by PostgreSQL.

use super::CatalogStore;
use crate::domain::product::{Company, NewProduct, Product, ProductId, ProductImage, ProductPatch};
use crate::domain::query::{ProductField, ProductFilter, SortDirection, SortSpec, Window};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};

const COLUMNS: &str =
    "id, name, price, featured, rating, company, images, created_at, updated_at";

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS products (
    id TEXT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    price BIGINT NOT NULL,
    featured BOOLEAN NOT NULL DEFAULT FALSE,
    rating DOUBLE PRECISION NOT NULL DEFAULT 4.5,
    company TEXT CHECK (company IN ('ikea', 'liddy', 'caressa', 'marcos')),
    images JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

#[derive(Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    /// Connects and makes sure the `products` table exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS products_created_at_idx ON products (created_at)")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn column(field: ProductField) -> Option<&'static str> {
    let col = match field {
        ProductField::Id => "id",
        ProductField::Name => "name",
        ProductField::Price => "price",
        ProductField::Featured => "featured",
        ProductField::Rating => "rating",
        ProductField::Company => "company",
        ProductField::CreatedAt => "created_at",
        ProductField::UpdatedAt => "updated_at",
        ProductField::Images => return None,
    };
    Some(col)
}

/// Escapes `LIKE` metacharacters so the needle matches literally.
fn escape_like(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    let mut sep = " WHERE ";
    if let Some(name) = &filter.name {
        qb.push(sep)
            .push("name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
        sep = " AND ";
    }
    if let Some(company) = &filter.company {
        qb.push(sep).push("company = ").push_bind(company.clone());
        sep = " AND ";
    }
    if let Some(featured) = filter.featured {
        qb.push(sep).push("featured = ").push_bind(featured);
    }
}

/// Missing companies sort first ascending and last descending. `id` is appended as a
/// tiebreaker so pages are stable.
fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: &SortSpec) {
    let mut terms: Vec<String> = sort
        .keys()
        .iter()
        .filter_map(|key| {
            let col = column(key.field)?;
            Some(match key.direction {
                SortDirection::Asc => format!("{} ASC NULLS FIRST", col),
                SortDirection::Desc => format!("{} DESC NULLS LAST", col),
            })
        })
        .collect();
    if !sort.keys().iter().any(|k| k.field == ProductField::Id) {
        terms.push("id ASC".to_string());
    }
    qb.push(" ORDER BY ").push(terms.join(", "));
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn product_from_row(row: &PgRow) -> Result<Product> {
    let id: String = row.try_get("id")?;
    let company: Option<String> = row.try_get("company")?;
    let company = match company {
        Some(name) => Some(
            Company::from_name(&name)
                .ok_or_else(|| anyhow!("Unknown company '{}' stored for product {}", name, id))?,
        ),
        None => None,
    };
    let Json(images): Json<Vec<ProductImage>> = row.try_get("images")?;

    Ok(Product {
        id: id.parse()?,
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        featured: row.try_get("featured")?,
        rating: row.try_get("rating")?,
        company,
        images,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn products_from_rows(rows: &[PgRow]) -> Result<Vec<Product>> {
    rows.iter().map(product_from_row).collect()
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn find(
        &self,
        filter: &ProductFilter,
        sort: &SortSpec,
        window: Window,
    ) -> Result<Vec<Product>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!("SELECT {} FROM products", COLUMNS));
        push_filter(&mut qb, filter);
        push_order(&mut qb, sort);
        qb.push(" LIMIT ")
            .push_bind(to_i64(window.limit))
            .push(" OFFSET ")
            .push_bind(to_i64(window.skip));

        let rows = qb.build().fetch_all(&self.pool).await?;
        products_from_rows(&rows)
    }

    async fn count(&self, filter: &ProductFilter) -> Result<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products");
        push_filter(&mut qb, filter);
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count.max(0) as u64)
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(&format!("SELECT {} FROM products", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        products_from_rows(&rows)
    }

    async fn insert(&self, product: NewProduct) -> Result<Product> {
        let id = ProductId::generate();
        let row = sqlx::query(&format!(
            "INSERT INTO products (id, name, price, featured, rating, company, images)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            COLUMNS
        ))
        .bind(id.to_string())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.featured)
        .bind(product.rating)
        .bind(product.company.map(|c| c.as_str()))
        .bind(Json(&product.images))
        .fetch_one(&self.pool)
        .await?;
        product_from_row(&row)
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(&format!("SELECT {} FROM products WHERE id = $1", COLUMNS))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn update(&self, id: &ProductId, patch: &ProductPatch) -> Result<Option<Product>> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE products SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(price) = patch.price {
                set.push("price = ").push_bind_unseparated(price);
            }
            if let Some(featured) = patch.featured {
                set.push("featured = ").push_bind_unseparated(featured);
            }
            if let Some(rating) = patch.rating {
                set.push("rating = ").push_bind_unseparated(rating);
            }
            if let Some(company) = patch.company {
                set.push("company = ")
                    .push_bind_unseparated(company.map(|c| c.as_str().to_string()));
            }
            if let Some(images) = &patch.images {
                set.push("images = ")
                    .push_bind_unseparated(Json(images.clone()));
            }
            set.push("updated_at = now()");
        }
        qb.push(" WHERE id = ")
            .push_bind(id.to_string())
            .push(format!(" RETURNING {}", COLUMNS));

        let row = qb.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn delete(&self, id: &ProductId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
