//! # Product Repository
//!
//! Database operations for the rentable catalog.
//!
//! ## Key Operations
//! - Listing, optionally filtered by category, always ordered by ascending
//!   weekly price (the picker shows cheapest first)
//! - Lookup by id
//! - Idempotent seeding from the built-in catalog
//!
//! The catalog is immutable at runtime: nothing here updates or deletes
//! product rows.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use monis_core::{Category, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Everything, cheapest first
/// let all = repo.list(None).await?;
///
/// // Only desks
/// let desks = repo.list(Some(Category::Desk)).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products, optionally filtered by category.
    ///
    /// Results are ordered by ascending weekly price; ties break on id so
    /// the ordering is stable across calls.
    pub async fn list(&self, category: Option<Category>) -> DbResult<Vec<Product>> {
        debug!(?category, "Listing products");

        let products = match category {
            Some(category) => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, category,
                           price_per_week_cents, price_per_month_cents,
                           description, is_base, is_featured
                    FROM products
                    WHERE category = ?1
                    ORDER BY price_per_week_cents, id
                    "#,
                )
                .bind(category)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Product>(
                    r#"
                    SELECT id, name, category,
                           price_per_week_cents, price_per_month_cents,
                           description, is_base, is_featured
                    FROM products
                    ORDER BY price_per_week_cents, id
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        debug!(count = products.len(), "Products listed");
        Ok(products)
    }

    /// Fetches a single product by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category,
                   price_per_week_cents, price_per_month_cents,
                   description, is_base, is_featured
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Returns the number of catalog rows.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Seeds the catalog with the given products.
    ///
    /// Idempotent: existing ids are left untouched, so running this on
    /// every startup is safe.
    pub async fn seed(&self, products: &[Product]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        for p in products {
            sqlx::query(
                r#"
                INSERT OR IGNORE INTO products
                    (id, name, category,
                     price_per_week_cents, price_per_month_cents,
                     description, is_base, is_featured)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                "#,
            )
            .bind(&p.id)
            .bind(&p.name)
            .bind(p.category)
            .bind(p.price_per_week_cents)
            .bind(p.price_per_month_cents)
            .bind(&p.description)
            .bind(p.is_base)
            .bind(p.is_featured)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(count = products.len(), "Catalog seeded");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use monis_core::catalog::builtin_catalog;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.products().seed(&builtin_catalog()).await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_seed_and_count() {
        let db = seeded_db().await;
        let count = db.products().count().await.unwrap();
        assert_eq!(count as usize, builtin_catalog().len());

        // Seeding again is a no-op
        db.products().seed(&builtin_catalog()).await.unwrap();
        assert_eq!(db.products().count().await.unwrap(), count);
    }

    #[tokio::test]
    async fn test_list_orders_by_weekly_price() {
        let db = seeded_db().await;
        let products = db.products().list(None).await.unwrap();

        assert_eq!(products.len(), builtin_catalog().len());
        let prices: Vec<i64> = products.iter().map(|p| p.price_per_week_cents).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let db = seeded_db().await;
        let desks = db.products().list(Some(Category::Desk)).await.unwrap();

        assert!(!desks.is_empty());
        assert!(desks.iter().all(|p| p.category == Category::Desk));
        assert!(desks.iter().all(|p| p.is_base));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let db = seeded_db().await;

        let product = db
            .products()
            .get_by_id("desk-electric")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(product.name, "Electric Standing Desk");
        assert_eq!(product.category, Category::Desk);
        assert_eq!(product.price_per_week_cents, 500);

        assert!(db.products().get_by_id("ghost").await.unwrap().is_none());
    }
}
