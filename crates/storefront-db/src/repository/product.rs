//! # Product Repository
//!
//! Database operations for the product catalog.
//!
//! ## Key Operations
//! - CRUD with storage-assigned integer ids
//! - Partial updates (only patched fields change)
//! - Restrict-on-delete: a product referenced by any order line cannot be
//!   removed

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use storefront_core::{Product, ProductDraft, ProductPatch};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product from a validated draft.
    ///
    /// ## Returns
    /// The stored product, including its assigned id.
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<Product> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id = %id, name = %draft.name, "Product inserted");

        Ok(Product {
            id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            price: draft.price,
            created_at: now,
        })
    }

    /// Gets a product by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products in insertion order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, description, price, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Applies a partial update to a product.
    ///
    /// Only fields present in the patch change; the rest keep their stored
    /// values. Returns the updated product.
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> DbResult<Product> {
        let mut product = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))?;

        if let Some(ref name) = patch.name {
            product.name = name.clone();
        }
        if let Some(ref description) = patch.description {
            product.description = description.clone();
        }
        if let Some(price) = patch.price {
            product.price = price;
        }

        sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, description = ?3, price = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .execute(&self.pool)
        .await?;

        debug!(id = %id, "Product updated");
        Ok(product)
    }

    /// Deletes a product permanently.
    ///
    /// ## Restrict Policy
    /// A product referenced by any order line item cannot be deleted -
    /// order history keeps its product rows. The check here produces a
    /// clean error; the foreign key constraint backs it up at the storage
    /// layer.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        if self.get_by_id(id).await?.is_none() {
            return Err(DbError::not_found("Product", id));
        }

        if self.is_referenced(id).await? {
            return Err(DbError::referenced(format!(
                "Product {} is referenced by existing orders",
                id
            )));
        }

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id = %id, "Product deleted");
        Ok(())
    }

    /// True when any order line item references the product.
    pub async fn is_referenced(&self, id: i64) -> DbResult<bool> {
        let referenced: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM order_items WHERE product_id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(referenced)
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
