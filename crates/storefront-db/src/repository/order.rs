//! # Order Repository
//!
//! Database operations for orders and their line items.
//!
//! ## Order Creation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  create() - one transaction                             │
//! │                                                                         │
//! │  BEGIN                                                                 │
//! │    INSERT order header (status 'pending', total 0)                     │
//! │    for each (product_id, quantity):                                    │
//! │        SELECT product            ── missing? → ROLLBACK, NotFound      │
//! │        INSERT line item          (price frozen as unit_price)          │
//! │        total += price × quantity                                       │
//! │    UPDATE order SET total_price = total                                │
//! │  COMMIT                                                                │
//! │                                                                         │
//! │  Either the full order (header + every line + final total) is          │
//! │  persisted, or nothing is.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The product price is read inside the transaction and copied onto the
//! line item, so the order total is frozen at creation time. Later product
//! price changes never touch existing orders.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use storefront_core::{Order, OrderItem, OrderItemDraft, OrderLine, DEFAULT_ORDER_STATUS};

/// Product fields needed while building an order.
#[derive(Debug, sqlx::FromRow)]
struct ProductSnapshot {
    name: String,
    price: f64,
}

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Creates an order from validated line items, atomically.
    ///
    /// ## Arguments
    /// * `items` - Validated, merged line items (one entry per product)
    ///
    /// ## Returns
    /// The persisted order with its computed total, and the expanded line
    /// listing (product id, name, quantity per line).
    ///
    /// ## Errors
    /// `DbError::NotFound` if any referenced product does not exist; the
    /// transaction is rolled back and no order or line-item rows remain.
    pub async fn create(&self, items: &[OrderItemDraft]) -> DbResult<(Order, Vec<OrderLine>)> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (order_date, total_price, status)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(now)
        .bind(0.0_f64)
        .bind(DEFAULT_ORDER_STATUS)
        .execute(&mut *tx)
        .await?;

        let order_id = result.last_insert_rowid();
        debug!(order_id = %order_id, items = items.len(), "Order header inserted");

        let mut total = 0.0_f64;
        let mut lines = Vec::with_capacity(items.len());

        for item in items {
            // Resolve the product inside the transaction; a missing id
            // aborts the whole order.
            let product = sqlx::query_as::<_, ProductSnapshot>(
                "SELECT name, price FROM products WHERE id = ?1",
            )
            .bind(item.product_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("Product", item.product_id))?;

            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(order_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(product.price)
            .execute(&mut *tx)
            .await?;

            total += product.price * item.quantity as f64;
            lines.push(OrderLine {
                product_id: item.product_id,
                name: product.name,
                quantity: item.quantity,
            });
        }

        sqlx::query("UPDATE orders SET total_price = ?2 WHERE id = ?1")
            .bind(order_id)
            .bind(total)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(order_id = %order_id, total = %total, lines = lines.len(), "Order created");

        let order = Order {
            id: order_id,
            order_date: now,
            total_price: total,
            status: DEFAULT_ORDER_STATUS.to_string(),
        };

        Ok((order, lines))
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, order_date, total_price, status
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets the stored line items for an order.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Gets the expanded line listing for an order (product id, current
    /// name, quantity), in line insertion order.
    pub async fn get_lines(&self, order_id: i64) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT oi.product_id, p.name, oi.quantity
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ?1
            ORDER BY oi.rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Replaces an order's status unconditionally.
    ///
    /// Statuses are an open-ended label set: any string is accepted and no
    /// transition checking is performed. Returns the updated order.
    pub async fn update_status(&self, id: i64, status: &str) -> DbResult<Order> {
        let result = sqlx::query("UPDATE orders SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        info!(order_id = %id, status = %status, "Order status updated");

        let order = sqlx::query_as::<_, Order>(
            "SELECT id, order_date, total_price, status FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use storefront_core::{ProductDraft, ProductPatch};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price: f64) -> i64 {
        db.products()
            .insert(&ProductDraft {
                name: name.to_string(),
                description: format!("{} description", name),
                price,
            })
            .await
            .unwrap()
            .id
    }

    fn item(product_id: i64, quantity: i64) -> OrderItemDraft {
        OrderItemDraft {
            product_id,
            quantity,
        }
    }

    async fn table_count(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_computes_frozen_total() {
        let db = test_db().await;
        let p1 = seed_product(&db, "Beans", 10.0).await;
        let p2 = seed_product(&db, "Filters", 5.0).await;

        let (order, lines) = db.orders().create(&[item(p1, 2), item(p2, 1)]).await.unwrap();

        assert_eq!(order.total_price, 25.0);
        assert_eq!(order.status, DEFAULT_ORDER_STATUS);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Beans");
        assert_eq!(lines[0].quantity, 2);

        let stored = db.orders().get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(stored.total_price, 25.0);
    }

    #[tokio::test]
    async fn test_total_survives_later_price_change() {
        let db = test_db().await;
        let p1 = seed_product(&db, "Beans", 10.0).await;

        let (order, _) = db.orders().create(&[item(p1, 2)]).await.unwrap();

        // Reprice the product after the order exists.
        db.products()
            .update(
                p1,
                &ProductPatch {
                    price: Some(99.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let stored = db.orders().get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(stored.total_price, 20.0);

        let items = db.orders().get_items(order.id).await.unwrap();
        assert_eq!(items[0].unit_price, 10.0);
    }

    #[tokio::test]
    async fn test_missing_product_rolls_back_everything() {
        let db = test_db().await;
        let p1 = seed_product(&db, "Beans", 10.0).await;

        let err = db
            .orders()
            .create(&[item(p1, 2), item(9999, 1)])
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // No order header and no line items survive the rollback -
        // including the line for the product that did exist.
        assert_eq!(table_count(&db, "orders").await, 0);
        assert_eq!(table_count(&db, "order_items").await, 0);
    }

    #[tokio::test]
    async fn test_update_status_accepts_any_label() {
        let db = test_db().await;
        let p1 = seed_product(&db, "Beans", 10.0).await;
        let (order, _) = db.orders().create(&[item(p1, 1)]).await.unwrap();

        let updated = db.orders().update_status(order.id, "shipped").await.unwrap();
        assert_eq!(updated.status, "shipped");

        // Open-ended label set: anything goes, by contract.
        let updated = db
            .orders()
            .update_status(order.id, "totally-made-up")
            .await
            .unwrap();
        assert_eq!(updated.status, "totally-made-up");
        assert_eq!(updated.total_price, 10.0);
    }

    #[tokio::test]
    async fn test_update_status_missing_order_is_not_found() {
        let db = test_db().await;

        let err = db.orders().update_status(404, "shipped").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_referenced_product_is_rejected() {
        let db = test_db().await;
        let p1 = seed_product(&db, "Beans", 10.0).await;
        db.orders().create(&[item(p1, 1)]).await.unwrap();

        let err = db.products().delete(p1).await.unwrap_err();
        assert!(matches!(err, DbError::ReferenceViolation { .. }));

        // Product is still there.
        assert!(db.products().get_by_id(p1).await.unwrap().is_some());
    }
}
