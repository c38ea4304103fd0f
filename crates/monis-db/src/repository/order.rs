//! # Order Repository
//!
//! Database operations for submitted rental orders.
//!
//! The workspace configuration is frozen into the `workspace_config` column
//! as JSON at submission time, so later catalog edits never change what a
//! customer ordered.

use sqlx::SqlitePool;
use tracing::debug;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DbResult;
use monis_core::{Order, OrderStatus, RentalPeriod, WorkspaceConfig};

/// Row shape for the `orders` table.
///
/// Exists because `workspace_config` is stored as a JSON TEXT column and
/// needs an explicit decode step into [`WorkspaceConfig`].
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    user_id: Option<String>,
    workspace_config: String,
    rental_period: RentalPeriod,
    start_date: NaiveDate,
    delivery_address: String,
    total_price_cents: i64,
    status: OrderStatus,
    contact_name: String,
    contact_email: String,
    contact_whatsapp: String,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> DbResult<Order> {
        let workspace_config: WorkspaceConfig = serde_json::from_str(&self.workspace_config)?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            workspace_config,
            rental_period: self.rental_period,
            start_date: self.start_date,
            delivery_address: self.delivery_address,
            total_price_cents: self.total_price_cents,
            status: self.status,
            contact_name: self.contact_name,
            contact_email: self.contact_email,
            contact_whatsapp: self.contact_whatsapp,
            notes: self.notes,
            created_at: self.created_at,
        })
    }
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

    /// Inserts a submitted order.
    pub async fn insert(&self, order: &Order) -> DbResult<()> {
        let config_json = serde_json::to_string(&order.workspace_config)?;

        sqlx::query(
            r#"
            INSERT INTO orders
                (id, user_id, workspace_config, rental_period, start_date,
                 delivery_address, total_price_cents, status,
                 contact_name, contact_email, contact_whatsapp, notes, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(config_json)
        .bind(order.rental_period)
        .bind(order.start_date)
        .bind(&order.delivery_address)
        .bind(order.total_price_cents)
        .bind(order.status)
        .bind(&order.contact_name)
        .bind(&order.contact_email)
        .bind(&order.contact_whatsapp)
        .bind(&order.notes)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        debug!(order_id = %order.id, total = order.total_price_cents, "Order inserted");
        Ok(())
    }

    /// Fetches a single order by id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, workspace_config, rental_period, start_date,
                   delivery_address, total_price_cents, status,
                   contact_name, contact_email, contact_whatsapp, notes, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(OrderRow::into_order).transpose()
    }

    /// Lists all orders belonging to a user, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, workspace_config, rental_period, start_date,
                   delivery_address, total_price_cents, status,
                   contact_name, contact_email, contact_whatsapp, notes, created_at
            FROM orders
            WHERE user_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id = %user_id, count = rows.len(), "Orders listed");
        rows.into_iter().map(OrderRow::into_order).collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
