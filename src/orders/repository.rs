use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::orders::error::OrderError;
use crate::orders::models::Order;

/// Persistence for orders
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: Order) -> Result<Order, OrderError>;

    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrderError>;

    /// Overwrite a stored order; `NotFound` when it no longer exists
    async fn update(&self, order: Order) -> Result<Order, OrderError>;

    /// Returns false when there was nothing to delete
    async fn delete(&self, id: Uuid) -> Result<bool, OrderError>;
}

/// Repository for order operations
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    /// Create a new PgOrderRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, OrderError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, title, description, deadline, category, region, status, client_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, description, deadline, category, region, status, client_id, created_at
            "#,
        )
        .bind(order.id)
        .bind(&order.title)
        .bind(&order.description)
        .bind(order.deadline)
        .bind(&order.category)
        .bind(&order.region)
        .bind(order.status)
        .bind(&order.client_id)
        .bind(order.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, title, description, deadline, category, region, status, client_id, created_at
            FROM orders
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrderError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, title, description, deadline, category, region, status, client_id, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    async fn update(&self, order: Order) -> Result<Order, OrderError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET title = $1, description = $2, deadline = $3, category = $4, region = $5, status = $6
            WHERE id = $7
            RETURNING id, title, description, deadline, category, region, status, client_id, created_at
            "#,
        )
        .bind(&order.title)
        .bind(&order.description)
        .bind(order.deadline)
        .bind(&order.category)
        .bind(&order.region)
        .bind(order.status)
        .bind(order.id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(OrderError::NotFound)?;

        Ok(order)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, OrderError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-memory order repository
#[derive(Default)]
pub struct MemoryOrderRepository {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn create(&self, order: Order) -> Result<Order, OrderError> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(order)
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, OrderError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn update(&self, order: Order) -> Result<Order, OrderError> {
        let mut orders = self.orders.write().await;
        match orders.get_mut(&order.id) {
            Some(existing) => {
                *existing = order.clone();
                Ok(order)
            }
            None => Err(OrderError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, OrderError> {
        Ok(self.orders.write().await.remove(&id).is_some())
    }
}
