use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::orders::{
    CreateOrderRequest, Order, OrderError, OrderRepository, OrderStatus, UpdateOrderRequest,
};

/// Service for order business logic
///
/// Orders carry no rules beyond field presence, so this is a thin pass-through.
#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    /// Create a new OrderService
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    /// Create a new order
    ///
    /// # Arguments
    /// * `client_id` - subject id of the authenticated account placing the order
    /// * `request` - order fields
    ///
    /// New orders start as `active`.
    pub async fn create_order(
        &self,
        client_id: &str,
        request: CreateOrderRequest,
    ) -> Result<Order, OrderError> {
        let order = Order {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            deadline: request.deadline,
            category: request.category,
            region: request.region,
            status: OrderStatus::Active,
            client_id: client_id.to_string(),
            created_at: Utc::now(),
        };

        let order = self.repository.create(order).await?;
        tracing::info!("Created order {} for client {}", order.id, order.client_id);
        Ok(order)
    }

    pub async fn get_all_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.repository.find_all().await
    }

    pub async fn get_order_by_id(&self, id: Uuid) -> Result<Order, OrderError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound)
    }

    /// Update an order, keeping existing values for omitted fields
    pub async fn update_order(
        &self,
        id: Uuid,
        request: UpdateOrderRequest,
    ) -> Result<Order, OrderError> {
        let existing = self.get_order_by_id(id).await?;
        let order = self.repository.update(request.apply(existing)).await?;

        tracing::info!("Updated order {}", order.id);
        Ok(order)
    }

    pub async fn delete_order(&self, id: Uuid) -> Result<(), OrderError> {
        if !self.repository.delete(id).await? {
            tracing::debug!("Order {} not found for deletion", id);
            return Err(OrderError::NotFound);
        }

        tracing::info!("Deleted order {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::MemoryOrderRepository;
    use chrono::Duration;

    fn service() -> OrderService {
        OrderService::new(Arc::new(MemoryOrderRepository::new()))
    }

    fn request(title: &str) -> CreateOrderRequest {
        CreateOrderRequest {
            title: title.to_string(),
            description: "Restore accounting for 2024".to_string(),
            deadline: Utc::now() + Duration::days(30),
            category: "Accounting recovery".to_string(),
            region: "Shymkent".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_sets_client_and_active_status() {
        let service = service();
        let order = service.create_order("client-1", request("Books")).await.unwrap();

        assert_eq!(order.client_id, "client-1");
        assert_eq!(order.status, OrderStatus::Active);
        assert_eq!(service.get_order_by_id(order.id).await.unwrap(), order);
    }

    #[tokio::test]
    async fn test_list_returns_all_orders() {
        let service = service();
        service.create_order("client-1", request("First")).await.unwrap();
        service.create_order("client-2", request("Second")).await.unwrap();

        assert_eq!(service.get_all_orders().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = service();
        let order = service.create_order("client-1", request("Books")).await.unwrap();

        let updated = service
            .update_order(
                order.id,
                UpdateOrderRequest {
                    status: Some(OrderStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Closed);
        assert_eq!(updated.title, "Books");

        service.delete_order(order.id).await.unwrap();
        assert!(matches!(
            service.get_order_by_id(order.id).await,
            Err(OrderError::NotFound)
        ));
        assert!(matches!(
            service.delete_order(order.id).await,
            Err(OrderError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_update_missing_order() {
        let result = service()
            .update_order(Uuid::new_v4(), UpdateOrderRequest::default())
            .await;
        assert!(matches!(result, Err(OrderError::NotFound)));
    }
}
