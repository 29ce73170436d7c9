use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Order status enum representing the lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Active,
    InProgress,
    Closed,
}

impl OrderStatus {
    /// Convert status to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "active",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Closed => "closed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing an order in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    pub category: String,
    pub region: String,
    pub status: OrderStatus,
    /// Subject id of the account that placed the order
    pub client_id: String,
    pub created_at: DateTime<Utc>,
}

/// Request DTO for creating a new order
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub deadline: DateTime<Utc>,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "region is required"))]
    pub region: String,
}

/// Request DTO for updating an order; omitted fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateOrderRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,
    #[validate(length(min = 1, message = "region must not be empty"))]
    pub region: Option<String>,
    pub status: Option<OrderStatus>,
}

impl UpdateOrderRequest {
    /// Apply the provided fields onto an existing order
    pub fn apply(self, mut order: Order) -> Order {
        if let Some(title) = self.title {
            order.title = title;
        }
        if let Some(description) = self.description {
            order.description = description;
        }
        if let Some(deadline) = self.deadline {
            order.deadline = deadline;
        }
        if let Some(category) = self.category {
            order.category = category;
        }
        if let Some(region) = self.region {
            order.region = region;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order {
            id: Uuid::new_v4(),
            title: "Annual audit".to_string(),
            description: "Audit of 2025 statements".to_string(),
            deadline: Utc::now(),
            category: "Audit".to_string(),
            region: "Almaty".to_string(),
            status: OrderStatus::Active,
            client_id: "client-1".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(serde_json::to_value(OrderStatus::InProgress).unwrap(), "in_progress");
        let parsed: OrderStatus = serde_json::from_str("\"closed\"").unwrap();
        assert_eq!(parsed, OrderStatus::Closed);
        assert_eq!(OrderStatus::default(), OrderStatus::Active);
    }

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let original = order();
        let update = UpdateOrderRequest {
            status: Some(OrderStatus::InProgress),
            region: Some("Astana".to_string()),
            ..Default::default()
        };

        let updated = update.apply(original.clone());
        assert_eq!(updated.status, OrderStatus::InProgress);
        assert_eq!(updated.region, "Astana");
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.client_id, original.client_id);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test]
    fn test_update_rejects_empty_title() {
        let update = UpdateOrderRequest {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_update_rejects_empty_description() {
        let update = UpdateOrderRequest {
            description: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(UpdateOrderRequest::default().validate().is_ok());
    }
}
