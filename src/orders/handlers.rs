// HTTP handlers for order endpoints

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::auth::AuthenticatedSubject;
use crate::orders::{CreateOrderRequest, Order, OrderError, OrderService, UpdateOrderRequest};

/// Handler for POST /api/v1/orders
/// Creates a new order owned by the authenticated account
pub async fn create_order_handler(
    State(service): State<Arc<OrderService>>,
    subject: AuthenticatedSubject,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Order>), OrderError> {
    let Json(request) = payload?;
    request
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    let order = service.create_order(&subject.subject_id, request).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Handler for GET /api/v1/orders
pub async fn list_orders_handler(
    State(service): State<Arc<OrderService>>,
) -> Result<Json<Vec<Order>>, OrderError> {
    let orders = service.get_all_orders().await?;
    Ok(Json(orders))
}

/// Handler for GET /api/v1/orders/{order_id}
pub async fn get_order_handler(
    State(service): State<Arc<OrderService>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Order>, OrderError> {
    let Path(order_id) = path?;
    let order = service.get_order_by_id(order_id).await?;
    Ok(Json(order))
}

/// Handler for PUT /api/v1/orders/{order_id}
pub async fn update_order_handler(
    State(service): State<Arc<OrderService>>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateOrderRequest>, JsonRejection>,
) -> Result<Json<Order>, OrderError> {
    let Path(order_id) = path?;
    let Json(request) = payload?;
    request
        .validate()
        .map_err(|e| OrderError::ValidationError(e.to_string()))?;

    let order = service.update_order(order_id, request).await?;
    Ok(Json(order))
}

/// Handler for DELETE /api/v1/orders/{order_id}
pub async fn delete_order_handler(
    State(service): State<Arc<OrderService>>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, OrderError> {
    let Path(order_id) = path?;
    service.delete_order(order_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
