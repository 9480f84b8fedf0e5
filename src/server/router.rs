//! Route table for the customer API

use crate::core::{Customer, Entity};
use crate::server::handlers::{
    AppState, create_customer, delete_customer, get_customer, list_customers, patch_customer,
    search_customers, update_customer,
};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Prefix shared by every versioned API route
pub const API_PREFIX: &str = "/api/v1";

/// Build customer routes
///
/// - POST   /api/v1/customers          - Create a customer
/// - GET    /api/v1/customers          - List (bare array or page)
/// - GET    /api/v1/customers/search   - Always-paginated search
/// - GET    /api/v1/customers/{id}     - Get by id
/// - PUT    /api/v1/customers/{id}     - Replace
/// - PATCH  /api/v1/customers/{id}     - Partial update
/// - DELETE /api/v1/customers/{id}     - Delete
pub fn build_customer_routes(state: AppState) -> Router {
    let base = format!("{}/{}", API_PREFIX, Customer::resource_name());

    Router::new()
        .route(&base, get(list_customers).post(create_customer))
        .route(&format!("{}/search", base), get(search_customers))
        .route(
            &format!("{}/{{id}}", base),
            get(get_customer)
                .put(update_customer)
                .patch(patch_customer)
                .delete(delete_customer),
        )
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "customer-registry"
    }))
}
