//! HTTP handlers for customer operations
//!
//! Handlers only decode the request and encode the response; every rule
//! lives in [`CustomerService`].

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;
use uuid::Uuid;

use super::extract::{JsonBody, PathParam, QueryParams};
use crate::core::{Customer, CustomerError};
use crate::query::{Page, SearchParams};
use crate::service::{CustomerListing, CustomerPatch, CustomerRequest, CustomerService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CustomerService>,
}

impl AppState {
    pub fn new(service: CustomerService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Query string as decoded pairs; `sort` may repeat
type RawQuery = QueryParams<Vec<(String, String)>>;

/// POST /customers
pub async fn create_customer(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CustomerRequest>,
) -> Result<impl IntoResponse, CustomerError> {
    let customer = state.service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// GET /customers
///
/// A bare array or a page object, depending on which parameters are present.
pub async fn list_customers(
    State(state): State<AppState>,
    QueryParams(pairs): RawQuery,
) -> Result<Json<CustomerListing>, CustomerError> {
    let params = SearchParams::from_pairs(pairs)?;
    Ok(Json(state.service.list(&params).await?))
}

/// GET /customers/search
pub async fn search_customers(
    State(state): State<AppState>,
    QueryParams(pairs): RawQuery,
) -> Result<Json<Page<Customer>>, CustomerError> {
    let params = SearchParams::from_pairs(pairs)?;
    Ok(Json(state.service.search(&params).await?))
}

/// GET /customers/{id}
pub async fn get_customer(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<Customer>, CustomerError> {
    Ok(Json(state.service.get(id).await?))
}

/// PUT /customers/{id}
pub async fn update_customer(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(payload): JsonBody<CustomerRequest>,
) -> Result<Json<Customer>, CustomerError> {
    Ok(Json(state.service.update(id, payload).await?))
}

/// PATCH /customers/{id}
pub async fn patch_customer(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(patch): JsonBody<CustomerPatch>,
) -> Result<Json<Customer>, CustomerError> {
    Ok(Json(state.service.patch(id, patch).await?))
}

/// DELETE /customers/{id}
pub async fn delete_customer(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, CustomerError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
