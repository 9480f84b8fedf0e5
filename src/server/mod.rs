//! HTTP server for the customer API
//!
//! This module provides a `ServerBuilder` that wires a store into the
//! customer service and exposes it under `/api/v1/customers`, next to the
//! health routes.

pub mod builder;
pub mod extract;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::{API_PREFIX, build_customer_routes, health_routes};
