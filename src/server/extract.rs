//! Extractors whose rejections are rendered as [`CustomerError`] bodies
//!
//! Wrapping axum's `Json`, `Path` and `Query` keeps malformed requests on the
//! same `{code, message, details}` envelope as every other failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::core::CustomerError;

/// JSON request body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(CustomerError))]
pub struct JsonBody<T>(pub T);

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(CustomerError))]
pub struct PathParam<T>(pub T);

/// Query string
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(CustomerError))]
pub struct QueryParams<T>(pub T);
