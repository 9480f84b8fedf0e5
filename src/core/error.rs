//! Typed error handling for the customer registry
//!
//! Every failure a caller can observe is a variant of [`CustomerError`]. The
//! variants map onto HTTP statuses and stable error codes so the REST layer
//! never has to inspect messages.
//!
//! # Error Categories
//!
//! - [`CustomerError::InvalidInput`]: missing criteria, nil id, empty patch
//! - [`CustomerError::InvalidPagination`]: negative page or non-positive size on the strict path
//! - [`CustomerError::DateFormat`]: a date bound that is not an ISO-8601 local date-time
//! - [`CustomerError::NotFound`]: unknown customer id
//! - [`CustomerError::MalformedRequest`]: a body, path or query string axum could not decode
//! - [`ValidationError`]: entity rules (blank fields, email format, address parts)
//! - [`StorageError`]: store failures (poisoned lock)
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get(id).await {
//!     Ok(customer) => println!("Found: {}", customer.name),
//!     Err(CustomerError::NotFound { id }) => println!("Customer {} not found", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Expected layout of date-time query bounds
pub const DATE_TIME_FORMAT: &str = "yyyy-MM-dd'T'HH:mm:ss";

/// The main error type of the registry
#[derive(Debug, Error)]
pub enum CustomerError {
    /// Caller supplied a structurally invalid request
    #[error("{message}")]
    InvalidInput { field: String, message: String },

    /// Strict pagination check failed
    #[error("{message}")]
    InvalidPagination {
        field: String,
        value: i64,
        message: String,
    },

    /// A date-time bound could not be parsed
    #[error("Invalid date format: '{value}'. Expected format: {expected}")]
    DateFormat { value: String, expected: String },

    /// No customer with this id
    #[error("Customer not found with id: {id}")]
    NotFound { id: Uuid },

    /// The request could not be decoded; `status` comes from the extractor
    #[error("{message}")]
    MalformedRequest { status: StatusCode, message: String },

    /// Entity validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result alias used throughout the crate
pub type Result<T, E = CustomerError> = std::result::Result<T, E>;

impl CustomerError {
    pub fn null_criteria() -> Self {
        CustomerError::InvalidInput {
            field: "searchCriteria".to_string(),
            message: "Search criteria cannot be null".to_string(),
        }
    }

    pub fn null_customer_id() -> Self {
        CustomerError::InvalidInput {
            field: "customerId".to_string(),
            message: "Customer ID cannot be null".to_string(),
        }
    }

    pub fn empty_patch() -> Self {
        CustomerError::InvalidInput {
            field: "patchRequest".to_string(),
            message: "At least one field must be provided for PATCH operation".to_string(),
        }
    }

    pub fn invalid_pagination(field: &str, value: i64, message: &str) -> Self {
        CustomerError::InvalidPagination {
            field: field.to_string(),
            value,
            message: message.to_string(),
        }
    }

    pub fn invalid_date(value: &str) -> Self {
        CustomerError::DateFormat {
            value: value.to_string(),
            expected: DATE_TIME_FORMAT.to_string(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CustomerError::InvalidInput { .. }
            | CustomerError::InvalidPagination { .. }
            | CustomerError::DateFormat { .. }
            | CustomerError::Validation(_) => StatusCode::BAD_REQUEST,
            CustomerError::NotFound { .. } => StatusCode::NOT_FOUND,
            CustomerError::MalformedRequest { status, .. } => *status,
            CustomerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CustomerError::InvalidInput { .. } => "INVALID_CUSTOMER_DATA",
            CustomerError::InvalidPagination { .. } => "INVALID_PAGINATION",
            CustomerError::DateFormat { .. } => "INVALID_DATE_FORMAT",
            CustomerError::NotFound { .. } => "CUSTOMER_NOT_FOUND",
            CustomerError::MalformedRequest { .. } => "MALFORMED_REQUEST",
            CustomerError::Validation(e) => e.error_code(),
            CustomerError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CustomerError::InvalidInput { field, .. } => Some(serde_json::json!({ "field": field })),
            CustomerError::InvalidPagination { field, value, .. } => {
                Some(serde_json::json!({ "field": field, "value": value }))
            }
            CustomerError::DateFormat { value, expected } => Some(serde_json::json!({
                "dateString": value,
                "expectedFormat": expected
            })),
            CustomerError::NotFound { id } => Some(serde_json::json!({ "id": id.to_string() })),
            CustomerError::Validation(ValidationError::BlankField { field }) => {
                Some(serde_json::json!({ "field": field }))
            }
            CustomerError::Validation(ValidationError::InvalidEmail { email, reason }) => {
                Some(serde_json::json!({ "email": email, "reason": reason }))
            }
            CustomerError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            CustomerError::MalformedRequest { .. } | CustomerError::Storage(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for CustomerError {
    fn into_response(self) -> Response {
        if matches!(self, CustomerError::Storage(_)) {
            tracing::error!(error = %self, "storage failure");
        }
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<JsonRejection> for CustomerError {
    fn from(rejection: JsonRejection) -> Self {
        CustomerError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for CustomerError {
    fn from(rejection: PathRejection) -> Self {
        CustomerError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for CustomerError {
    fn from(rejection: QueryRejection) -> Self {
        CustomerError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Why an email address was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmailFormatError {
    TooLong,
    MissingAtSymbol,
    MultipleAtSymbols,
    InvalidLocalPart,
    InvalidDomainPart,
    LocalPartTooLong,
    DomainTooLong,
    ConsecutiveDots,
    StartsOrEndsWithDot,
    InvalidTld,
}

impl std::fmt::Display for EmailFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hint = match self {
            EmailFormatError::TooLong => {
                "Email address exceeds maximum length of 254 characters."
            }
            EmailFormatError::MissingAtSymbol => {
                "Email must contain exactly one '@' symbol. Example: user@domain.com"
            }
            EmailFormatError::MultipleAtSymbols => {
                "Email contains multiple '@' symbols. Only one '@' is allowed."
            }
            EmailFormatError::InvalidLocalPart => {
                "The part before '@' contains invalid characters or format."
            }
            EmailFormatError::InvalidDomainPart => {
                "The domain part (after '@') is invalid. Domain must contain at least one dot and valid characters."
            }
            EmailFormatError::LocalPartTooLong => "The part before '@' exceeds 64 characters.",
            EmailFormatError::DomainTooLong => "The domain part exceeds 253 characters.",
            EmailFormatError::ConsecutiveDots => {
                "Email contains consecutive dots (..) which are not allowed."
            }
            EmailFormatError::StartsOrEndsWithDot => "Email cannot start or end with a dot (.).",
            EmailFormatError::InvalidTld => {
                "Top-level domain (TLD) must be at least 2 characters and contain only letters."
            }
        };
        f.write_str(hint)
    }
}

/// Errors raised while constructing or mutating entities
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field was missing or blank
    #[error("Customer {field} cannot be null or empty")]
    BlankField { field: String },

    /// The email failed format validation
    #[error("Invalid email format: '{email}'. {reason}")]
    InvalidEmail {
        email: String,
        reason: EmailFormatError,
    },

    /// Request-level rule violations, keyed by field
    #[error("Validation failed for {} field(s)", .0.len())]
    FieldErrors(Vec<FieldError>),
}

impl ValidationError {
    pub fn blank(field: &str) -> Self {
        ValidationError::BlankField {
            field: field.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidEmail { .. } => "INVALID_EMAIL_FORMAT",
            ValidationError::BlankField { .. } | ValidationError::FieldErrors(_) => {
                "VALIDATION_ERROR"
            }
        }
    }
}

/// A single field-level violation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors("", &errors, &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

/// Flatten nested validator errors into dotted field paths (`address.city`)
fn collect_field_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldError {
                    field: path.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), inner, out);
                }
            }
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by store implementations
#[derive(Debug, Error)]
pub enum StorageError {
    /// A lock guarding the collection was poisoned by a panicking writer
    #[error("Failed to acquire {kind} lock: {message}")]
    LockPoisoned { kind: &'static str, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_and_status() {
        let id = Uuid::new_v4();
        let err = CustomerError::NotFound { id };
        assert_eq!(err.to_string(), format!("Customer not found with id: {}", id));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "CUSTOMER_NOT_FOUND");
    }

    #[test]
    fn test_date_format_details() {
        let err = CustomerError::invalid_date("2024-13-01");
        let response = err.to_response();
        assert_eq!(response.code, "INVALID_DATE_FORMAT");
        let details = response.details.unwrap();
        assert_eq!(details["dateString"], "2024-13-01");
        assert_eq!(details["expectedFormat"], DATE_TIME_FORMAT);
    }

    #[test]
    fn test_validation_error_codes() {
        let err: CustomerError = ValidationError::blank("name").into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Customer name cannot be null or empty");

        let err: CustomerError = ValidationError::InvalidEmail {
            email: "a@@b.com".to_string(),
            reason: EmailFormatError::MultipleAtSymbols,
        }
        .into();
        assert_eq!(err.error_code(), "INVALID_EMAIL_FORMAT");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("multiple '@'"));
    }

    #[test]
    fn test_storage_error_is_internal() {
        let err: CustomerError = StorageError::LockPoisoned {
            kind: "read",
            message: "poisoned".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_response().details.is_none());
    }

    #[test]
    fn test_error_response_serialization() {
        let err = CustomerError::invalid_pagination("page", -1, "Page number cannot be negative");
        let json = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(json["code"], "INVALID_PAGINATION");
        assert_eq!(json["message"], "Page number cannot be negative");
        assert_eq!(json["details"]["value"], -1);
    }
}
