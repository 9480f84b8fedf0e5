//! # Customer Registry
//!
//! Customer records behind a REST API, with an in-memory query engine.
//!
//! ## Features
//!
//! - **CRUD**: create, get, replace, patch and delete customers with validated emails and addresses
//! - **Free-text search**: one term matched against name, email, phone, city, state and country
//! - **Field filters**: per-field substring filters, all of which must match
//! - **Date ranges**: inclusive bounds on creation and last-update timestamps
//! - **Multi-key sorting**: `sort=city,desc&sort=name,asc` with stable tie-breaking
//! - **Pagination**: clamped page/size with total counts
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use customers::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemoryCustomerStore::new())
//!     .build()
//!     .await?;
//!
//! let service = CustomerService::new(Arc::new(InMemoryCustomerStore::new()));
//! let criteria = SearchCriteria::builder()
//!     .city("mumbai")
//!     .sort_key(SortKey::desc(SortField::CreatedAt))
//!     .size(10)
//!     .build();
//! let page = service.query(Some(&criteria)).await?;
//! ```

pub mod config;
pub mod core;
pub mod query;
pub mod server;
pub mod service;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Address, Customer, CustomerError, CustomerStore, Entity, StorageError, ValidationError,
    };

    // === Query ===
    pub use crate::query::{
        Page, QueryEngine, SearchCriteria, SearchParams, SortDirection, SortField, SortKey,
        build_criteria,
    };

    // === Service ===
    pub use crate::service::{
        AddressRequest, CustomerListing, CustomerPatch, CustomerRequest, CustomerService,
    };

    // === Storage ===
    pub use crate::storage::InMemoryCustomerStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use chrono::NaiveDateTime;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
