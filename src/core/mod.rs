//! Core module containing the customer model, validation, errors and the store contract

pub mod customer;
pub mod entity;
pub mod error;
pub mod store;
pub mod validation;

pub use customer::{Address, Customer};
pub use entity::Entity;
pub use error::{CustomerError, Result, StorageError, ValidationError};
pub use store::CustomerStore;
