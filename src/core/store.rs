//! Store trait for customer persistence

use crate::core::customer::Customer;
use crate::core::error::StorageError;
use async_trait::async_trait;
use uuid::Uuid;

/// Keyed collection of customers.
///
/// Implementations must tolerate concurrent readers and writers. No
/// implementation may hold a lock across calls.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert or replace a customer under its own id
    async fn save(&self, customer: Customer) -> Result<Customer, StorageError>;

    /// Get a customer by id
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, StorageError>;

    /// Snapshot of every customer, in the store's enumeration order.
    ///
    /// The returned vector is an owned copy; callers may sort or mutate it.
    async fn find_all(&self) -> Result<Vec<Customer>, StorageError>;

    /// Replace an existing customer.
    ///
    /// The stored record takes `id` as its identity and has `updated_at`
    /// advanced. Returns `None` iff `id` is unknown.
    async fn update(&self, id: &Uuid, customer: Customer) -> Result<Option<Customer>, StorageError>;

    /// Remove a customer; `false` iff `id` was unknown
    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, StorageError>;

    /// Whether a customer with this id exists
    async fn exists_by_id(&self, id: &Uuid) -> Result<bool, StorageError>;

    /// Number of stored customers
    async fn count(&self) -> Result<usize, StorageError>;
}
