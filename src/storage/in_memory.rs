//! In-memory implementation of CustomerStore

use crate::core::{Customer, CustomerStore, Entity, StorageError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory customer store
///
/// Uses RwLock for thread-safe access. Cloning shares the underlying map.
#[derive(Clone)]
pub struct InMemoryCustomerStore {
    customers: Arc<RwLock<HashMap<Uuid, Customer>>>,
}

impl InMemoryCustomerStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            customers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, Customer>>, StorageError> {
        self.customers
            .read()
            .map_err(|e| StorageError::LockPoisoned {
                kind: "read",
                message: e.to_string(),
            })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, Customer>>, StorageError> {
        self.customers
            .write()
            .map_err(|e| StorageError::LockPoisoned {
                kind: "write",
                message: e.to_string(),
            })
    }
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn save(&self, customer: Customer) -> Result<Customer, StorageError> {
        let mut customers = self.write()?;
        customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Customer>, StorageError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, StorageError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn update(
        &self,
        id: &Uuid,
        mut customer: Customer,
    ) -> Result<Option<Customer>, StorageError> {
        let mut customers = self.write()?;

        let Some(slot) = customers.get_mut(id) else {
            return Ok(None);
        };

        customer.id = *id;
        customer.touch();
        *slot = customer.clone();

        Ok(Some(customer))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<bool, StorageError> {
        Ok(self.write()?.remove(id).is_some())
    }

    async fn exists_by_id(&self, id: &Uuid) -> Result<bool, StorageError> {
        Ok(self.read()?.contains_key(id))
    }

    async fn count(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.len())
    }
}
