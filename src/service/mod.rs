//! Customer service: CRUD operations and query orchestration
//!
//! The service owns no data. It is built around an injected
//! [`CustomerStore`] and routes every listing request through one decision
//! table:
//!
//! | filters or sort | explicit page/size | path | response |
//! |---|---|---|---|
//! | no  | no  | fast listing, newest first | bare list |
//! | yes | no  | query engine, page 0 of 20 | bare list (page content only) |
//! | no  | yes | fast listing, newest first, strict pagination | page |
//! | yes | yes | query engine, clamped pagination | page |
//!
//! The fast paginated path rejects a negative page or a non-positive size;
//! the engine path clamps them instead.

pub mod requests;

use crate::core::{Customer, CustomerError, CustomerStore, Result, ValidationError};
use crate::query::{DEFAULT_PAGE_SIZE, Page, QueryEngine, SearchCriteria, SearchParams, build_criteria};
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub use requests::{AddressRequest, CustomerPatch, CustomerRequest};

/// Result of a listing request: a bare list or a page envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CustomerListing {
    All(Vec<Customer>),
    Paged(Page<Customer>),
}

impl CustomerListing {
    /// The customers carried by this listing, in response order
    pub fn customers(&self) -> &[Customer] {
        match self {
            CustomerListing::All(customers) => customers,
            CustomerListing::Paged(page) => &page.content,
        }
    }
}

/// Orchestrates the store, the criteria builder and the query engine
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    engine: QueryEngine,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self {
            store,
            engine: QueryEngine::new(),
        }
    }

    // === CRUD ===

    pub async fn create(&self, request: CustomerRequest) -> Result<Customer> {
        request.validate().map_err(ValidationError::from)?;

        let address = request.address.to_address()?;
        let customer = Customer::new(&request.name, &request.email, &request.phone, address)?;
        let saved = self.store.save(customer).await?;

        tracing::info!(customer_id = %saved.id, "customer created");
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> Result<Customer> {
        ensure_id(id)?;
        self.store
            .find_by_id(&id)
            .await?
            .ok_or(CustomerError::NotFound { id })
    }

    /// Replace name, email, phone and address; `created_at` is kept
    pub async fn update(&self, id: Uuid, request: CustomerRequest) -> Result<Customer> {
        ensure_id(id)?;
        request.validate().map_err(ValidationError::from)?;

        let mut customer = self.get(id).await?;
        let address = request.address.to_address()?;
        customer.update_info(&request.name, &request.email, &request.phone, address)?;

        let saved = self.replace(id, customer).await?;
        tracing::info!(customer_id = %id, "customer updated");
        Ok(saved)
    }

    /// Apply the fields present in `patch`, keeping the others
    pub async fn patch(&self, id: Uuid, patch: CustomerPatch) -> Result<Customer> {
        ensure_id(id)?;
        if !patch.has_any_field() {
            return Err(CustomerError::empty_patch());
        }
        patch.validate().map_err(ValidationError::from)?;

        let mut customer = self.get(id).await?;
        let address = match &patch.address {
            Some(address) => address.to_address()?,
            None => customer.address.clone(),
        };
        let name = patch.name.as_deref().unwrap_or(&customer.name).to_string();
        let email = patch.email.as_deref().unwrap_or(&customer.email).to_string();
        let phone = patch.phone.as_deref().unwrap_or(&customer.phone).to_string();
        customer.update_info(&name, &email, &phone, address)?;

        let saved = self.replace(id, customer).await?;
        tracing::info!(customer_id = %id, "customer patched");
        Ok(saved)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        ensure_id(id)?;
        if !self.store.delete_by_id(&id).await? {
            return Err(CustomerError::NotFound { id });
        }
        tracing::info!(customer_id = %id, "customer deleted");
        Ok(())
    }

    async fn replace(&self, id: Uuid, customer: Customer) -> Result<Customer> {
        self.store
            .update(&id, customer)
            .await?
            .ok_or(CustomerError::NotFound { id })
    }

    // === Queries ===

    /// Serve a listing request according to the decision table above
    pub async fn list(&self, params: &SearchParams) -> Result<CustomerListing> {
        let criteria = build_criteria(params)?;
        let filtered = criteria.has_any_filters();
        let paginated = params.has_pagination();

        tracing::debug!(filtered, paginated, "listing customers");

        match (filtered, paginated) {
            (false, false) => self.list_all().await.map(CustomerListing::All),
            (true, false) => self
                .query(Some(&criteria))
                .await
                .map(|page| CustomerListing::All(page.content)),
            (false, true) => self
                .list_page(
                    params.page.unwrap_or(0),
                    params.size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
                )
                .await
                .map(CustomerListing::Paged),
            (true, true) => self.query(Some(&criteria)).await.map(CustomerListing::Paged),
        }
    }

    /// Always-paginated search: every request goes through the query engine
    pub async fn search(&self, params: &SearchParams) -> Result<Page<Customer>> {
        let criteria = build_criteria(params)?;
        self.query(Some(&criteria)).await
    }

    /// Run the query engine over one store snapshot
    pub async fn query(&self, criteria: Option<&SearchCriteria>) -> Result<Page<Customer>> {
        let criteria = criteria.ok_or_else(CustomerError::null_criteria)?;
        let snapshot = self.store.find_all().await?;
        Ok(self.engine.execute(criteria, snapshot))
    }

    /// Every customer, newest first
    pub async fn list_all(&self) -> Result<Vec<Customer>> {
        let mut customers = self.store.find_all().await?;
        customers.sort_by_key(|c| Reverse(c.created_at));
        Ok(customers)
    }

    /// One page of customers, newest first, with strict pagination checks.
    ///
    /// `total_elements` is the store count, not a filtered count.
    pub async fn list_page(&self, page: i64, size: i64) -> Result<Page<Customer>> {
        if page < 0 {
            return Err(CustomerError::invalid_pagination(
                "page",
                page,
                "Page number cannot be negative",
            ));
        }
        if size <= 0 {
            return Err(CustomerError::invalid_pagination(
                "size",
                size,
                "Page size must be greater than 0",
            ));
        }

        let page = usize::try_from(page).unwrap_or(usize::MAX);
        let size = usize::try_from(size).unwrap_or(usize::MAX);
        let content: Vec<Customer> = self
            .list_all()
            .await?
            .into_iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .collect();
        let total = self.store.count().await?;

        Ok(Page::new(content, page, size, total))
    }
}

fn ensure_id(id: Uuid) -> Result<()> {
    if id.is_nil() {
        return Err(CustomerError::null_customer_id());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryCustomerStore;

    fn service() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryCustomerStore::new()))
    }

    fn request(name: &str, email: &str, city: &str) -> CustomerRequest {
        CustomerRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: "+91 90000 00000".to_string(),
            address: AddressRequest {
                street: "1 Main Road".to_string(),
                city: city.to_string(),
                state: "State".to_string(),
                zip_code: "100001".to_string(),
                country: "India".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service
            .create(request("Amit Patel", "Amit@Example.com", "Kolkata"))
            .await
            .unwrap();

        assert_eq!(created.email, "amit@example.com");
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let result = service()
            .create(request("Amit Patel", "amit.example.com", "Kolkata"))
            .await;
        assert!(matches!(
            result,
            Err(CustomerError::Validation(ValidationError::InvalidEmail { .. }))
        ));
    }

    #[tokio::test]
    async fn test_nil_id_is_invalid_input() {
        let service = service();
        assert!(matches!(
            service.get(Uuid::nil()).await,
            Err(CustomerError::InvalidInput { ref field, .. }) if field == "customerId"
        ));
        assert!(matches!(
            service.delete(Uuid::nil()).await,
            Err(CustomerError::InvalidInput { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let service = service();
        let id = Uuid::new_v4();
        assert!(matches!(service.get(id).await, Err(CustomerError::NotFound { .. })));
        assert!(matches!(
            service
                .update(id, request("A", "a@example.com", "X"))
                .await,
            Err(CustomerError::NotFound { .. })
        ));
        let patch = CustomerPatch {
            phone: Some("1".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.patch(id, patch).await,
            Err(CustomerError::NotFound { .. })
        ));
        assert!(matches!(service.delete(id).await, Err(CustomerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_created_at() {
        let service = service();
        let created = service
            .create(request("Amit Patel", "amit@example.com", "Kolkata"))
            .await
            .unwrap();

        let updated = service
            .update(created.id, request("Amit P.", "amit.p@example.com", "Pune"))
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Amit P.");
        assert_eq!(updated.address.city, "Pune");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_patch_keeps_absent_fields() {
        let service = service();
        let created = service
            .create(request("Amit Patel", "amit@example.com", "Kolkata"))
            .await
            .unwrap();

        let patched = service
            .patch(
                created.id,
                CustomerPatch {
                    phone: Some(" +91 99999 99999 ".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(patched.phone, "+91 99999 99999");
        assert_eq!(patched.name, created.name);
        assert_eq!(patched.email, created.email);
        assert_eq!(patched.address, created.address);
    }

    #[tokio::test]
    async fn test_empty_patch_is_rejected() {
        let service = service();
        let created = service
            .create(request("Amit Patel", "amit@example.com", "Kolkata"))
            .await
            .unwrap();

        let result = service.patch(created.id, CustomerPatch::default()).await;

        assert!(matches!(
            result,
            Err(CustomerError::InvalidInput { ref field, .. }) if field == "patchRequest"
        ));
    }

    #[tokio::test]
    async fn test_query_without_criteria_is_invalid_input() {
        assert!(matches!(
            service().query(None).await,
            Err(CustomerError::InvalidInput { ref field, .. }) if field == "searchCriteria"
        ));
    }

    #[tokio::test]
    async fn test_list_page_strict_validation() {
        let service = service();
        assert!(matches!(
            service.list_page(-1, 10).await,
            Err(CustomerError::InvalidPagination { ref field, .. }) if field == "page"
        ));
        assert!(matches!(
            service.list_page(0, 0).await,
            Err(CustomerError::InvalidPagination { ref field, .. }) if field == "size"
        ));
    }

    #[tokio::test]
    async fn test_list_with_negative_page_and_filter_clamps() {
        let service = service();
        service
            .create(request("Amit Patel", "amit@example.com", "Kolkata"))
            .await
            .unwrap();
        let params = SearchParams {
            search: Some("amit".to_string()),
            page: Some(-5),
            size: Some(0),
            ..Default::default()
        };

        match service.list(&params).await.unwrap() {
            CustomerListing::Paged(page) => {
                assert_eq!(page.page, 0);
                assert_eq!(page.size, 1);
                assert_eq!(page.total_elements, 1);
            }
            other => panic!("expected a page, got {:?}", other),
        }
    }
}
