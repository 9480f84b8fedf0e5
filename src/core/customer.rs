//! Customer and address entities

use crate::core::entity::{Entity, now};
use crate::core::error::ValidationError;
use crate::core::validation::{normalized_email, required};
use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

/// Postal address of a customer.
///
/// A value type: two addresses with equal fields are interchangeable. All
/// parts are required and stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Address {
    pub fn new(
        street: &str,
        city: &str,
        state: &str,
        zip_code: &str,
        country: &str,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            street: required("street", street)?,
            city: required("city", city)?,
            state: required("state", state)?,
            zip_code: required("zipCode", zip_code)?,
            country: required("country", country)?,
        })
    }
}

/// A customer record.
///
/// Constructed only through [`Customer::new`] / [`Customer::with_id`], which
/// validate and normalize every field: name and phone are trimmed, email is
/// trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Customer {
    /// Create a customer with a fresh id
    pub fn new(
        name: &str,
        email: &str,
        phone: &str,
        address: Address,
    ) -> Result<Self, ValidationError> {
        Self::with_id(Uuid::new_v4(), name, email, phone, address)
    }

    /// Create a customer with a caller-chosen id; a nil id is replaced by a fresh one
    pub fn with_id(
        id: Uuid,
        name: &str,
        email: &str,
        phone: &str,
        address: Address,
    ) -> Result<Self, ValidationError> {
        let id = if id.is_nil() { Uuid::new_v4() } else { id };
        let timestamp = now();
        Ok(Self {
            id,
            name: required("name", name)?,
            email: normalized_email(email)?,
            phone: required("phone", phone)?,
            address,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Replace the mutable fields, keeping identity and `created_at`.
    ///
    /// Nothing is changed if any field fails validation.
    pub fn update_info(
        &mut self,
        name: &str,
        email: &str,
        phone: &str,
        address: Address,
    ) -> Result<(), ValidationError> {
        let name = required("name", name)?;
        let email = normalized_email(email)?;
        let phone = required("phone", phone)?;

        self.name = name;
        self.email = email;
        self.phone = phone;
        self.address = address;
        self.touch();
        Ok(())
    }
}

impl Entity for Customer {
    fn resource_name() -> &'static str {
        "customers"
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mumbai() -> Address {
        Address::new(" 12 MG Road ", "Mumbai", "Maharashtra", "400001", "India").unwrap()
    }

    #[test]
    fn test_address_trims_and_compares_by_value() {
        let a = mumbai();
        let b = Address::new("12 MG Road", " Mumbai ", "Maharashtra", "400001", "India").unwrap();
        assert_eq!(a.street, "12 MG Road");
        assert_eq!(a, b);
    }

    #[test]
    fn test_address_rejects_blank_part() {
        let err = Address::new("12 MG Road", "Mumbai", "Maharashtra", " ", "India").unwrap_err();
        assert_eq!(err.to_string(), "Customer zipCode cannot be null or empty");
    }

    #[test]
    fn test_customer_normalizes_fields() {
        let customer = Customer::new(
            "  Rajesh Kumar ",
            " Rajesh.Kumar@Example.com ",
            " +91 98200 00001 ",
            mumbai(),
        )
        .unwrap();

        assert_eq!(customer.name, "Rajesh Kumar");
        assert_eq!(customer.email, "rajesh.kumar@example.com");
        assert_eq!(customer.phone, "+91 98200 00001");
        assert_eq!(customer.created_at, customer.updated_at);
        assert!(!customer.id.is_nil());
    }

    #[test]
    fn test_customer_with_nil_id_gets_fresh_id() {
        let customer =
            Customer::with_id(Uuid::nil(), "Amit", "amit@example.com", "123", mumbai()).unwrap();
        assert!(!customer.id.is_nil());
    }

    #[test]
    fn test_customer_rejects_invalid_email() {
        let err = Customer::new("Amit", "amit@", "123", mumbai()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEmail { .. }));
    }

    #[test]
    fn test_update_info_is_all_or_nothing() {
        let mut customer = Customer::new("Amit", "amit@example.com", "123", mumbai()).unwrap();
        let before = customer.clone();

        let result = customer.update_info("Amit Patel", "not-an-email", "456", mumbai());

        assert!(result.is_err());
        assert_eq!(customer, before);
    }

    #[test]
    fn test_update_info_keeps_created_at() {
        let mut customer = Customer::new("Amit", "amit@example.com", "123", mumbai()).unwrap();
        customer.created_at -= chrono::Duration::days(1);
        customer.updated_at = customer.created_at;
        let created = customer.created_at;

        customer
            .update_info("Amit Patel", "AMIT@example.com", "456", mumbai())
            .unwrap();

        assert_eq!(customer.created_at, created);
        assert!(customer.updated_at > created);
        assert_eq!(customer.email, "amit@example.com");
    }

    #[test]
    fn test_serializes_camel_case() {
        let customer = Customer::new("Amit", "amit@example.com", "123", mumbai()).unwrap();
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["address"]["zipCode"], "400001");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
