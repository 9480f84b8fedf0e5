//! Request payloads for creating, replacing and patching customers

use crate::core::{Address, ValidationError};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Address part of a customer payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 200, message = "Street is required"))]
    pub street: String,

    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,

    #[validate(length(min = 1, max = 100, message = "State is required"))]
    pub state: String,

    #[validate(length(min = 1, max = 20, message = "Zip code is required"))]
    pub zip_code: String,

    #[validate(length(min = 1, max = 100, message = "Country is required"))]
    pub country: String,
}

impl AddressRequest {
    pub fn to_address(&self) -> Result<Address, ValidationError> {
        Address::new(
            &self.street,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        )
    }
}

/// Full customer payload for create (POST) and replace (PUT)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 254, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 30, message = "Phone is required"))]
    pub phone: String,

    #[validate(nested)]
    pub address: AddressRequest,
}

/// Partial customer payload for PATCH; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[validate(length(min = 1, max = 100, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 254, message = "Email must not be empty"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 30, message = "Phone must not be empty"))]
    pub phone: Option<String>,

    #[validate(nested)]
    pub address: Option<AddressRequest>,
}

impl CustomerPatch {
    pub fn has_any_field(&self) -> bool {
        self.name.is_some() || self.email.is_some() || self.phone.is_some() || self.address.is_some()
    }
}
