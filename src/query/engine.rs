//! Query engine: match, sort and paginate a customer snapshot
//!
//! The engine is a linear scan over a snapshot obtained from the store. It
//! never touches the store itself and never mutates the customers it is
//! given, so the same snapshot and criteria always produce the same page.

use crate::core::Customer;
use crate::query::criteria::{FieldFilters, SearchCriteria, SortDirection, SortField, SortKey};
use crate::query::page::Page;
use std::cmp::Ordering;

/// Stateless executor for [`SearchCriteria`]
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryEngine;

impl QueryEngine {
    pub fn new() -> Self {
        Self
    }

    /// Run a query over a snapshot.
    ///
    /// Matching customers are sorted when the criteria carries sort keys
    /// (otherwise snapshot order is kept), then cut to the requested page.
    /// `total_elements` counts every match before pagination.
    pub fn execute(&self, criteria: &SearchCriteria, customers: Vec<Customer>) -> Page<Customer> {
        let scanned = customers.len();
        let mut matches = self.apply_filters(customers, criteria);

        if criteria.has_sorting() {
            matches = self.apply_sort(matches, criteria.sort_keys());
        }

        tracing::debug!(
            scanned,
            matched = matches.len(),
            page = criteria.page(),
            size = criteria.size(),
            "customer query executed"
        );

        Page::slice(matches, criteria.page(), criteria.size())
    }

    /// Keep only the customers matching every predicate of the criteria
    pub fn apply_filters(&self, data: Vec<Customer>, criteria: &SearchCriteria) -> Vec<Customer> {
        data.into_iter()
            .filter(|customer| self.matches(customer, criteria))
            .collect()
    }

    /// Stable multi-key sort; the first key that differs decides.
    pub fn apply_sort(&self, mut data: Vec<Customer>, keys: &[SortKey]) -> Vec<Customer> {
        data.sort_by(|a, b| {
            keys.iter()
                .map(|key| {
                    let ordering = compare_by(a, b, key.field);
                    match key.direction {
                        SortDirection::Asc => ordering,
                        SortDirection::Desc => ordering.reverse(),
                    }
                })
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        data
    }

    /// Whether one customer satisfies the criteria.
    ///
    /// - free text: case-insensitive substring of name, email, phone, city,
    ///   state or country
    /// - each set field filter: case-insensitive substring of that field
    /// - date ranges: inclusive on both ends
    pub fn matches(&self, customer: &Customer, criteria: &SearchCriteria) -> bool {
        if let Some(text) = criteria.search_text() {
            if !matches_text(customer, text) {
                return false;
            }
        }

        if !matches_field_filters(customer, criteria.filters()) {
            return false;
        }

        criteria.created_range().contains(customer.created_at)
            && criteria.updated_range().contains(customer.updated_at)
    }
}

fn matches_text(customer: &Customer, text: &str) -> bool {
    let needle = text.to_lowercase();
    [
        customer.name.as_str(),
        customer.email.as_str(),
        customer.phone.as_str(),
        customer.address.city.as_str(),
        customer.address.state.as_str(),
        customer.address.country.as_str(),
    ]
    .iter()
    .any(|value| contains_ignore_case(value, &needle))
}

fn matches_field_filters(customer: &Customer, filters: &FieldFilters) -> bool {
    let address = &customer.address;
    [
        (&filters.name, customer.name.as_str()),
        (&filters.email, customer.email.as_str()),
        (&filters.phone, customer.phone.as_str()),
        (&filters.city, address.city.as_str()),
        (&filters.state, address.state.as_str()),
        (&filters.country, address.country.as_str()),
        (&filters.zip_code, address.zip_code.as_str()),
    ]
    .iter()
    .all(|(term, value)| {
        term.as_deref()
            .is_none_or(|term| contains_ignore_case(value, &term.to_lowercase()))
    })
}

/// `needle` must already be lower-cased
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn compare_by(a: &Customer, b: &Customer, field: SortField) -> Ordering {
    match field {
        SortField::Name => cmp_ignore_case(&a.name, &b.name),
        SortField::Email => cmp_ignore_case(&a.email, &b.email),
        SortField::Phone => cmp_ignore_case(&a.phone, &b.phone),
        SortField::City => cmp_ignore_case(&a.address.city, &b.address.city),
        SortField::State => cmp_ignore_case(&a.address.state, &b.address.state),
        SortField::Country => cmp_ignore_case(&a.address.country, &b.address.country),
        SortField::ZipCode => cmp_ignore_case(&a.address.zip_code, &b.address.zip_code),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}
