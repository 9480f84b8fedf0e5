//! Storage implementations

pub mod in_memory;

pub use in_memory::InMemoryCustomerStore;
