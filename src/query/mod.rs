//! Customer query engine
//!
//! - [`criteria`]: the immutable query description and its fluent factory
//! - [`builder`]: raw request inputs to criteria (trimming, dates, sort grammar)
//! - [`engine`]: matching, multi-key sorting and pagination over a snapshot
//! - [`page`]: the paginated result envelope

pub mod builder;
pub mod criteria;
pub mod engine;
pub mod page;

pub use builder::{SearchParams, build_criteria, parse_sort_expression};
pub use criteria::{
    DEFAULT_PAGE_SIZE, DateRange, FieldFilters, MAX_PAGE_SIZE, SearchCriteria,
    SearchCriteriaBuilder, SortDirection, SortField, SortKey,
};
pub use engine::QueryEngine;
pub use page::Page;
