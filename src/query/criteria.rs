//! Search criteria: the immutable description of one customer query

use chrono::NaiveDateTime;
use std::fmt;

/// Page size used when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size a criteria will ever carry
pub const MAX_PAGE_SIZE: usize = 100;

/// Fields a query can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Name,
    Email,
    Phone,
    City,
    State,
    Country,
    ZipCode,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Resolve a field name, case-insensitively, accepting the
    /// `zip`, `created` and `updated` aliases.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "name" => Some(SortField::Name),
            "email" => Some(SortField::Email),
            "phone" => Some(SortField::Phone),
            "city" => Some(SortField::City),
            "state" => Some(SortField::State),
            "country" => Some(SortField::Country),
            "zipcode" | "zip" => Some(SortField::ZipCode),
            "createdat" | "created" => Some(SortField::CreatedAt),
            "updatedat" | "updated" => Some(SortField::UpdatedAt),
            _ => None,
        }
    }

    /// Canonical lower-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Email => "email",
            SortField::Phone => "phone",
            SortField::City => "city",
            SortField::State => "state",
            SortField::Country => "country",
            SortField::ZipCode => "zipcode",
            SortField::CreatedAt => "createdat",
            SortField::UpdatedAt => "updatedat",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One (field, direction) pair of a multi-key sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Substring filters on individual customer fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilters {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
}

impl FieldFilters {
    /// Whether at least one filter is set
    pub fn any(&self) -> bool {
        [
            &self.name,
            &self.email,
            &self.phone,
            &self.city,
            &self.state,
            &self.country,
            &self.zip_code,
        ]
        .iter()
        .any(|f| f.is_some())
    }

    fn normalized(self) -> Self {
        Self {
            name: non_blank(self.name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            city: non_blank(self.city),
            state: non_blank(self.state),
            country: non_blank(self.country),
            zip_code: non_blank(self.zip_code),
        }
    }
}

/// Inclusive bounds on a timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub after: Option<NaiveDateTime>,
    pub before: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn is_set(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Both bounds are inclusive; an unset bound never excludes.
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.after.is_none_or(|after| at >= after) && self.before.is_none_or(|before| at <= before)
    }
}

/// Parsed, validated description of one customer query.
///
/// Immutable once built. `page` and `size` are clamped at construction, so a
/// criteria never carries a negative page or a size outside `[1, 100]`.
///
/// # Example
/// ```rust,ignore
/// let criteria = SearchCriteria::builder()
///     .search_text("bangalore")
///     .sort_key(SortKey::asc(SortField::Name))
///     .page(0)
///     .size(10)
///     .build();
/// assert!(criteria.has_search_text());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    search_text: Option<String>,
    filters: FieldFilters,
    created: DateRange,
    updated: DateRange,
    sort: Vec<SortKey>,
    page: usize,
    size: usize,
}

impl SearchCriteria {
    pub fn builder() -> SearchCriteriaBuilder {
        SearchCriteriaBuilder::default()
    }

    pub fn search_text(&self) -> Option<&str> {
        self.search_text.as_deref()
    }

    pub fn filters(&self) -> &FieldFilters {
        &self.filters
    }

    pub fn created_range(&self) -> &DateRange {
        &self.created
    }

    pub fn updated_range(&self) -> &DateRange {
        &self.updated
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn has_search_text(&self) -> bool {
        self.search_text.is_some()
    }

    pub fn has_field_filters(&self) -> bool {
        self.filters.any()
    }

    pub fn has_date_filters(&self) -> bool {
        self.created.is_set() || self.updated.is_set()
    }

    pub fn has_sorting(&self) -> bool {
        !self.sort.is_empty()
    }

    /// True when the query needs the full engine rather than a plain listing
    pub fn has_any_filters(&self) -> bool {
        self.has_search_text()
            || self.has_field_filters()
            || self.has_date_filters()
            || self.has_sorting()
    }
}

impl Default for SearchCriteria {
    fn default() -> Self {
        SearchCriteria::builder().build()
    }
}

/// Fluent factory for [`SearchCriteria`].
///
/// Consumed by value; strings are trimmed and blank ones dropped at `build`.
#[derive(Debug, Clone)]
pub struct SearchCriteriaBuilder {
    pub(crate) search_text: Option<String>,
    pub(crate) filters: FieldFilters,
    pub(crate) created: DateRange,
    pub(crate) updated: DateRange,
    pub(crate) sort: Vec<SortKey>,
    pub(crate) page: i64,
    pub(crate) size: i64,
}

impl Default for SearchCriteriaBuilder {
    fn default() -> Self {
        Self {
            search_text: None,
            filters: FieldFilters::default(),
            created: DateRange::default(),
            updated: DateRange::default(),
            sort: Vec::new(),
            page: 0,
            size: DEFAULT_PAGE_SIZE as i64,
        }
    }
}

impl SearchCriteriaBuilder {
    pub fn search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = Some(text.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.filters.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.filters.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.filters.phone = Some(phone.into());
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.filters.city = Some(city.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.filters.state = Some(state.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.filters.country = Some(country.into());
        self
    }

    pub fn zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.filters.zip_code = Some(zip_code.into());
        self
    }

    pub fn created_after(mut self, at: NaiveDateTime) -> Self {
        self.created.after = Some(at);
        self
    }

    pub fn created_before(mut self, at: NaiveDateTime) -> Self {
        self.created.before = Some(at);
        self
    }

    pub fn updated_after(mut self, at: NaiveDateTime) -> Self {
        self.updated.after = Some(at);
        self
    }

    pub fn updated_before(mut self, at: NaiveDateTime) -> Self {
        self.updated.before = Some(at);
        self
    }

    /// Replace all sort keys
    pub fn sort(mut self, keys: Vec<SortKey>) -> Self {
        self.sort = keys;
        self
    }

    /// Append one sort key after the existing ones
    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn build(self) -> SearchCriteria {
        SearchCriteria {
            search_text: non_blank(self.search_text),
            filters: self.filters.normalized(),
            created: self.created,
            updated: self.updated,
            sort: self.sort,
            page: usize::try_from(self.page.max(0)).unwrap_or(usize::MAX),
            size: self.size.clamp(1, MAX_PAGE_SIZE as i64) as usize,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
