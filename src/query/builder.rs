//! Building search criteria from raw request inputs
//!
//! Everything arrives as optional strings. Blank strings mean "not
//! specified", date bounds must be ISO-8601 local date-times, and sort
//! expressions are parsed best-effort: anything that does not fit the
//! grammar is dropped without an error.

use crate::core::error::{CustomerError, Result};
use crate::query::criteria::{
    DEFAULT_PAGE_SIZE, DateRange, FieldFilters, SearchCriteria, SearchCriteriaBuilder,
    SortDirection, SortField, SortKey,
};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

/// Raw, unvalidated query inputs
///
/// Mirrors the query-string parameters of the listing and search endpoints:
///
/// ```text
/// GET /api/v1/customers?search=bangalore&sort=name,asc&sort=created,desc&page=0&size=10
/// GET /api/v1/customers?city=Mumbai&createdAfter=2024-01-01T00:00:00
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub updated_after: Option<String>,
    pub updated_before: Option<String>,
    pub sort: Vec<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl SearchParams {
    /// Collect parameters from decoded query-string pairs.
    ///
    /// `sort` may repeat; for every other key the last occurrence wins.
    /// Unknown keys are ignored. A `page` or `size` that is not an integer is
    /// rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = SearchParams::default();
        for (key, value) in pairs {
            let value = value.into();
            match key.as_ref() {
                "search" => params.search = Some(value),
                "name" => params.name = Some(value),
                "email" => params.email = Some(value),
                "phone" => params.phone = Some(value),
                "city" => params.city = Some(value),
                "state" => params.state = Some(value),
                "country" => params.country = Some(value),
                "zipCode" => params.zip_code = Some(value),
                "createdAfter" => params.created_after = Some(value),
                "createdBefore" => params.created_before = Some(value),
                "updatedAfter" => params.updated_after = Some(value),
                "updatedBefore" => params.updated_before = Some(value),
                "sort" => params.sort.push(value),
                "page" => params.page = parse_integer("page", &value)?,
                "size" => params.size = parse_integer("size", &value)?,
                _ => {}
            }
        }
        Ok(params)
    }

    /// Whether the caller asked for a specific page or page size
    pub fn has_pagination(&self) -> bool {
        self.page.is_some() || self.size.is_some()
    }
}

/// Build criteria from raw inputs.
///
/// Missing page defaults to 0 and missing size to 20; both are then clamped.
/// Fails only on an unparseable date bound.
pub fn build_criteria(params: &SearchParams) -> Result<SearchCriteria> {
    let builder = SearchCriteriaBuilder {
        search_text: params.search.clone(),
        filters: FieldFilters {
            name: params.name.clone(),
            email: params.email.clone(),
            phone: params.phone.clone(),
            city: params.city.clone(),
            state: params.state.clone(),
            country: params.country.clone(),
            zip_code: params.zip_code.clone(),
        },
        created: DateRange {
            after: parse_date_time(params.created_after.as_deref())?,
            before: parse_date_time(params.created_before.as_deref())?,
        },
        updated: DateRange {
            after: parse_date_time(params.updated_after.as_deref())?,
            before: parse_date_time(params.updated_before.as_deref())?,
        },
        sort: parse_sort_expressions(&params.sort),
        page: params.page.unwrap_or(0),
        size: params.size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
    };
    Ok(builder.build())
}

/// Parse a list of sort expressions, keeping input order and dropping
/// blank or malformed entries.
pub fn parse_sort_expressions<S: AsRef<str>>(expressions: &[S]) -> Vec<SortKey> {
    expressions
        .iter()
        .filter_map(|e| parse_sort_expression(e.as_ref()))
        .collect()
}

/// Parse `"<field>"` or `"<field>,<asc|desc>"`.
///
/// Field and direction are case-insensitive and whitespace around the comma
/// is tolerated. Returns `None` for anything else, including unknown fields.
pub fn parse_sort_expression(expression: &str) -> Option<SortKey> {
    static SORT_REGEX: OnceLock<Regex> = OnceLock::new();

    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return None;
    }

    let regex = SORT_REGEX
        .get_or_init(|| Regex::new(r"(?i)^\s*([a-z]+)\s*,\s*(asc|desc)\s*$").unwrap());

    if let Some(caps) = regex.captures(trimmed) {
        let field = SortField::parse(&caps[1])?;
        let direction = if caps[2].eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        return Some(SortKey { field, direction });
    }

    SortField::parse(trimmed).map(SortKey::asc)
}

/// Parse an optional ISO-8601 local date-time (`YYYY-MM-DDTHH:MM:SS`).
///
/// Fractional seconds and the short `YYYY-MM-DDTHH:MM` form are accepted;
/// offsets are not. Blank input is `None`.
pub fn parse_date_time(value: Option<&str>) -> Result<Option<NaiveDateTime>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .map(Some)
        .map_err(|_| CustomerError::invalid_date(raw))
}

fn parse_integer(field: &str, value: &str) -> Result<Option<i64>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| CustomerError::InvalidInput {
            field: field.to_string(),
            message: format!("Parameter '{}' must be an integer, got '{}'", field, value),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::criteria::MAX_PAGE_SIZE;
    use chrono::NaiveDate;

    #[test]
    fn test_sort_expression_with_direction() {
        assert_eq!(
            parse_sort_expression("name,desc"),
            Some(SortKey::desc(SortField::Name))
        );
        assert_eq!(
            parse_sort_expression("  Email , ASC "),
            Some(SortKey::asc(SortField::Email))
        );
    }

    #[test]
    fn test_sort_expression_defaults_to_asc() {
        assert_eq!(
            parse_sort_expression("city"),
            Some(SortKey::asc(SortField::City))
        );
    }

    #[test]
    fn test_sort_aliases_normalize() {
        assert_eq!(
            parse_sort_expression("zip,desc").map(|k| k.field),
            parse_sort_expression("zipcode,desc").map(|k| k.field)
        );
        assert_eq!(
            parse_sort_expression("created").map(|k| k.field),
            Some(SortField::CreatedAt)
        );
        assert_eq!(
            parse_sort_expression("UPDATED,desc"),
            Some(SortKey::desc(SortField::UpdatedAt))
        );
    }

    #[test]
    fn test_invalid_sort_expressions_are_dropped() {
        assert_eq!(parse_sort_expression("invalidfield,desc"), None);
        assert_eq!(parse_sort_expression("name,sideways"), None);
        assert_eq!(parse_sort_expression("name,asc,extra"), None);
        assert_eq!(parse_sort_expression("created at"), None);
        assert_eq!(parse_sort_expression("   "), None);
    }

    #[test]
    fn test_sort_list_keeps_order_of_survivors() {
        let keys = parse_sort_expressions(&["", "country,desc", "bogus", "name"]);
        assert_eq!(
            keys,
            vec![SortKey::desc(SortField::Country), SortKey::asc(SortField::Name)]
        );
    }

    #[test]
    fn test_parse_date_time() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            parse_date_time(Some(" 2024-01-15T10:30:00 ")).unwrap(),
            Some(expected)
        );
        assert_eq!(
            parse_date_time(Some("2024-01-15T10:30")).unwrap(),
            Some(expected)
        );
        assert!(
            parse_date_time(Some("2024-01-15T10:30:00.250"))
                .unwrap()
                .is_some()
        );
        assert_eq!(parse_date_time(Some("  ")).unwrap(), None);
        assert_eq!(parse_date_time(None).unwrap(), None);
    }

    #[test]
    fn test_parse_date_time_rejects_bad_input() {
        for bad in ["2024-01-15", "15/01/2024 10:30", "2024-13-01T00:00:00", "yesterday"] {
            match parse_date_time(Some(bad)) {
                Err(CustomerError::DateFormat { value, .. }) => assert_eq!(value, bad),
                other => panic!("expected date error for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_build_criteria_defaults_and_clamps() {
        let criteria = build_criteria(&SearchParams::default()).unwrap();
        assert_eq!(criteria.page(), 0);
        assert_eq!(criteria.size(), DEFAULT_PAGE_SIZE);

        let params = SearchParams {
            page: Some(-2),
            size: Some(1000),
            ..Default::default()
        };
        let criteria = build_criteria(&params).unwrap();
        assert_eq!(criteria.page(), 0);
        assert_eq!(criteria.size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_build_criteria_trims_strings() {
        let params = SearchParams {
            search: Some("  bangalore ".to_string()),
            city: Some("   ".to_string()),
            ..Default::default()
        };
        let criteria = build_criteria(&params).unwrap();
        assert_eq!(criteria.search_text(), Some("bangalore"));
        assert!(!criteria.has_field_filters());
    }

    #[test]
    fn test_build_criteria_fails_on_bad_date() {
        let params = SearchParams {
            updated_before: Some("not-a-date".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            build_criteria(&params),
            Err(CustomerError::DateFormat { .. })
        ));
    }

    #[test]
    fn test_from_pairs() {
        let params = SearchParams::from_pairs(vec![
            ("search", "kumar"),
            ("zipCode", "400001"),
            ("sort", "name,asc"),
            ("sort", "created,desc"),
            ("page", "2"),
            ("size", " 5 "),
            ("unknown", "ignored"),
        ])
        .unwrap();

        assert_eq!(params.search.as_deref(), Some("kumar"));
        assert_eq!(params.zip_code.as_deref(), Some("400001"));
        assert_eq!(params.sort, vec!["name,asc", "created,desc"]);
        assert_eq!(params.page, Some(2));
        assert_eq!(params.size, Some(5));
        assert!(params.has_pagination());
    }

    #[test]
    fn test_from_pairs_rejects_non_integer_page() {
        let result = SearchParams::from_pairs(vec![("page", "two")]);
        assert!(matches!(
            result,
            Err(CustomerError::InvalidInput { ref field, .. }) if field == "page"
        ));
    }
}
