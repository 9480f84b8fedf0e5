//! Email address format validation
//!
//! Checks run in a fixed order and the first failing rule is reported, so a
//! caller always gets the most basic problem first (length, then `@` count,
//! then local part, then domain).

use crate::core::error::EmailFormatError;
use regex::Regex;
use std::sync::OnceLock;

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Validate an email address, returning the first rule it breaks.
///
/// Surrounding whitespace is ignored.
pub fn check_email(email: &str) -> Result<(), EmailFormatError> {
    let email = email.trim();

    if email.len() > MAX_EMAIL_LEN {
        return Err(EmailFormatError::TooLong);
    }

    match email.matches('@').count() {
        0 => return Err(EmailFormatError::MissingAtSymbol),
        1 => {}
        _ => return Err(EmailFormatError::MultipleAtSymbols),
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or(EmailFormatError::MissingAtSymbol)?;

    check_local_part(local)?;
    check_domain_part(domain)
}

fn check_local_part(local: &str) -> Result<(), EmailFormatError> {
    static LOCAL_REGEX: OnceLock<Regex> = OnceLock::new();

    if local.is_empty() {
        return Err(EmailFormatError::InvalidLocalPart);
    }
    if local.len() > MAX_LOCAL_LEN {
        return Err(EmailFormatError::LocalPartTooLong);
    }
    if local.starts_with('.') || local.ends_with('.') {
        return Err(EmailFormatError::StartsOrEndsWithDot);
    }
    if local.contains("..") {
        return Err(EmailFormatError::ConsecutiveDots);
    }

    let regex = LOCAL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*$")
            .unwrap()
    });
    if !regex.is_match(local) {
        return Err(EmailFormatError::InvalidLocalPart);
    }

    Ok(())
}

fn check_domain_part(domain: &str) -> Result<(), EmailFormatError> {
    static LABEL_REGEX: OnceLock<Regex> = OnceLock::new();

    if domain.is_empty() {
        return Err(EmailFormatError::InvalidDomainPart);
    }
    if domain.len() > MAX_DOMAIN_LEN {
        return Err(EmailFormatError::DomainTooLong);
    }
    if !domain.contains('.') {
        return Err(EmailFormatError::InvalidDomainPart);
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(EmailFormatError::StartsOrEndsWithDot);
    }
    if domain.starts_with('-') || domain.ends_with('-') {
        return Err(EmailFormatError::InvalidDomainPart);
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(EmailFormatError::InvalidDomainPart);
    }

    let label_regex = LABEL_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9-]+$").unwrap());
    let valid_label = |label: &&str| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label_regex.is_match(label)
    };
    if !labels.iter().all(valid_label) {
        return Err(EmailFormatError::InvalidDomainPart);
    }

    let tld = labels[labels.len() - 1];
    if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(EmailFormatError::InvalidTld);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_addresses() {
        assert!(check_email("rajesh.kumar@example.com").is_ok());
        assert!(check_email("user.name+tag@example.co.uk").is_ok());
        assert!(check_email("  priya@mail.example.in  ").is_ok());
        assert!(check_email("o'neil@sub-domain.example.org").is_ok());
    }

    #[test]
    fn test_at_symbol_rules() {
        assert_eq!(check_email("invalid-email"), Err(EmailFormatError::MissingAtSymbol));
        assert_eq!(check_email("a@b@c.com"), Err(EmailFormatError::MultipleAtSymbols));
    }

    #[test]
    fn test_local_part_rules() {
        assert_eq!(check_email("@example.com"), Err(EmailFormatError::InvalidLocalPart));
        assert_eq!(check_email(".amit@example.com"), Err(EmailFormatError::StartsOrEndsWithDot));
        assert_eq!(check_email("amit..patel@example.com"), Err(EmailFormatError::ConsecutiveDots));
        assert_eq!(check_email("amit patel@example.com"), Err(EmailFormatError::InvalidLocalPart));

        let long_local = format!("{}@example.com", "a".repeat(65));
        assert_eq!(check_email(&long_local), Err(EmailFormatError::LocalPartTooLong));
    }

    #[test]
    fn test_domain_part_rules() {
        assert_eq!(check_email("amit@localhost"), Err(EmailFormatError::InvalidDomainPart));
        assert_eq!(check_email("amit@.example.com"), Err(EmailFormatError::StartsOrEndsWithDot));
        assert_eq!(check_email("amit@example.com."), Err(EmailFormatError::StartsOrEndsWithDot));
        assert_eq!(check_email("amit@-example.com"), Err(EmailFormatError::InvalidDomainPart));
        assert_eq!(check_email("amit@exa_mple.com"), Err(EmailFormatError::InvalidDomainPart));
        assert_eq!(check_email("amit@example..com"), Err(EmailFormatError::InvalidDomainPart));
    }

    #[test]
    fn test_tld_rules() {
        assert_eq!(check_email("amit@example.c"), Err(EmailFormatError::InvalidTld));
        assert_eq!(check_email("amit@example.c0m"), Err(EmailFormatError::InvalidTld));
    }

    #[test]
    fn test_too_long() {
        let email = format!("user@{}.com", "a".repeat(250));
        assert_eq!(check_email(&email), Err(EmailFormatError::TooLong));
    }
}
