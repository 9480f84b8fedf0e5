//! Entity validation and normalization
//!
//! Constructors of [`Customer`](crate::core::Customer) and
//! [`Address`](crate::core::Address) route every field through these helpers,
//! so stored entities are always trimmed, non-blank and carry a well-formed,
//! lower-cased email.

pub mod email;

use crate::core::error::ValidationError;

pub use email::check_email;

/// Trim a required field, rejecting missing or blank input.
pub fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::blank(field));
    }
    Ok(trimmed.to_string())
}

/// Validate an email and return its normalized (trimmed, lower-cased) form.
pub fn normalized_email(value: &str) -> Result<String, ValidationError> {
    let trimmed = required("email", value)?;
    check_email(&trimmed).map_err(|reason| ValidationError::InvalidEmail {
        email: trimmed.clone(),
        reason,
    })?;
    Ok(trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::EmailFormatError;

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Priya Sharma ").unwrap(), "Priya Sharma");
    }

    #[test]
    fn test_required_rejects_blank() {
        let err = required("phone", "   ").unwrap_err();
        assert!(matches!(err, ValidationError::BlankField { ref field } if field == "phone"));
    }

    #[test]
    fn test_normalized_email_lowercases() {
        assert_eq!(
            normalized_email("  Priya.Sharma@Example.COM ").unwrap(),
            "priya.sharma@example.com"
        );
    }

    #[test]
    fn test_normalized_email_reports_reason() {
        match normalized_email("priya.example.com") {
            Err(ValidationError::InvalidEmail { email, reason }) => {
                assert_eq!(email, "priya.example.com");
                assert_eq!(reason, EmailFormatError::MissingAtSymbol);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_normalized_email_blank_is_blank_field() {
        assert!(matches!(
            normalized_email(""),
            Err(ValidationError::BlankField { .. })
        ));
    }
}
