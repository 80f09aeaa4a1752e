//! Field checks shared by the contact and newsletter forms.

use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Rejections a visitor can fix. The `Display` text is shown to them verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingRequiredFields { fields: Vec<&'static str> },

    #[error("Email address is required")]
    EmailRequired,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Invalid inquiry type")]
    InvalidInquiryType(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Loose shape check: something, `@`, something, `.`, something; no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_email(email: &str) -> ValidationResult<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Trimmed value of an optional form field, or `None` when absent or blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("sales@kattali.com.bd"));
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@signs.com"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaced out@mail.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_validate_email_error_message() {
        let err = validate_email("nope").unwrap_err();
        assert_eq!(err.to_string(), "Invalid email address");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Rahim ")), Some("Rahim".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
