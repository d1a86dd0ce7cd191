use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{DomainError, DomainResult};

const MAX_LENGTH: usize = 255;

// addr-spec with a dot-atom local part and a dotted domain of hostname labels.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?$",
    )
    .expect("static email pattern compiles")
});

/// Normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn from_string(value: &str) -> DomainResult<Self> {
        let normalized = value.trim().to_lowercase();

        if normalized.chars().count() > MAX_LENGTH {
            return Err(DomainError::validation(format!(
                "Email address must be at most {MAX_LENGTH} characters"
            )));
        }
        if !EMAIL_PATTERN.is_match(&normalized) {
            return Err(DomainError::validation(format!(
                "'{}' is not a valid email address",
                value.trim()
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Log-safe rendering: `j***@example.com`.
    pub fn masked(&self) -> String {
        match self.0.split_once('@') {
            Some((local, domain)) => {
                let first = local.chars().next().map(String::from).unwrap_or_default();
                format!("{first}***@{domain}")
            }
            None => "***".to_string(),
        }
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_addresses() {
        for input in [
            "jane@example.com",
            "jane.doe+blog@mail.example.co.uk",
            "o'brien@example.org",
            "x_y-z@sub-domain.example.io",
        ] {
            assert!(EmailAddress::from_string(input).is_ok(), "{input} should be valid");
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for input in [
            "",
            "plainaddress",
            "@example.com",
            "jane@",
            "jane@localhost",
            "jane..doe@example.com",
            ".jane@example.com",
            "jane@-example.com",
            "jane doe@example.com",
            "jane@example..com",
        ] {
            assert!(
                matches!(EmailAddress::from_string(input), Err(DomainError::Validation(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_equality_uses_normalized_value() {
        let a = EmailAddress::from_string("  Jane@Example.COM ").unwrap();
        let b = EmailAddress::from_string("jane@example.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "jane@example.com");
    }

    #[test]
    fn test_length_limit() {
        let domain = format!("{}.com", "a".repeat(60));
        let local = "b".repeat(255 - domain.len() - 1);
        let at_limit = format!("{local}@{domain}");
        assert_eq!(at_limit.len(), 255);
        assert!(EmailAddress::from_string(&at_limit).is_ok());

        let over = format!("b{at_limit}");
        assert!(EmailAddress::from_string(&over).is_err());
    }

    #[test]
    fn test_masked() {
        let email = EmailAddress::from_string("jane@example.com").unwrap();
        assert_eq!(email.masked(), "j***@example.com");
    }
}
