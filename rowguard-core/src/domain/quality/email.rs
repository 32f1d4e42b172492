// rowguard-core/src/domain/quality/email.rs

use regex::Regex;
use std::sync::OnceLock;

// local@label(.label)+ : one '@', no whitespace anywhere, no empty domain label.
fn re_email() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)+$")
            .unwrap_or_else(|_| Regex::new("$^").unwrap_or_else(|_| unreachable!()))
    })
}

/// Syntactic email check. No DNS or mailbox verification.
pub fn is_valid_email(email: Option<&str>) -> bool {
    match email {
        Some(value) if !value.is_empty() => re_email().is_match(value),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_standard_addresses() {
        for email in [
            "john@example.com",
            "first.last+tag@sub.example.co.uk",
            "o'brien@example.ie",
            "X_Y%Z@host-1.io",
        ] {
            assert!(is_valid_email(Some(email)), "{email} should be valid");
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for email in [
            "not-an-email",
            "john.example.com",
            "john@example",
            "@example.com",
            "john@",
            "john@@example.com",
            "jo@hn@example.com",
            "john@.example.com",
            "john@example.",
            "john@example..com",
            "john doe@example.com",
            "john@exa mple.com",
            " john@example.com",
            "john@example.com\n",
            "john@example.com\t",
        ] {
            assert!(!is_valid_email(Some(email)), "{email:?} should be invalid");
        }
    }

    #[test]
    fn test_rejects_empty_and_null() {
        assert!(!is_valid_email(Some("")));
        assert!(!is_valid_email(None));
    }
}
