use crate::error::{GiftsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Email validation
// ---------------------------------------------------------------------------

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

pub fn validate_email(email: &str) -> Result<()> {
    if !email_re().is_match(email) {
        return Err(GiftsError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(GiftsError::EmptyName);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The display name + email pair that keys durable storage and lets a user
/// resume a plan later by re-entering the email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Validate and normalize (trim) the captured inputs.
    pub fn new(name: &str, email: &str) -> Result<Self> {
        let name = name.trim();
        let email = email.trim();
        validate_name(name)?;
        validate_email(email)?;
        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        for email in ["a@b.co", "first.last@example.org", "x+tag@sub.domain.io"] {
            validate_email(email).unwrap_or_else(|_| panic!("expected valid: {email}"));
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in ["bad-email", "a@b", "@b.co", "a@.co", "a b@c.co", ""] {
            assert!(validate_email(email).is_err(), "expected invalid: {email}");
        }
    }

    #[test]
    fn rejects_blank_names() {
        assert!(matches!(validate_name(""), Err(GiftsError::EmptyName)));
        assert!(matches!(validate_name("   "), Err(GiftsError::EmptyName)));
        validate_name("Ana").unwrap();
    }

    #[test]
    fn identity_trims_inputs() {
        let identity = Identity::new("  Ana  ", " ana@example.com ").unwrap();
        assert_eq!(identity.name, "Ana");
        assert_eq!(identity.email, "ana@example.com");
    }
}
