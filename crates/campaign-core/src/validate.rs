//! Recipient address checks

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// local@domain.tld with no whitespace and a single `@`
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// Loose shape check for a recipient address
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_RE.is_match(email)
}
