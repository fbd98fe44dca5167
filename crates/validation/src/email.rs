//! Bounded email address check.

use regex::Regex;
use std::sync::LazyLock;

/// Longest address accepted (RFC 5321 path limit), in bytes.
pub const EMAIL_MAX_LENGTH: usize = 254;

// Consecutive dots in the local part are accepted on purpose; the pattern is
// kept exactly as the stored-account rules define it.
static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

/// Returns true when `candidate` looks like an email address.
///
/// The length gate runs before the pattern so oversized input is rejected
/// without scanning it.
#[must_use]
pub fn is_valid_email(candidate: &str) -> bool {
    if candidate.is_empty() || candidate.len() > EMAIL_MAX_LENGTH {
        return false;
    }
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(candidate))
}
