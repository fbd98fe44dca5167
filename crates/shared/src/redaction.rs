//! Secret detection and redaction utilities.
//!
//! Provides consistent logic for detecting sensitive keys/variables and
//! redacting their values in error messages and logs.

/// Checks if a key/variable name likely refers to a secret.
///
/// Uses case-insensitive pattern matching to detect common secret-related
/// naming conventions.
///
/// # Examples
///
/// ```
/// use storefront_shared::is_secret_key;
///
/// assert!(is_secret_key("API_KEY"));
/// assert!(is_secret_key("password"));
/// assert!(is_secret_key("STOREFRONT_SESSION_TOKEN"));
/// assert!(!is_secret_key("LOG_LEVEL"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_uppercase();
    key.contains("KEY")
        || key.contains("TOKEN")
        || key.contains("SECRET")
        || key.contains("PASSWORD")
        || key.contains("CREDENTIAL")
        || key.contains("AUTH")
}

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

/// A secret string wrapper that redacts on Display/Debug.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SecretString(Box<str>);

impl SecretString {
    /// Wrap a secret value.
    pub fn new(value: impl Into<Box<str>>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Consume and return the underlying secret.
    pub fn into_inner(self) -> Box<str> {
        self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(REDACTED)
    }
}

impl AsRef<str> for SecretString {
    fn as_ref(&self) -> &str {
        self.expose()
    }
}

impl From<Box<str>> for SecretString {
    fn from(value: Box<str>) -> Self {
        Self(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value.into_boxed_str())
    }
}

impl<'de> serde::Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// Serializes as the redaction placeholder; the secret never leaves the process.
impl serde::Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_secret_patterns() {
        // API keys
        assert!(is_secret_key("API_KEY"));
        assert!(is_secret_key("api_key"));

        // Tokens
        assert!(is_secret_key("ACCESS_TOKEN"));
        assert!(is_secret_key("refresh_token"));
        assert!(is_secret_key("JWT_TOKEN"));

        // Secrets
        assert!(is_secret_key("CLIENT_SECRET"));
        assert!(is_secret_key("secret_value"));

        // Passwords
        assert!(is_secret_key("DB_PASSWORD"));
        assert!(is_secret_key("user_password"));

        // Credentials
        assert!(is_secret_key("AWS_CREDENTIAL"));
        assert!(is_secret_key("credentials"));

        // Auth
        assert!(is_secret_key("basic_auth"));
        assert!(is_secret_key("accessToken"));
    }

    #[test]
    fn rejects_non_secret_patterns() {
        assert!(!is_secret_key("LOG_LEVEL"));
        assert!(!is_secret_key("PORT"));
        assert!(!is_secret_key("DATABASE_URL"));
        assert!(!is_secret_key("TIMEOUT_MS"));
        assert!(!is_secret_key("title"));
        assert!(!is_secret_key("email"));
    }

    #[test]
    fn secret_string_redacts_display() {
        let secret = SecretString::new("shh");
        assert_eq!(secret.to_string(), REDACTED);
    }

    #[test]
    fn secret_string_deserializes_plain_and_serializes_redacted() -> Result<(), serde_json::Error> {
        let secret: SecretString = serde_json::from_str("\"hunter22\"")?;
        assert_eq!(secret.expose(), "hunter22");
        assert_eq!(serde_json::to_string(&secret)?, "\"[REDACTED]\"");
        Ok(())
    }
}
