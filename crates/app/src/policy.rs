//! Response policy derived from the service config.

use storefront_api::v1::{ApiV1SameSite, ApiV1SessionCookie};
use storefront_config::{SameSite, SessionCookiePolicy, ValidatedServiceConfig};
use storefront_shared::SecretString;

/// Fallback 500 message for product handlers.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Environment-dependent response behavior shared by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsePolicy {
    /// Put the underlying error message in 500 responses.
    pub expose_internal_errors: bool,
    /// Attributes of the session cookie set on login.
    pub session_cookie: SessionCookiePolicy,
}

impl ResponsePolicy {
    /// Policy for a validated config.
    #[must_use]
    pub fn from_config(config: &ValidatedServiceConfig) -> Self {
        Self {
            expose_internal_errors: config.environment().exposes_internal_errors(),
            session_cookie: config.session_cookie_policy(),
        }
    }

    /// Session cookie carrying `token`.
    #[must_use]
    pub fn session_cookie(&self, token: SecretString) -> ApiV1SessionCookie {
        let policy = &self.session_cookie;
        ApiV1SessionCookie {
            name: policy.name.to_string(),
            token,
            max_age_ms: policy.max_age_ms,
            same_site: match policy.same_site {
                SameSite::Lax => ApiV1SameSite::Lax,
                SameSite::None => ApiV1SameSite::None,
            },
            http_only: policy.http_only,
            secure: policy.secure,
        }
    }
}

impl Default for ResponsePolicy {
    fn default() -> Self {
        Self::from_config(&ValidatedServiceConfig::default())
    }
}
