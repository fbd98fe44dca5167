//! Service configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation returns typed errors mapped to `ErrorEnvelope`.
//! - Normalization trims strings and lower-cases the log level.

use serde::{Deserialize, Serialize};
use std::fmt;
use storefront_shared::{ErrorCode, ErrorEnvelope};
use thiserror::Error;
use url::Url;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const SESSION_MAX_AGE_MIN_MS: u64 = 60_000;
const SESSION_MAX_AGE_MAX_MS: u64 = 30 * 24 * 3_600_000;
const DEFAULT_SESSION_MAX_AGE_MS: u64 = 24 * 3_600_000;

/// Deployment environment.
///
/// `Dev` exposes underlying failure messages in 500 responses; `Prod`
/// replaces them with fixed messages and hardens session cookies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development.
    #[default]
    Dev,
    /// Production.
    Prod,
}

impl Environment {
    /// Parse `dev`/`development` or `prod`/`production`, case-insensitively.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Some(Self::Dev),
            "prod" | "production" => Some(Self::Prod),
            _ => None,
        }
    }

    /// Lower-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        }
    }

    /// Whether 500 responses carry the underlying error message.
    #[must_use]
    pub const fn exposes_internal_errors(self) -> bool {
        matches!(self, Self::Dev)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ServiceConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Deployment environment.
    pub environment: Environment,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// HTTP surface settings.
    pub http: HttpConfig,
    /// Session cookie settings.
    pub session: SessionConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            environment: Environment::default(),
            logging: LoggingConfig::default(),
            http: HttpConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<ValidatedServiceConfig, ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        self.logging.normalize_and_validate()?;
        self.http.normalize_and_validate()?;
        self.session.normalize_and_validate()?;
        Ok(ValidatedServiceConfig(self))
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Minimum level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: Box<str>,
    /// Emit one JSON object per line instead of human-readable text.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
        }
    }
}

impl LoggingConfig {
    fn normalize_and_validate(&mut self) -> Result<(), ConfigSchemaError> {
        let level = self.level.trim().to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigSchemaError::InvalidLogLevel { value: level });
        }
        self.level = level.into_boxed_str();
        Ok(())
    }
}

/// HTTP surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct HttpConfig {
    /// Listen port.
    pub port: u16,
    /// Origin allowed to send credentialed cross-origin requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_origin: Option<Box<str>>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            client_origin: None,
        }
    }
}

impl HttpConfig {
    fn normalize_and_validate(&mut self) -> Result<(), ConfigSchemaError> {
        if self.port == 0 {
            return Err(ConfigSchemaError::InvalidPort);
        }
        let Some(origin) = self.client_origin.take() else {
            return Ok(());
        };
        let trimmed = origin.trim();
        let parsed = Url::parse(trimmed).map_err(|_| ConfigSchemaError::InvalidClientOrigin {
            value: trimmed.to_owned(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(ConfigSchemaError::InvalidClientOrigin {
                value: trimmed.to_owned(),
            });
        }
        self.client_origin = Some(parsed.origin().ascii_serialization().into_boxed_str());
        Ok(())
    }
}

/// Session cookie settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct SessionConfig {
    /// Cookie carrying the session token.
    pub cookie_name: Box<str>,
    /// Cookie lifetime in milliseconds.
    pub max_age_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "accessToken".into(),
            max_age_ms: DEFAULT_SESSION_MAX_AGE_MS,
        }
    }
}

impl SessionConfig {
    fn normalize_and_validate(&mut self) -> Result<(), ConfigSchemaError> {
        let name = self.cookie_name.trim();
        if name.is_empty()
            || !name
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
        {
            return Err(ConfigSchemaError::InvalidCookieName {
                value: name.to_owned(),
            });
        }
        self.cookie_name = name.into();
        if !(SESSION_MAX_AGE_MIN_MS..=SESSION_MAX_AGE_MAX_MS).contains(&self.max_age_ms) {
            return Err(ConfigSchemaError::MaxAgeOutOfRange {
                value_ms: self.max_age_ms,
                min_ms: SESSION_MAX_AGE_MIN_MS,
                max_ms: SESSION_MAX_AGE_MAX_MS,
            });
        }
        Ok(())
    }
}

/// `SameSite` attribute of the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SameSite {
    /// `SameSite=Lax`.
    Lax,
    /// `SameSite=None`; requires `Secure`.
    None,
}

/// Attributes attached to the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookiePolicy {
    /// Cookie name.
    pub name: Box<str>,
    /// Lifetime in milliseconds.
    pub max_age_ms: u64,
    /// `SameSite` attribute.
    pub same_site: SameSite,
    /// `HttpOnly` attribute.
    pub http_only: bool,
    /// `Secure` attribute.
    pub secure: bool,
}

/// Config that passed validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedServiceConfig(ServiceConfig);

impl ValidatedServiceConfig {
    /// Borrow the normalized config.
    #[must_use]
    pub const fn as_config(&self) -> &ServiceConfig {
        &self.0
    }

    /// Consume and return the normalized config.
    #[must_use]
    pub fn into_inner(self) -> ServiceConfig {
        self.0
    }

    /// Deployment environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.0.environment
    }

    /// Cookie attributes for the configured environment.
    ///
    /// Production cookies are cross-site and secure; development cookies are
    /// `Lax` over plain HTTP.
    #[must_use]
    pub fn session_cookie_policy(&self) -> SessionCookiePolicy {
        let prod = matches!(self.0.environment, Environment::Prod);
        SessionCookiePolicy {
            name: self.0.session.cookie_name.clone(),
            max_age_ms: self.0.session.max_age_ms,
            same_site: if prod { SameSite::None } else { SameSite::Lax },
            http_only: true,
            secure: prod,
        }
    }
}

impl Default for ValidatedServiceConfig {
    fn default() -> Self {
        Self(ServiceConfig::default())
    }
}

/// Parse and validate a JSON config document.
pub fn parse_service_config_json(input: &str) -> Result<ValidatedServiceConfig, ErrorEnvelope> {
    let config: ServiceConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;
    config.validate_and_normalize().map_err(ErrorEnvelope::from)
}

/// Parse and validate a TOML config document.
pub fn parse_service_config_toml(input: &str) -> Result<ValidatedServiceConfig, ErrorEnvelope> {
    let config: ServiceConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;
    config.validate_and_normalize().map_err(ErrorEnvelope::from)
}

/// Schema validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    #[error("config version {found} is not supported (expected {supported})")]
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// Unknown log level.
    #[error("logging.level must be one of trace, debug, info, warn, error")]
    InvalidLogLevel {
        /// Normalized value provided.
        value: String,
    },
    /// Port zero.
    #[error("http.port must be between 1 and 65535")]
    InvalidPort,
    /// Client origin is not an absolute http(s) URL.
    #[error("http.clientOrigin must be an absolute http(s) origin")]
    InvalidClientOrigin {
        /// Trimmed value provided.
        value: String,
    },
    /// Cookie name is empty or contains unsupported characters.
    #[error("session.cookieName must be non-empty and use [A-Za-z0-9_-]")]
    InvalidCookieName {
        /// Trimmed value provided.
        value: String,
    },
    /// Cookie lifetime out of bounds.
    #[error("session.maxAgeMs must be between {min_ms} and {max_ms}")]
    MaxAgeOutOfRange {
        /// Value provided.
        value_ms: u64,
        /// Minimum allowed value.
        min_ms: u64,
        /// Maximum allowed value.
        max_ms: u64,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidLogLevel { .. } => ErrorCode::new("config", "invalid_log_level"),
            Self::InvalidPort => ErrorCode::new("config", "invalid_port"),
            Self::InvalidClientOrigin { .. } => ErrorCode::new("config", "invalid_client_origin"),
            Self::InvalidCookieName { .. } => ErrorCode::new("config", "invalid_cookie_name"),
            Self::MaxAgeOutOfRange { .. } => ErrorCode::new("config", "invalid_session_max_age"),
        }
    }
}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::InvalidLogLevel { value }
            | ConfigSchemaError::InvalidClientOrigin { value }
            | ConfigSchemaError::InvalidCookieName { value } => envelope.with_metadata("value", value),
            ConfigSchemaError::InvalidPort => envelope,
            ConfigSchemaError::MaxAgeOutOfRange { value_ms, .. } => {
                envelope.with_metadata("value", value_ms.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() -> Result<(), ConfigSchemaError> {
        let config = ServiceConfig::default().validate_and_normalize()?;
        assert_eq!(config.environment(), Environment::Dev);
        assert_eq!(config.as_config().http.port, 8080);
        Ok(())
    }

    #[test]
    fn cookie_policy_follows_environment() -> Result<(), ConfigSchemaError> {
        let dev = ServiceConfig::default().validate_and_normalize()?;
        let dev_policy = dev.session_cookie_policy();
        assert_eq!(dev_policy.same_site, SameSite::Lax);
        assert!(!dev_policy.secure);
        assert!(dev_policy.http_only);
        assert_eq!(dev_policy.max_age_ms, 86_400_000);

        let prod = ServiceConfig {
            environment: Environment::Prod,
            ..ServiceConfig::default()
        }
        .validate_and_normalize()?;
        let prod_policy = prod.session_cookie_policy();
        assert_eq!(prod_policy.same_site, SameSite::None);
        assert!(prod_policy.secure);
        Ok(())
    }

    #[test]
    fn log_level_is_normalized() -> Result<(), ConfigSchemaError> {
        let mut config = ServiceConfig::default();
        config.logging.level = " DEBUG ".into();
        let config = config.validate_and_normalize()?;
        assert_eq!(config.as_config().logging.level.as_ref(), "debug");
        Ok(())
    }

    #[test]
    fn client_origin_is_reduced_to_origin() -> Result<(), ConfigSchemaError> {
        let mut config = ServiceConfig::default();
        config.http.client_origin = Some(" https://shop.example.com/app/ ".into());
        let config = config.validate_and_normalize()?;
        assert_eq!(
            config.as_config().http.client_origin.as_deref(),
            Some("https://shop.example.com")
        );
        Ok(())
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = ServiceConfig::default();
        config.http.client_origin = Some("ftp://files".into());
        assert!(matches!(
            config.validate_and_normalize(),
            Err(ConfigSchemaError::InvalidClientOrigin { .. })
        ));

        let mut config = ServiceConfig::default();
        config.http.port = 0;
        assert_eq!(
            config.validate_and_normalize(),
            Err(ConfigSchemaError::InvalidPort)
        );

        let mut config = ServiceConfig::default();
        config.session.max_age_ms = 5;
        let error = config.validate_and_normalize().err();
        assert!(matches!(
            error,
            Some(ConfigSchemaError::MaxAgeOutOfRange { value_ms: 5, .. })
        ));
    }

    #[test]
    fn environment_parses_aliases() {
        assert_eq!(Environment::parse("Production"), Some(Environment::Prod));
        assert_eq!(Environment::parse("dev"), Some(Environment::Dev));
        assert_eq!(Environment::parse("staging"), None);
        assert!(Environment::Dev.exposes_internal_errors());
    }
}
