//! Environment variable parsing and env-to-config merging.
//!
//! Parsing is strict: a variable that is present but empty or malformed fails
//! instead of silently falling back to the file or default value.

use crate::schema::{Environment, ServiceConfig, ValidatedServiceConfig};
use std::collections::BTreeMap;
use storefront_shared::{ErrorCode, ErrorEnvelope};
use thiserror::Error;

/// Env var: deployment environment (`dev` or `prod`).
pub const ENV_ENVIRONMENT: &str = "STOREFRONT_ENV";
/// Legacy alias for [`ENV_ENVIRONMENT`].
pub const ENV_ENVIRONMENT_ALIAS: &str = "NODE_ENV";
/// Env var: minimum log level.
pub const ENV_LOG_LEVEL: &str = "STOREFRONT_LOG_LEVEL";
/// Env var: emit JSON log lines.
pub const ENV_LOG_JSON: &str = "STOREFRONT_LOG_JSON";
/// Env var: HTTP listen port.
pub const ENV_PORT: &str = "STOREFRONT_PORT";
/// Env var: origin allowed for credentialed requests.
pub const ENV_CLIENT_ORIGIN: &str = "STOREFRONT_CLIENT_ORIGIN";

const ALL_VARS: [&str; 6] = [
    ENV_ENVIRONMENT,
    ENV_ENVIRONMENT_ALIAS,
    ENV_LOG_LEVEL,
    ENV_LOG_JSON,
    ENV_PORT,
    ENV_CLIENT_ORIGIN,
];

/// Parsed env overrides. `None` means the variable was not set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceEnv {
    /// Deployment environment.
    pub environment: Option<Environment>,
    /// Log level, trimmed; validated when merged.
    pub log_level: Option<String>,
    /// JSON log output toggle.
    pub log_json: Option<bool>,
    /// Listen port.
    pub port: Option<u16>,
    /// Client origin, trimmed; validated when merged.
    pub client_origin: Option<String>,
}

impl ServiceEnv {
    /// Parse env overrides from a key/value map.
    ///
    /// `STOREFRONT_ENV` wins over `NODE_ENV` when both are set.
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        let environment = match parse_optional_environment(map, ENV_ENVIRONMENT)? {
            Some(environment) => Some(environment),
            None => parse_optional_environment(map, ENV_ENVIRONMENT_ALIAS)?,
        };
        Ok(Self {
            environment,
            log_level: parse_optional_trimmed(map, ENV_LOG_LEVEL)?,
            log_json: parse_optional_bool(map, ENV_LOG_JSON)?,
            port: parse_optional_port(map, ENV_PORT)?,
            client_origin: parse_optional_trimmed(map, ENV_CLIENT_ORIGIN)?,
        })
    }

    /// Parse env overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = ALL_VARS
            .iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| ((*name).to_owned(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// True when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.environment.is_none()
            && self.log_level.is_none()
            && self.log_json.is_none()
            && self.port.is_none()
            && self.client_origin.is_none()
    }
}

/// Apply env overrides on top of `base`, then validate and normalize.
pub fn apply_env_overrides(
    base: ServiceConfig,
    env: &ServiceEnv,
) -> Result<ValidatedServiceConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(environment) = env.environment {
        config.environment = environment;
    }
    if let Some(level) = &env.log_level {
        config.logging.level = level.as_str().into();
    }
    if let Some(json) = env.log_json {
        config.logging.json = json;
    }
    if let Some(port) = env.port {
        config.http.port = port;
    }
    if let Some(origin) = &env.client_origin {
        config.http.client_origin = Some(origin.as_str().into());
    }
    config.validate_and_normalize().map_err(Into::into)
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvParseError {
    /// Present but empty after trimming.
    #[error("{var} must not be empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean had an invalid value.
    #[error("{var} must be true/false/1/0/yes/no")]
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Port was not an integer in `1..=65535`.
    #[error("{var} must be an integer between 1 and 65535")]
    InvalidPort {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Environment name was not recognized.
    #[error("{var} must be dev or prod")]
    InvalidEnvironment {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "env_empty_value"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "env_invalid_bool"),
            Self::InvalidPort { .. } => ErrorCode::new("config", "env_invalid_port"),
            Self::InvalidEnvironment { .. } => ErrorCode::new("config", "env_invalid_environment"),
        }
    }
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let envelope = Self::expected(error.error_code(), error.to_string());
        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value }
            | EnvParseError::InvalidPort { var, value }
            | EnvParseError::InvalidEnvironment { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}

fn non_empty<'a>(
    map: &'a BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<&'a str>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    Ok(Some(trimmed))
}

fn parse_optional_trimmed(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<String>, EnvParseError> {
    Ok(non_empty(map, var)?.map(str::to_owned))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(value) = non_empty(map, var)? else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: value.to_owned(),
        }),
    }
}

fn parse_optional_port(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<u16>, EnvParseError> {
    let Some(value) = non_empty(map, var)? else {
        return Ok(None);
    };
    match value.parse::<u16>() {
        Ok(port) if port > 0 => Ok(Some(port)),
        _ => Err(EnvParseError::InvalidPort {
            var,
            value: value.to_owned(),
        }),
    }
}

fn parse_optional_environment(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Environment>, EnvParseError> {
    let Some(value) = non_empty(map, var)? else {
        return Ok(None);
    };
    Environment::parse(value)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnvironment {
            var,
            value: value.to_owned(),
        })
}
