//! # storefront-config
//!
//! Service configuration schema, validation, and loading.
//! This crate depends on `shared` only.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_CLIENT_ORIGIN, ENV_ENVIRONMENT, ENV_ENVIRONMENT_ALIAS, ENV_LOG_JSON, ENV_LOG_LEVEL,
    ENV_PORT, EnvParseError, ServiceEnv, apply_env_overrides,
};
pub use load::{
    ConfigFormat, detect_config_format, load_service_config_from_path,
    load_service_config_from_sources, load_service_config_std_env, to_pretty_json,
    to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, Environment, HttpConfig, LoggingConfig, SameSite,
    ServiceConfig, SessionConfig, SessionCookiePolicy, ValidatedServiceConfig,
    parse_service_config_json, parse_service_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
