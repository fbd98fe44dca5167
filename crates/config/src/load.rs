//! Config loading helpers (defaults + file + env).
//!
//! The loader owns the merge order and reports user-facing failures as
//! `ErrorEnvelope`s under the `config` namespace.

use crate::{ServiceConfig, ServiceEnv, ValidatedServiceConfig, apply_env_overrides};
use std::path::Path;
use storefront_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Supported config file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

/// Load the service config from in-memory sources.
///
/// Precedence (highest wins):
/// - env overrides (`ServiceEnv`)
/// - config document
/// - defaults (`ServiceConfig::default()`)
pub fn load_service_config_from_sources(
    config_text: Option<(&str, ConfigFormat)>,
    env: &ServiceEnv,
) -> Result<ValidatedServiceConfig, ErrorEnvelope> {
    let config = match config_text {
        None => ServiceConfig::default(),
        Some((input, format)) => parse_config_unvalidated(input, format)?,
    };
    apply_env_overrides(config, env)
}

/// Load the service config from an optional file path.
pub fn load_service_config_from_path(
    config_path: Option<&Path>,
    env: &ServiceEnv,
) -> Result<ValidatedServiceConfig, ErrorEnvelope> {
    let config = match config_path {
        None => ServiceConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };
    tracing::debug!(
        path = ?config_path,
        env_overrides = !env.is_empty(),
        "merging service config"
    );
    apply_env_overrides(config, env)
}

/// Load the service config from the process env and an optional file path.
pub fn load_service_config_std_env(
    config_path: Option<&Path>,
) -> Result<ValidatedServiceConfig, ErrorEnvelope> {
    let env = ServiceEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_service_config_from_path(config_path, &env)
}

/// Serialize the config as pretty JSON with a trailing newline.
pub fn to_pretty_json(config: &ServiceConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_json"),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as pretty TOML with a trailing newline.
pub fn to_pretty_toml(config: &ServiceConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Pick the format from the file extension; no extension means JSON.
pub fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        None | Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        Some(other) => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "unsupported config format; use .json or .toml",
        )
        .with_metadata("extension", other.to_string())),
    }
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<ServiceConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };
        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}
