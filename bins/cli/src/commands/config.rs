use crate::error::{CliError, ExitCode};
use crate::format::{CliOutput, OutputMode, format_error_output, log_info, pretty_json};
use std::collections::BTreeMap;
use std::path::Path;
use storefront_config::{
    ServiceEnv, ValidatedServiceConfig, load_service_config_from_path, to_pretty_json,
    to_pretty_toml,
};
use storefront_shared::ErrorEnvelope;

/// Serialization used for the effective config in text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ConfigFileFormat {
    Json,
    Toml,
}

/// Print the effective config: defaults, then the file, then env overrides.
pub fn run_config_show(
    mode: OutputMode,
    path: Option<&Path>,
    format: ConfigFileFormat,
    env: &BTreeMap<String, String>,
) -> Result<CliOutput, CliError> {
    let config = match load_effective(path, env) {
        Ok(config) => config,
        Err(error) => return Ok(format_error_output(mode, &error, ExitCode::InvalidInput)),
    };

    let stdout = if mode.is_json() {
        pretty_json(&serde_json::json!({
            "status": "ok",
            "configPath": path.map(|value| value.to_string_lossy().to_string()),
            "effectiveConfig": serde_json::to_value(config.as_config())?,
        }))?
    } else {
        let rendered = match format {
            ConfigFileFormat::Json => to_pretty_json(config.as_config()),
            ConfigFileFormat::Toml => to_pretty_toml(config.as_config()),
        };
        let rendered = match rendered {
            Ok(rendered) => rendered,
            Err(error) => return Ok(format_error_output(mode, &error, ExitCode::Internal)),
        };
        format!("status: ok\nconfig:\n{rendered}")
    };

    let mut stderr = String::new();
    log_info(&mut stderr, "config show completed", mode.no_progress);
    Ok(CliOutput::ok(stdout, stderr))
}

fn load_effective(
    path: Option<&Path>,
    env: &BTreeMap<String, String>,
) -> Result<ValidatedServiceConfig, ErrorEnvelope> {
    let env = ServiceEnv::from_map(env)?;
    load_service_config_from_path(path, &env)
}
