//! Output format helpers for CLI commands.

use crate::error::ExitCode;
use clap::{Args, ValueEnum};
use storefront_api::v1::{ApiV1ErrorDto, ApiV1ErrorKind, error_envelope_to_api_v1_error};
use storefront_shared::ErrorEnvelope;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
    /// Shorthand for `--output json`.
    #[arg(long, global = true)]
    pub json: bool,
    /// Suppress `info:` lines on stderr.
    #[arg(long, global = true)]
    pub no_progress: bool,
}

/// Output mode derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub format: OutputFormat,
    pub no_progress: bool,
}

impl OutputMode {
    #[must_use]
    pub const fn from_args(args: &OutputArgs) -> Self {
        let format = match (args.output, args.json) {
            (Some(value), _) => value,
            (None, true) => OutputFormat::Json,
            (None, false) => OutputFormat::Text,
        };
        Self {
            format,
            no_progress: args.no_progress,
        }
    }

    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

/// Buffered command output; written by `main` in one go.
#[derive(Debug)]
pub struct CliOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: ExitCode,
}

impl CliOutput {
    pub const fn ok(stdout: String, stderr: String) -> Self {
        Self {
            stdout,
            stderr,
            exit_code: ExitCode::Ok,
        }
    }
}

pub fn log_info(stderr: &mut String, message: &str, no_progress: bool) {
    if no_progress {
        return;
    }
    stderr.push_str("info: ");
    stderr.push_str(message);
    stderr.push('\n');
}

/// Pretty JSON with a trailing newline.
pub fn pretty_json(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

/// Render an error envelope as command output; metadata secrets are redacted.
pub fn format_error_output(
    mode: OutputMode,
    error: &ErrorEnvelope,
    exit_code: ExitCode,
) -> CliOutput {
    let dto = error_envelope_to_api_v1_error(error, None);
    let stdout = if mode.is_json() {
        let payload = serde_json::json!({ "status": "error", "error": dto });
        pretty_json(&payload).unwrap_or_else(|_| {
            "{\"status\":\"error\",\"error\":{\"code\":\"ERR_CORE_INTERNAL\",\"message\":\"internal error\",\"kind\":\"INVARIANT\"}}\n".to_owned()
        })
    } else {
        format_error_text(&dto)
    };
    CliOutput {
        stdout,
        stderr: String::new(),
        exit_code,
    }
}

fn format_error_text(error: &ApiV1ErrorDto) -> String {
    let mut out = String::from("status: error\n");
    out.push_str("code: ");
    out.push_str(&error.code);
    out.push_str("\nmessage: ");
    out.push_str(&error.message);
    out.push_str("\nkind: ");
    out.push_str(match error.kind {
        ApiV1ErrorKind::Expected => "EXPECTED",
        ApiV1ErrorKind::Invariant => "INVARIANT",
    });
    out.push('\n');

    if let Some(meta) = error.meta.as_ref() {
        if !meta.is_empty() {
            out.push_str("meta:\n");
            for (key, value) in meta {
                out.push_str("  ");
                out.push_str(key);
                out.push_str(": ");
                out.push_str(value);
                out.push('\n');
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_shared::ErrorCode;

    fn mode(json: bool) -> OutputMode {
        OutputMode::from_args(&OutputArgs {
            output: None,
            json,
            no_progress: true,
        })
    }

    #[test]
    fn explicit_output_beats_json_shorthand() {
        let mode = OutputMode::from_args(&OutputArgs {
            output: Some(OutputFormat::Text),
            json: true,
            no_progress: false,
        });
        assert!(!mode.is_json());
    }

    #[test]
    fn error_text_lists_redacted_meta() {
        let error = ErrorEnvelope::expected(ErrorCode::invalid_input(), "bad payload")
            .with_metadata("password", "hunter22")
            .with_metadata("shape", "login");
        let output = format_error_output(mode(false), &error, ExitCode::InvalidInput);
        assert_eq!(
            output.stdout,
            "status: error\ncode: ERR_CORE_INVALID_INPUT\nmessage: bad payload\nkind: EXPECTED\nmeta:\n  password: [REDACTED]\n  shape: login\n"
        );
        assert_eq!(output.exit_code, ExitCode::InvalidInput);
    }

    #[test]
    fn error_json_wraps_the_dto() -> Result<(), serde_json::Error> {
        let error = ErrorEnvelope::expected(ErrorCode::not_found(), "missing");
        let output = format_error_output(mode(true), &error, ExitCode::InvalidInput);
        let value: serde_json::Value = serde_json::from_str(&output.stdout)?;
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"]["code"], "ERR_CORE_NOT_FOUND");
        assert!(value["error"].get("meta").is_none());
        Ok(())
    }
}
