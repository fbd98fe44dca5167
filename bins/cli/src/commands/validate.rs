use super::resolve_shape;
use crate::error::{CliError, ExitCode};
use crate::format::{CliOutput, OutputMode, format_error_output, log_info, pretty_json};
use storefront_api::v1::validation_outcome_to_api_v1;
use storefront_shared::{ErrorCode, ErrorEnvelope};
use storefront_validation::validate;

/// Validate a JSON payload against a named request shape.
///
/// Exit code 0 when the payload is valid, 2 when it is rejected or the input
/// cannot be read.
pub fn run_validate(
    mode: OutputMode,
    shape_name: &str,
    input_json: &str,
) -> Result<CliOutput, CliError> {
    let shape = match resolve_shape(mode, shape_name) {
        Ok(shape) => shape,
        Err(output) => return Ok(output),
    };
    let input: serde_json::Value = match serde_json::from_str(input_json) {
        Ok(value) => value,
        Err(error) => {
            let envelope = ErrorEnvelope::expected(
                ErrorCode::invalid_input(),
                format!("input is not valid JSON: {error}"),
            )
            .with_metadata("shape", shape_name);
            return Ok(format_error_output(mode, &envelope, ExitCode::InvalidInput));
        },
    };

    tracing::debug!(shape = shape_name, "validating payload");
    let outcome = validate(shape, &input);
    let mut stderr = String::new();
    log_info(&mut stderr, "validation completed", mode.no_progress);

    if outcome.is_valid() {
        let stdout = if mode.is_json() {
            pretty_json(&serde_json::json!({
                "status": "ok",
                "shape": shape_name,
                "value": outcome.value(),
            }))?
        } else {
            format!("status: ok\nshape: {shape_name}\n")
        };
        return Ok(CliOutput::ok(stdout, stderr));
    }

    let response = validation_outcome_to_api_v1(&outcome);
    let stdout = if mode.is_json() {
        pretty_json(&serde_json::json!({
            "status": "invalid",
            "shape": shape_name,
            "httpStatus": response.status,
            "body": response.body_json()?,
        }))?
    } else {
        let mut out = format!("status: invalid\nshape: {shape_name}\nerrors:\n");
        for message in outcome.messages() {
            out.push_str("  - ");
            out.push_str(&message);
            out.push('\n');
        }
        out
    };
    Ok(CliOutput {
        stdout,
        stderr,
        exit_code: ExitCode::InvalidInput,
    })
}
