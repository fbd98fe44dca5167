use super::{broken_registry, resolve_shape, unknown_shape};
use crate::error::{CliError, ExitCode};
use crate::format::{CliOutput, OutputMode, format_error_output, log_info, pretty_json};
use storefront_api::v1::api_v1_request_schema;
use storefront_domain::all_shapes;
use storefront_validation::{FieldSummary, ShapeSummary};

/// List the registered shapes, describe one, or print its JSON Schema.
///
/// `--schema` always prints JSON, whatever the output mode.
pub fn run_shapes(
    mode: OutputMode,
    shape_name: Option<&str>,
    schema: bool,
) -> Result<CliOutput, CliError> {
    let mut stderr = String::new();
    let Some(name) = shape_name else {
        let shapes = match all_shapes() {
            Ok(shapes) => shapes,
            Err(error) => return Ok(broken_registry(mode, error)),
        };
        let names: Vec<&str> = shapes.iter().map(|shape| shape.name()).collect();
        let stdout = if mode.is_json() {
            pretty_json(&serde_json::json!({ "shapes": names }))?
        } else {
            names.iter().map(|name| format!("{name}\n")).collect()
        };
        log_info(&mut stderr, "shape listing completed", mode.no_progress);
        return Ok(CliOutput::ok(stdout, stderr));
    };

    let shape = match resolve_shape(mode, name) {
        Ok(shape) => shape,
        Err(output) => return Ok(output),
    };

    let stdout = if schema {
        let Some(schema) = api_v1_request_schema(name) else {
            return Ok(format_error_output(
                mode,
                &unknown_shape(name),
                ExitCode::InvalidInput,
            ));
        };
        pretty_json(&serde_json::to_value(&schema)?)?
    } else if mode.is_json() {
        pretty_json(&serde_json::to_value(shape.summary())?)?
    } else {
        format_summary_text(&shape.summary())
    };
    log_info(&mut stderr, "shape description completed", mode.no_progress);
    Ok(CliOutput::ok(stdout, stderr))
}

fn format_summary_text(summary: &ShapeSummary) -> String {
    let mut out = format!("shape: {}\nfields:\n", summary.name);
    push_fields(&mut out, &summary.fields, "");
    out
}

fn push_fields(out: &mut String, fields: &[FieldSummary], prefix: &str) {
    for field in fields {
        let path = format!("{prefix}{}", field.name);
        let rules: Vec<String> = field
            .constraints
            .iter()
            .map(|constraint| match &constraint.bound {
                Some(bound) => format!("{}({bound})", constraint.kind),
                None => constraint.kind.to_owned(),
            })
            .collect();
        out.push_str("  ");
        out.push_str(&path);
        out.push_str(": ");
        out.push_str(&rules.join(", "));
        out.push('\n');
        if let Some(children) = &field.children {
            push_fields(out, &children.fields, &format!("{path}."));
        }
    }
}
