mod config;
mod shapes;
mod validate;

pub use config::{ConfigFileFormat, run_config_show};
pub use shapes::run_shapes;
pub use validate::run_validate;

use crate::error::ExitCode;
use crate::format::{CliOutput, OutputMode, format_error_output};
use storefront_domain::{find_shape, shape_names};
use storefront_shared::{ErrorCode, ErrorEnvelope};
use storefront_validation::{ShapeDescriptor, ShapeError};

/// Look up a registered shape, or the error output to print instead.
fn resolve_shape(mode: OutputMode, name: &str) -> Result<&'static ShapeDescriptor, CliOutput> {
    match find_shape(name) {
        Some(Ok(shape)) => Ok(shape),
        Some(Err(error)) => Err(broken_registry(mode, error)),
        None => Err(format_error_output(
            mode,
            &unknown_shape(name),
            ExitCode::InvalidInput,
        )),
    }
}

fn broken_registry(mode: OutputMode, error: ShapeError) -> CliOutput {
    tracing::error!(%error, "request shape registry is malformed");
    format_error_output(mode, &ErrorEnvelope::from(error), ExitCode::Internal)
}

fn unknown_shape(name: &str) -> ErrorEnvelope {
    ErrorEnvelope::expected(
        ErrorCode::new("cli", "unknown_shape"),
        format!("unknown shape `{name}`"),
    )
    .with_metadata("shape", name)
    .with_metadata("known", shape_names().join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;

    const TEXT: OutputMode = OutputMode {
        format: OutputFormat::Text,
        no_progress: true,
    };

    #[test]
    fn malformed_shape_is_reported_as_an_invariant() {
        let Err(error) = ShapeDescriptor::builder("checkout").build() else {
            panic!("a shape without fields must not build");
        };
        let output = broken_registry(TEXT, error);
        assert_eq!(output.exit_code, ExitCode::Internal);
        assert!(
            output
                .stdout
                .starts_with("status: error\ncode: ERR_VALIDATION_INVALID_SHAPE\n")
        );
        assert!(output.stdout.contains("kind: INVARIANT\n"));
        assert!(output.stdout.contains("  shape: checkout\n"));
    }

    #[test]
    fn registered_shapes_resolve() {
        assert!(resolve_shape(TEXT, "login").is_ok_and(|shape| shape.name() == "login"));
        let Err(output) = resolve_shape(TEXT, "checkout") else {
            panic!("unknown shape must not resolve");
        };
        assert_eq!(output.exit_code, ExitCode::InvalidInput);
    }
}
