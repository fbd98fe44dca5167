//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{ConfigFileFormat, run_config_show, run_shapes, run_validate};
use error::CliError;
use format::{CliOutput, OutputArgs, OutputMode};
use std::collections::BTreeMap;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use storefront_config::ENV_ENVIRONMENT_ALIAS;
use tracing_subscriber::EnvFilter;

const ENV_PREFIX: &str = "STOREFRONT_";

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    version,
    about = "Storefront request validation and config tooling",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a JSON payload against a request shape.
    Validate {
        /// Shape name (see `storefront shapes`).
        #[arg(long)]
        shape: String,
        /// Payload as inline JSON.
        #[arg(long, required_unless_present = "stdin")]
        input_json: Option<String>,
        /// Read the payload from stdin.
        #[arg(long, conflicts_with = "input_json")]
        stdin: bool,
    },
    /// List request shapes, or describe one.
    Shapes {
        /// Shape to describe.
        #[arg(long)]
        shape: Option<String>,
        /// Print the JSON Schema of the shape's request body.
        #[arg(long, requires = "shape")]
        schema: bool,
    },
    /// Config-related commands.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Show the effective config after file and env overrides.
    Show {
        /// Optional config file path (JSON/TOML).
        #[arg(long)]
        config: Option<PathBuf>,
        /// Serialization for text output.
        #[arg(long, value_enum, default_value = "json")]
        format: ConfigFileFormat,
    },
}

fn main() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    match run(&cli.command, mode) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(command: &Commands, mode: OutputMode) -> Result<CliOutput, CliError> {
    match command {
        Commands::Validate {
            shape,
            input_json,
            stdin,
        } => {
            let input = match input_json {
                Some(input) if !*stdin => input.clone(),
                _ => read_stdin()?,
            };
            run_validate(mode, shape, &input)
        },
        Commands::Shapes { shape, schema } => run_shapes(mode, shape.as_deref(), *schema),
        Commands::Config { command } => match command {
            ConfigCommands::Show { config, format } => {
                run_config_show(mode, config.as_deref(), *format, &collect_scoped_env())
            },
        },
    }
}

fn read_stdin() -> Result<String, CliError> {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}

fn collect_scoped_env() -> BTreeMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with(ENV_PREFIX) || key == ENV_ENVIRONMENT_ALIAS)
        .collect()
}
