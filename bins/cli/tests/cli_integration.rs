//! CLI integration tests.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn cli() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_storefront"));
    for (key, _) in std::env::vars() {
        if key.starts_with("STOREFRONT_") || key == "NODE_ENV" {
            command.env_remove(key);
        }
    }
    command.env_remove("RUST_LOG");
    command
}

fn run_cli(args: &[&str]) -> std::io::Result<Output> {
    cli().args(args).output()
}

fn fixture_path(relative: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(Path::parent)
        .unwrap_or(manifest_dir);
    workspace_root
        .join("crates")
        .join("testkit")
        .join("fixtures")
        .join(relative)
}

fn stdout_json(output: &Output) -> Result<serde_json::Value, serde_json::Error> {
    serde_json::from_slice(&output.stdout)
}

#[test]
fn valid_signup_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&[
        "validate",
        "--shape",
        "create-auth",
        "--input-json",
        r#"{"name":"Ada","email":"ada@example.com","password":"hunter22"}"#,
    ])?;
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "status: ok\nshape: create-auth\n"
    );
    assert!(String::from_utf8(output.stderr)?.contains("info: validation completed"));
    Ok(())
}

#[test]
fn rejected_payload_prints_the_400_body() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&[
        "--output",
        "json",
        "validate",
        "--shape",
        "create-product",
        "--input-json",
        r#"{"title":"","price":-10}"#,
    ])?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(value["httpStatus"], 400);
    assert_eq!(
        value["body"],
        serde_json::json!({
            "message": "Validation failed",
            "errors": ["title: Title is required", "price: Price must be non-negative"]
        })
    );
    Ok(())
}

#[test]
fn payload_can_come_from_stdin() -> Result<(), Box<dyn std::error::Error>> {
    let mut child = cli()
        .args(["--no-progress", "validate", "--shape", "login", "--stdin"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(br#"{"email":"not-an-email","password":"x"}"#)?;
    }
    let output = child.wait_with_output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stdout)?.contains("  - email: Please enter a valid email\n"));
    assert!(output.stderr.is_empty());
    Ok(())
}

#[test]
fn non_object_payload_is_a_general_failure() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&[
        "--json",
        "validate",
        "--shape",
        "login",
        "--input-json",
        "[1,2]",
    ])?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(
        value["body"]["errors"],
        serde_json::json!(["general: Validation failed"])
    );
    Ok(())
}

#[test]
fn unknown_shape_reports_error_dto() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["--json", "shapes", "--shape", "checkout"])?;
    assert_eq!(output.status.code(), Some(2));
    let value = stdout_json(&output)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["code"], "ERR_CLI_UNKNOWN_SHAPE");
    assert_eq!(value["error"]["kind"], "EXPECTED");
    assert_eq!(value["error"]["meta"]["shape"], "checkout");
    Ok(())
}

#[test]
fn shapes_lists_every_request_shape() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["--json", "shapes"])?;
    assert!(output.status.success());
    let value = stdout_json(&output)?;
    assert_eq!(
        value["shapes"],
        serde_json::json!([
            "create-auth",
            "update-auth",
            "login",
            "create-product",
            "update-product"
        ])
    );
    Ok(())
}

#[test]
fn config_show_merges_file_and_env() -> Result<(), Box<dyn std::error::Error>> {
    let path = fixture_path("config/service-config.valid.json");
    let path = path.to_string_lossy();
    let output = cli()
        .args(["--json", "config", "show", "--config", path.as_ref()])
        .env("STOREFRONT_PORT", "9090")
        .output()?;
    assert!(output.status.success());
    let value = stdout_json(&output)?;
    let config = &value["effectiveConfig"];
    assert_eq!(config["environment"], "prod");
    assert_eq!(config["logging"]["level"], "warn");
    assert_eq!(config["http"]["port"], 9090);
    assert_eq!(config["http"]["clientOrigin"], "https://shop.example.com");
    Ok(())
}

#[test]
fn config_show_rejects_bad_origin() -> Result<(), Box<dyn std::error::Error>> {
    let path = fixture_path("config/service-config.invalid-origin.json");
    let output = run_cli(&["config", "show", "--config", path.to_string_lossy().as_ref()])?;
    assert_eq!(output.status.code(), Some(2));
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("status: error\ncode: ERR_CONFIG_INVALID_CLIENT_ORIGIN\n"));
    Ok(())
}

#[test]
fn config_show_renders_toml() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["config", "show", "--format", "toml"])?;
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("cookieName = \"accessToken\""));
    Ok(())
}
