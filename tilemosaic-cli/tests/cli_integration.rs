//! Integration tests for the tilemosaic binary.
//!
//! Each test runs the CLI with `HOME` pointed at a temporary directory so
//! the user's real configuration is never touched. None of these tests
//! reach the network: fetch is only exercised on paths that fail before
//! the first request.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Run a CLI command with `home` as the home directory and capture output.
fn run_cli(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tilemosaic"))
        .args(args)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command")
}

/// Assert a command succeeded.
fn assert_success(output: &Output, context: &str) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        panic!("{} failed:\nstdout: {}\nstderr: {}", context, stdout, stderr);
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_config_path_under_home() {
    let home = TempDir::new().unwrap();

    let output = run_cli(home.path(), &["config", "path"]);
    assert_success(&output, "config path");

    assert!(stdout(&output).trim().ends_with(".tilemosaic/config.ini"));
}

#[test]
fn test_config_init_then_show() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join(".tilemosaic").join("config.ini");

    let output = run_cli(home.path(), &["config", "init"]);
    assert_success(&output, "config init");
    assert!(config_path.exists());

    let output = run_cli(home.path(), &["config", "show"]);
    assert_success(&output, "config show");
    let shown = stdout(&output);
    assert!(shown.contains("[provider]"));
    assert!(shown.contains("[fetch]"));
    assert!(shown.contains("parallelism = 10"));
}

#[test]
fn test_config_init_keeps_existing_file() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".tilemosaic");
    fs::create_dir_all(&config_dir).unwrap();
    let config_path = config_dir.join("config.ini");
    fs::write(&config_path, "[fetch]\nparallelism = 4\n").unwrap();

    let output = run_cli(home.path(), &["config", "init"]);
    assert_success(&output, "config init");

    assert_eq!(
        fs::read_to_string(&config_path).unwrap(),
        "[fetch]\nparallelism = 4\n"
    );
}

#[test]
fn test_providers_lists_builtins_and_custom() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".tilemosaic");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.ini"),
        "[provider.osm]\ntemplate = https://tile.openstreetmap.org/{z}/{x}/{y}.png\nmax_zoom = 19\n",
    )
    .unwrap();

    let output = run_cli(home.path(), &["providers"]);
    assert_success(&output, "providers");

    let listed = stdout(&output);
    for name in ["google", "google-china", "esri", "bing", "tianditu", "osm"] {
        assert!(listed.contains(name), "missing provider {}", name);
    }
    assert!(listed.contains("satellite"));
}

#[test]
fn test_fetch_rejects_inverted_bounds() {
    let home = TempDir::new().unwrap();
    let output_path = home.path().join("out.tif");

    let output = run_cli(
        home.path(),
        &[
            "fetch",
            "--west",
            "10",
            "--north",
            "40",
            "--east",
            "5",
            "--south",
            "45",
            "--zoom",
            "8",
            "--output",
            output_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error:"));
    assert!(!output_path.exists());
}

#[test]
fn test_fetch_rejects_parallelism_out_of_range() {
    let home = TempDir::new().unwrap();
    let output_path = home.path().join("out.tif");

    let output = run_cli(
        home.path(),
        &[
            "fetch",
            "--west",
            "-0.2",
            "--north",
            "51.55",
            "--east",
            "-0.05",
            "--south",
            "51.45",
            "--zoom",
            "10",
            "--parallelism",
            "25",
            "--output",
            output_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Parallelism must be between 1 and 20"));
    assert!(!output_path.exists());
}

#[test]
fn test_fetch_unknown_provider_hint() {
    let home = TempDir::new().unwrap();
    let output_path = home.path().join("out.tif");

    let output = run_cli(
        home.path(),
        &[
            "fetch",
            "--west",
            "-0.2",
            "--north",
            "51.55",
            "--east",
            "-0.05",
            "--south",
            "51.45",
            "--zoom",
            "10",
            "--provider",
            "nowhere",
            "--output",
            output_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("tilemosaic providers"));
    assert!(!output_path.exists());
}

#[test]
fn test_fetch_rejects_oversized_area_before_download() {
    let home = TempDir::new().unwrap();
    let output_path = home.path().join("out.tif");

    let output = run_cli(
        home.path(),
        &[
            "fetch",
            "--west",
            "-179.9",
            "--north",
            "85",
            "--east",
            "179.9",
            "--south",
            "-85",
            "--zoom",
            "15",
            "--provider",
            "esri",
            "--output",
            output_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("too large"));
    assert!(!output_path.exists());
}
