//! Common test utilities shared across integration tests.

use std::path::Path;
use std::process::{Command, Output};

/// Run the frctl binary in the specified directory.
///
/// Colors are disabled and configuration overrides cleared so output is
/// stable regardless of the caller's environment.
pub fn run_frctl_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_frctl"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off")
        .env_remove("FRCTL_NAMESPACE")
        .env_remove("FRCTL_GRAPH_FILE")
        .output()
        .expect("Failed to execute frctl binary")
}

/// Run frctl and assert success, returning stdout.
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_frctl_in_dir(dir, args);
    assert!(
        output.status.success(),
        "frctl {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Run frctl with `--json` and parse stdout.
pub fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = run_ok(dir, &full);
    serde_json::from_str(&stdout).expect("stdout should be valid JSON")
}
