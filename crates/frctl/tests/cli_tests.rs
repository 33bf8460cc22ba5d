//! Integration tests for the frctl CLI.
//!
//! These tests drive the built binary end to end in temporary directories.

use rstest::{fixture, rstest};
use tempfile::TempDir;

mod common;
use common::{run_frctl_in_dir, run_json, run_ok};

const API: &str = "pkg:test/api@local";
const AUTH: &str = "pkg:test/auth@local";
const DB: &str = "pkg:test/db@local";

// ============================================================================
// Test Fixtures
// ============================================================================

/// Provides a fresh temporary directory for each test
#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Provides a temporary directory with an initialized frctl repository
#[fixture]
fn initialized_dir() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    run_ok(temp.path(), &["init", "--namespace", "test", "--quiet"]);
    temp
}

/// Provides a repository holding api -> auth -> db plus api -> db
#[fixture]
fn populated_dir(initialized_dir: TempDir) -> TempDir {
    let dir = initialized_dir.path();
    run_ok(dir, &["add-node", "service", "api"]);
    run_ok(dir, &["add-node", "library", "auth"]);
    run_ok(dir, &["add-node", "schema", "db"]);
    run_ok(dir, &["add-edge", API, AUTH]);
    run_ok(dir, &["add-edge", AUTH, DB]);
    run_ok(dir, &["add-edge", API, DB, "--type", "CONSUMES"]);
    initialized_dir
}

// ============================================================================
// Help and Init
// ============================================================================

#[rstest]
fn test_cli_help(temp_dir: TempDir) {
    let stdout = run_ok(temp_dir.path(), &["--help"]);
    assert!(stdout.contains("Usage:"));
    for command in ["init", "add-node", "add-edge", "validate", "export", "order"] {
        assert!(stdout.contains(command), "help should list '{}'", command);
    }
}

#[rstest]
fn test_init_creates_files(temp_dir: TempDir) {
    let stdout = run_ok(temp_dir.path(), &["init"]);

    assert!(stdout.contains("Initialized frctl"));
    assert!(temp_dir.path().join(".frctl/config.yaml").exists());
    assert!(temp_dir.path().join(".frctl/graph.json").exists());
}

#[rstest]
fn test_init_twice_fails(initialized_dir: TempDir) {
    let output = run_frctl_in_dir(initialized_dir.path(), &["init"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already initialized"));
}

#[rstest]
fn test_command_outside_repository_fails(temp_dir: TempDir) {
    let output = run_frctl_in_dir(temp_dir.path(), &["show"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("frctl init"));
}

#[rstest]
fn test_missing_graph_file_is_not_recreated(initialized_dir: TempDir) {
    let graph_file = initialized_dir.path().join(".frctl/graph.json");
    std::fs::remove_file(&graph_file).unwrap();

    let output = run_frctl_in_dir(initialized_dir.path(), &["add-node", "service", "api"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No graph found"));
    assert!(!graph_file.exists());
}

// ============================================================================
// Mutations
// ============================================================================

#[rstest]
fn test_add_node_generates_id(initialized_dir: TempDir) {
    let node = run_json(initialized_dir.path(), &["add-node", "service", "Billing API"]);

    assert_eq!(node["id"], "pkg:test/billing-api@local");
    assert_eq!(node["type"], "Service");
    assert_eq!(node["name"], "Billing API");
}

#[rstest]
fn test_add_node_with_id_and_metadata(initialized_dir: TempDir) {
    let node = run_json(
        initialized_dir.path(),
        &["add-node", "endpoint", "list", "--id", "GET:/invoices", "--meta", "owner=billing"],
    );

    assert_eq!(node["id"], "GET:/invoices");
    assert_eq!(node["metadata"]["owner"], "billing");
}

#[rstest]
fn test_add_duplicate_node_fails(initialized_dir: TempDir) {
    run_ok(initialized_dir.path(), &["add-node", "service", "api"]);

    let output = run_frctl_in_dir(initialized_dir.path(), &["add-node", "library", "API"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
}

#[rstest]
fn test_add_edge_cycle_rejected(populated_dir: TempDir) {
    let before = run_ok(populated_dir.path(), &["hash"]);

    let output = run_frctl_in_dir(populated_dir.path(), &["add-edge", DB, API]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("would create a cycle"));

    assert_eq!(run_ok(populated_dir.path(), &["hash"]), before);
}

#[rstest]
fn test_remove_node_cascades(populated_dir: TempDir) {
    let removed = run_json(populated_dir.path(), &["remove-node", AUTH]);
    assert_eq!(removed["edges_removed"], 2);

    let stats = run_json(populated_dir.path(), &["stats"]);
    assert_eq!(stats["nodes"], 2);
    assert_eq!(stats["edges"], 1);
}

#[rstest]
fn test_remove_edge(populated_dir: TempDir) {
    let result = run_json(populated_dir.path(), &["remove-edge", API, DB]);
    assert_eq!(result["removed"], 1);

    let result = run_json(populated_dir.path(), &["remove-edge", API, DB]);
    assert_eq!(result["removed"], 0);
}

// ============================================================================
// Queries
// ============================================================================

#[rstest]
fn test_show(populated_dir: TempDir) {
    let stdout = run_ok(populated_dir.path(), &["show"]);

    assert!(stdout.contains("Nodes: 3"));
    assert!(stdout.contains("Edges: 3"));
    assert!(stdout.contains("Depth: 2"));
    assert!(stdout.contains(&format!("{} --[DEPENDS_ON]--> {}", API, AUTH)));
}

#[rstest]
fn test_order(populated_dir: TempDir) {
    let nodes = run_json(populated_dir.path(), &["order"]);
    let ids: Vec<&str> = nodes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![API, AUTH, DB]);
}

#[rstest]
#[case::ancestors("ancestors", DB, &[API, AUTH])]
#[case::descendants("descendants", API, &[AUTH, DB])]
#[case::leaf_descendants("descendants", DB, &[])]
fn test_traversals(
    populated_dir: TempDir,
    #[case] command: &str,
    #[case] id: &str,
    #[case] expected: &[&str],
) {
    let nodes = run_json(populated_dir.path(), &[command, id]);
    let ids: Vec<&str> = nodes
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, expected);
}

#[rstest]
fn test_traversal_unknown_node_fails(initialized_dir: TempDir) {
    let output = run_frctl_in_dir(initialized_dir.path(), &["ancestors", "ghost"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}

#[rstest]
fn test_stats(populated_dir: TempDir) {
    let stats = run_json(populated_dir.path(), &["stats"]);
    let hash = run_json(populated_dir.path(), &["hash"]);

    assert_eq!(stats["depth"], 2);
    assert_eq!(stats["roots"], 1);
    assert_eq!(stats["leaves"], 1);
    assert_eq!(stats["by_type"]["Library"], 1);
    assert_eq!(stats["hash"], hash["hash"]);
    assert_eq!(stats["hash"].as_str().unwrap().len(), 64);
}

#[rstest]
fn test_hash_is_insertion_order_independent(temp_dir: TempDir) {
    let first = temp_dir.path().join("first");
    let second = temp_dir.path().join("second");
    std::fs::create_dir_all(&first).unwrap();
    std::fs::create_dir_all(&second).unwrap();

    for dir in [&first, &second] {
        run_ok(dir, &["init", "--namespace", "test", "-q"]);
    }

    run_ok(&first, &["add-node", "service", "api"]);
    run_ok(&first, &["add-node", "schema", "db"]);
    run_ok(&first, &["add-edge", API, DB]);

    run_ok(&second, &["add-node", "schema", "db"]);
    run_ok(&second, &["add-node", "service", "api"]);
    run_ok(&second, &["add-edge", API, DB]);

    assert_eq!(run_ok(&first, &["hash"]), run_ok(&second, &["hash"]));
}

// ============================================================================
// Validate and Export
// ============================================================================

#[rstest]
fn test_validate_clean_graph(populated_dir: TempDir) {
    let stdout = run_ok(populated_dir.path(), &["validate"]);
    assert!(stdout.contains("Graph is valid"));
}

#[rstest]
fn test_validate_reports_corrupt_file(initialized_dir: TempDir) {
    let graph_file = initialized_dir.path().join(".frctl/graph.json");
    std::fs::write(
        &graph_file,
        r#"{"nodes": {}, "edges": [{"source": "a", "target": "b", "edge_type": "DEPENDS_ON"}]}"#,
    )
    .unwrap();

    let output = run_frctl_in_dir(initialized_dir.path(), &["validate"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("validation errors"));
}

#[rstest]
fn test_export_stdout_matches_file(populated_dir: TempDir) {
    let exported = run_ok(populated_dir.path(), &["export"]);
    let stored = std::fs::read_to_string(populated_dir.path().join(".frctl/graph.json")).unwrap();
    assert_eq!(exported, stored);
}

#[rstest]
fn test_export_to_file(populated_dir: TempDir) {
    let target = populated_dir.path().join("out/arch.json");
    run_ok(populated_dir.path(), &["export", target.to_str().unwrap()]);

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(document["nodes"].as_object().unwrap().len(), 3);
    assert_eq!(document["edges"].as_array().unwrap().len(), 3);
}

#[rstest]
fn test_commands_work_from_subdirectory(populated_dir: TempDir) {
    let nested = populated_dir.path().join("src/deep");
    std::fs::create_dir_all(&nested).unwrap();

    let stats = run_json(&nested, &["stats"]);
    assert_eq!(stats["nodes"], 3);
}
