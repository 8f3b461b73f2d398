//! CLI smoke tests: exit codes, JSON output, and the update flows, run
//! against the compiled `rrh` binary.

mod common;

use std::fs;
use std::path::PathBuf;

use serde_json::Value;

fn demo_source() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/harness/demo.rs")
}

fn committed_golden() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("goldens/regress.jsonl")
}

#[test]
fn help_command_prints_usage() {
    let result = common::run_cli(&["--help"]);
    assert!(result.status.success(), "stderr: {}", result.stderr);
    assert!(
        result.stdout.contains("Usage: rrh [OPTIONS] <COMMAND>"),
        "missing help banner: {}",
        result.stdout
    );
}

#[test]
fn check_against_committed_golden_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_config(dir.path(), &committed_golden(), &demo_source());
    let result = common::run_cli(&["check", "--config", config.to_str().unwrap()]);
    assert!(
        result.status.success(),
        "stdout: {} stderr: {}",
        result.stdout,
        result.stderr
    );
    assert!(result.stdout.contains("PASS"), "{}", result.stdout);
}

#[test]
fn check_emits_machine_readable_summary() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_config(dir.path(), &committed_golden(), &demo_source());
    let result = common::run_cli(&["check", "--json", "--config", config.to_str().unwrap()]);
    assert!(result.status.success(), "stderr: {}", result.stderr);

    let summary: Value = serde_json::from_str(result.stdout.trim()).expect("JSON summary");
    assert_eq!(summary["action"], "check");
    assert_eq!(summary["pass"], true);
    assert_eq!(summary["mismatches"], 0);
    assert_eq!(summary["cursor"], summary["golden_len"]);
}

#[test]
fn update_then_check_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let golden = dir.path().join("scratch.jsonl");
    let config = common::write_config(dir.path(), &golden, &demo_source());

    let update = common::run_cli(&["update", "--config", config.to_str().unwrap()]);
    assert!(update.status.success(), "stderr: {}", update.stderr);
    assert!(golden.exists());
    assert_eq!(fs::read_to_string(&golden).unwrap().lines().count(), 300);

    let check = common::run_cli(&["check", "--config", config.to_str().unwrap()]);
    assert!(check.status.success(), "stderr: {}", check.stderr);
}

#[test]
fn corrupted_golden_value_fails_the_check() {
    let dir = tempfile::tempdir().unwrap();
    let golden = dir.path().join("scratch.jsonl");
    let config = common::write_config(dir.path(), &golden, &demo_source());
    assert!(
        common::run_cli(&["update", "--config", config.to_str().unwrap()])
            .status
            .success()
    );

    // Flip one recorded value.
    let contents = fs::read_to_string(&golden).unwrap();
    let tampered = contents.replacen("{\"u64\":", "{\"u64\":9", 1);
    assert_ne!(contents, tampered, "tampering must change the artifact");
    fs::write(&golden, tampered).unwrap();

    let check = common::run_cli(&["check", "--config", config.to_str().unwrap()]);
    assert!(!check.status.success(), "tampered table must fail");
    assert!(check.stdout.contains("FAIL"), "{}", check.stdout);
}

#[test]
fn missing_golden_artifact_is_fatal_with_io_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::write_config(
        dir.path(),
        &dir.path().join("does_not_exist.jsonl"),
        &demo_source(),
    );
    let result = common::run_cli(&["check", "--config", config.to_str().unwrap()]);
    assert!(!result.status.success());
    assert!(result.stderr.contains("RRH-3002"), "stderr: {}", result.stderr);
}

#[test]
fn update_demo_rewrites_and_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let demo_copy = dir.path().join("demo_copy.rs");
    fs::copy(demo_source(), &demo_copy).unwrap();
    let config = common::write_config(dir.path(), &committed_golden(), &demo_copy);

    let result = common::run_cli(&["update-demo", "--config", config.to_str().unwrap()]);
    assert!(
        !result.status.success(),
        "update-demo exits non-zero after a successful rewrite"
    );
    assert!(
        result.stdout.contains("UPDATED; ignore non-zero exit status"),
        "{}",
        result.stdout
    );
    // The committed transcript is current, so the rewrite is an identity.
    assert_eq!(
        fs::read_to_string(&demo_copy).unwrap(),
        fs::read_to_string(demo_source()).unwrap()
    );
}

#[test]
fn update_demo_without_anchor_aborts_with_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let demo_copy = dir.path().join("demo_copy.rs");
    let source = fs::read_to_string(demo_source()).unwrap();
    fs::write(&demo_copy, source.replace("// Output:\n", "// output gone\n")).unwrap();
    let config = common::write_config(dir.path(), &committed_golden(), &demo_copy);

    let result = common::run_cli(&["update-demo", "--config", config.to_str().unwrap()]);
    assert!(!result.status.success());
    assert!(result.stderr.contains("RRH-2101"), "stderr: {}", result.stderr);
    assert!(result.stderr.contains("// Output:"), "stderr: {}", result.stderr);
    // The torn file must not have been rewritten.
    assert!(fs::read_to_string(&demo_copy).unwrap().contains("// output gone"));
}

#[test]
fn completions_generate_for_bash() {
    let result = common::run_cli(&["completions", "bash"]);
    assert!(result.status.success());
    assert!(result.stdout.contains("rrh"), "{}", result.stdout);
}
