use std::fs;
use std::process::{Command, Output};

use serde_json::Value;

fn quorate(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quorate"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute quorate")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn demo_prints_worked_example() {
    let output = quorate(&["demo"]);
    assert!(output.status.success(), "demo should succeed");
    assert!(
        stdout_of(&output).contains("Service availability: 0.9914"),
        "{}",
        stdout_of(&output)
    );
}

#[test]
fn help_lists_every_subcommand() {
    let output = quorate(&["--help"]);
    assert!(output.status.success(), "--help should succeed");
    let stdout = stdout_of(&output);
    for cmd in ["eval", "table", "plot", "sweep", "demo"] {
        assert!(stdout.contains(cmd), "help should list {cmd}: {stdout}");
    }
}

#[test]
fn eval_json_reports_availability() {
    let output = quorate(&["eval", "--n", "5", "--k", "3", "--p", "0.9", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    let value: Value = serde_json::from_str(&stdout_of(&output)).expect("eval json");
    let availability = value["availability"].as_f64().unwrap();
    assert!((availability - 0.99144).abs() < 1e-9);
    assert_eq!(value["formula"], "general");
    assert_eq!(value["query"]["k"], 3);
}

#[test]
fn eval_rejects_quorum_larger_than_server_count() {
    let output = quorate(&["eval", "--n", "5", "--k", "6", "--p", "0.9"]);
    assert!(!output.status.success(), "k > n must be rejected");
    let stderr = stderr_of(&output);
    assert!(
        stderr.contains("quorum exceeds server count"),
        "error should explain the rejection: {stderr}"
    );
}

#[test]
fn eval_rejects_probability_outside_unit_interval() {
    let output = quorate(&["eval", "--n", "5", "--k", "3", "--p", "1.5"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("must lie in [0, 1]"));
}

#[test]
fn unknown_format_is_rejected() {
    let output = quorate(&["eval", "--n", "5", "--k", "3", "--p", "0.9", "--format", "yaml"]);
    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Unknown output format: yaml"));
}

#[test]
fn default_table_has_thirteen_rows() {
    let output = quorate(&["table", "--format", "json"]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    let rows: Vec<Value> = serde_json::from_str(&stdout_of(&output)).expect("table json");
    assert_eq!(rows.len(), 13);
    assert_eq!(rows[0]["n"], 1);
    assert_eq!(rows[12]["k"], 20);
}

#[test]
fn table_aborts_on_invalid_case_file() {
    let dir = tempfile::tempdir().unwrap();
    let cases = dir.path().join("cases.json");
    fs::write(
        &cases,
        r#"[{"n": 5, "k": 3, "p": 0.9}, {"n": 5, "k": 0, "p": 0.9}]"#,
    )
    .unwrap();
    let output = quorate(&["table", "--cases", cases.to_str().unwrap()]);
    assert!(!output.status.success(), "invalid case must abort by default");
    assert!(stderr_of(&output).contains("Case #2"));
}

#[test]
fn table_skips_invalid_cases_and_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let cases = dir.path().join("cases.json");
    fs::write(
        &cases,
        r#"[{"n": 5, "k": 3, "p": 0.9}, {"n": 0, "k": 1, "p": 0.9}, {"n": 3, "k": 2, "p": 0.9}]"#,
    )
    .unwrap();
    let out = dir.path().join("out").join("table.md");
    let output = quorate(&[
        "table",
        "--cases",
        cases.to_str().unwrap(),
        "--format",
        "markdown",
        "--skip-invalid",
        "--out",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    assert!(stderr_of(&output).contains("skipping invalid case"));
    let table = fs::read_to_string(&out).unwrap();
    assert_eq!(table.lines().count(), 4);
    assert!(table.contains("| 3 | 2 | 0.9 | general | 0.972000 |"));
}

#[test]
fn plot_mermaid_groups_by_server_count() {
    let output = quorate(&["plot", "--format", "mermaid"]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    let stdout = stdout_of(&output);
    assert_eq!(stdout.matches("xychart-beta").count(), 5);
    assert!(stdout.contains("title \"n = 20\""));
}

#[test]
fn plot_ascii_draws_legend() {
    let output = quorate(&["plot"]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    assert!(stdout_of(&output).contains("Legend: o n=1"));
}

#[test]
fn sweep_reports_largest_quorum() {
    let output = quorate(&[
        "sweep", "--n", "10", "--p", "0.95", "--target", "0.99", "--format", "json",
    ]);
    assert!(output.status.success(), "{}", stderr_of(&output));
    let value: Value = serde_json::from_str(&stdout_of(&output)).expect("sweep json");
    assert_eq!(value["rows"].as_array().unwrap().len(), 10);
    assert_eq!(value["largest_quorum"], 7);
}

#[test]
fn sweep_rejects_oversized_server_count() {
    let output = quorate(&["sweep", "--n", "10000000000", "--p", "0.9"]);
    assert!(!output.status.success(), "huge sweeps must be refused");
    assert!(stderr_of(&output).contains("at most 100000 servers"));
}
