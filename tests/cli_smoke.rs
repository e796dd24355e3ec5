mod support;

use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;
use support::{project_tasks, TestDir};
use taskgraph::task::Task;

fn taskgraph(dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("taskgraph").expect("binary");
    cmd.current_dir(dir.path()).env_remove("TASKGRAPH_CONFIG");
    cmd
}

#[test]
fn taskgraph_help_works() {
    Command::cargo_bin("taskgraph")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Task Relationship Layout"));
}

#[test]
fn subcommand_help_works() {
    for cmd in ["layout", "check", "config"] {
        Command::cargo_bin("taskgraph")
            .expect("binary")
            .arg(cmd)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn layout_json_envelope_contains_nodes_and_edges() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_tasks("tasks.json", &project_tasks())?;

    let output = taskgraph(&dir)
        .args(["layout", "tasks.json", "--json"])
        .output()?;
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["schema_version"], "taskgraph.v1");
    assert_eq!(value["command"], "layout");
    assert_eq!(value["status"], "success");
    assert_eq!(value["data"]["nodes"].as_array().map(Vec::len), Some(10));
    assert_eq!(value["data"]["nodes"][0]["id"], "group-backend");
    assert!(value["data"]["edges"]
        .as_array()
        .map(|edges| edges.iter().all(|edge| edge["relationship"] == "blocks"))
        .unwrap_or(false));
    Ok(())
}

#[test]
fn layout_human_output_lists_nodes() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    let a = Task::new("a", 3.0).with_title("Alpha");
    let b = Task::new("b", 2.0).with_title("Beta").blocked_by(&a);
    dir.write_tasks("tasks.json", &[a, b])?;

    taskgraph(&dir)
        .args(["layout", "tasks.json", "--all"])
        .assert()
        .success()
        .stdout(contains("- nodes: 2"))
        .stdout(contains("- edges: 1"))
        .stdout(contains("a blocks b"));
    Ok(())
}

#[test]
fn layout_missing_file_is_user_error() {
    let dir = TestDir::new();
    taskgraph(&dir)
        .args(["layout", "nope.json"])
        .assert()
        .code(2)
        .stderr(contains("Input file not found"));
}

#[test]
fn layout_rejects_malformed_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_file("tasks.json", "{\"tasks\": 3}")?;

    let output = taskgraph(&dir)
        .args(["layout", "tasks.json", "--json"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["status"], "error");
    assert_eq!(value["error"]["kind"], "user_error");
    Ok(())
}

#[test]
fn check_reports_cycles_and_strict_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    let x = Task::new("x", 1.0).blocked_by_id("y");
    let y = Task::new("y", 1.0).blocked_by_id("x");
    dir.write_tasks("tasks.json", &[x, y])?;

    taskgraph(&dir)
        .args(["check", "tasks.json"])
        .assert()
        .success()
        .stdout(contains("circular dependency between x, y"));

    taskgraph(&dir)
        .args(["check", "tasks.json", "--strict"])
        .assert()
        .code(3);
    Ok(())
}

#[test]
fn check_passes_clean_input() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_tasks("tasks.json", &project_tasks())?;

    taskgraph(&dir)
        .args(["check", "tasks.json", "--strict"])
        .assert()
        .success()
        .stdout(contains("ok"));
    Ok(())
}

#[test]
fn config_command_uses_local_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_file(".taskgraph.toml", "[spacing]\nhorizontal_gap = 42.0\n")?;

    let output = taskgraph(&dir).args(["config", "--json"]).output()?;
    assert!(output.status.success());
    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["data"]["spacing"]["horizontal_gap"], 42.0);
    Ok(())
}

#[test]
fn explicit_invalid_config_is_user_error() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    dir.write_file("bad.toml", "[group]\nmin_width = -1.0\n")?;

    taskgraph(&dir)
        .args(["--config", "bad.toml", "config"])
        .assert()
        .code(2)
        .stderr(contains("group.min_width"));
    Ok(())
}

#[test]
fn explicit_missing_config_is_user_error() {
    let dir = TestDir::new();
    taskgraph(&dir)
        .args(["--config", "absent.toml", "config"])
        .assert()
        .code(2)
        .stderr(contains("Config file not found"));
}

#[test]
fn check_reports_cycle_between_sibling_subtasks() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();
    let s1 = Task::new("s1", 1.0).blocked_by_id("s2");
    let s2 = Task::new("s2", 1.0).blocked_by_id("s1");
    let parent = Task::new("p", 1.0)
        .with_subtask(s1.clone())
        .with_subtask(s2.clone());
    dir.write_tasks("tasks.json", &[parent, s1, s2])?;

    taskgraph(&dir)
        .args(["check", "tasks.json", "--strict"])
        .assert()
        .code(3)
        .stdout(contains("circular dependency between s1, s2"));
    Ok(())
}
