use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_views_lists_default_views_in_order() {
    let dir = tempdir().unwrap();

    let output = cargo_bin_cmd!("switchboard")
        .env("SWITCHBOARD_HOME", dir.path())
        .arg("views")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let ids: Vec<_> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .collect();
    assert_eq!(
        ids,
        [
            "overview",
            "processes",
            "neural",
            "memory",
            "monitoring",
            "workflow",
            "github",
            "daa",
            "system",
            "cli",
            "help"
        ]
    );
    assert!(stdout.contains("(15 tools)"));
}

#[test]
fn test_tools_for_one_category() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("switchboard")
        .env("SWITCHBOARD_HOME", dir.path())
        .args(["tools", "--category", "GitHub"])
        .assert()
        .success()
        .stdout(predicate::str::contains("github (8)"))
        .stdout(predicate::str::contains("github_repo_analyze"))
        .stdout(predicate::str::contains("neural_train").not());
}

#[test]
fn test_tools_unknown_category_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("switchboard")
        .env("SWITCHBOARD_HOME", dir.path())
        .args(["tools", "--category", "quantum"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category 'quantum'"));
}

#[test]
fn test_status_without_backend() {
    let dir = tempdir().unwrap();

    let output = cargo_bin_cmd!("switchboard")
        .env("SWITCHBOARD_HOME", dir.path())
        .env_remove("SWITCHBOARD_TOOL_COMMAND")
        .arg("status")
        .output()
        .unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["tools_available"], 74);
    assert_eq!(status["views_registered"], 11);
}

#[test]
fn test_exec_without_backend_fails_with_hint() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("switchboard")
        .env("SWITCHBOARD_HOME", dir.path())
        .env_remove("SWITCHBOARD_TOOL_COMMAND")
        .args(["exec", "--tool", "health_check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No tool backend configured"));
}

#[test]
fn test_exec_rejects_non_object_params() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("switchboard")
        .env("SWITCHBOARD_HOME", dir.path())
        .args(["exec", "--tool", "health_check", "--params", "[1, 2]"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--params must be a JSON object"));
}

#[cfg(unix)]
#[test]
fn test_exec_runs_tool_command() {
    let dir = tempdir().unwrap();

    // `sh -c 'cat' <tool>` echoes the params JSON back as the result.
    let config = "tool_command = \"sh\"\ntool_args = [\"-c\", \"cat\"]\n";
    std::fs::write(dir.path().join("config.toml"), config).unwrap();

    let output = cargo_bin_cmd!("switchboard")
        .env("SWITCHBOARD_HOME", dir.path())
        .env_remove("SWITCHBOARD_TOOL_COMMAND")
        .args(["exec", "--tool", "memory_usage", "--params", r#"{"key":"a"}"#])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["key"], "a");
    assert!(dir.path().join("state.json").exists());
}
