use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("switchboard")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("views"))
        .stdout(predicate::str::contains("tools"))
        .stdout(predicate::str::contains("exec"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_exec_help_shows_flags() {
    cargo_bin_cmd!("switchboard")
        .args(["exec", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--tool"))
        .stdout(predicate::str::contains("--params"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("switchboard")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
