use assert_cmd::Command;
use predicates::str::contains;

fn run_help(args: &[&str]) {
    let mut cmd = Command::cargo_bin("nixready").expect("nixready binary");
    cmd.args(args).arg("--help").assert().success();
}

#[test]
fn every_cli_command_has_help_path() {
    run_help(&[]);
    run_help(&["check"]);
    run_help(&["conf"]);
    run_help(&["hooks"]);
}

#[test]
fn help_mentions_the_readiness_purpose() {
    Command::cargo_bin("nixready")
        .expect("nixready binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("readiness"));
}

#[test]
fn check_requires_an_app_name() {
    Command::cargo_bin("nixready")
        .expect("nixready binary")
        .arg("check")
        .assert()
        .failure();
}
