use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn tabboard_help_works() {
    Command::cargo_bin("tabboard")
        .expect("binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("Manage the task list"));
}

#[test]
fn subcommand_help_works() {
    let subcommands: [&[&str]; 8] = [
        &["todo"],
        &["todo", "add"],
        &["todo", "toggle"],
        &["todo", "rm"],
        &["todo", "list"],
        &["todo", "stats"],
        &["profile"],
        &["ui"],
    ];

    for args in subcommands {
        Command::cargo_bin("tabboard")
            .expect("binary")
            .args(args)
            .arg("--help")
            .assert()
            .success();
    }
}

#[test]
fn unknown_filter_is_usage_error() {
    Command::cargo_bin("tabboard")
        .expect("binary")
        .args(["todo", "list", "--filter", "done"])
        .assert()
        .code(2)
        .stderr(contains("invalid value"));
}
