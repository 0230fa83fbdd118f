use assert_cmd::Command;
use predicates::str::contains;

fn cmd() -> Command {
    Command::cargo_bin("schemalint").unwrap()
}

#[test]
fn range_scenario_passes() {
    cmd()
        .args(["range", "--min", "0", "--max", "100", "--step", "4", "--default", "64"])
        .assert()
        .success()
        .stdout(contains("PASS range min=0 max=100 step=4 default=64"))
        .stdout(contains("steps: 25 (limit 101)"));
}

#[test]
fn rules_lists_every_kind() {
    cmd()
        .arg("rules")
        .assert()
        .success()
        .stdout(contains("invalid_step_count\terror"))
        .stdout(contains("default_off_step\twarning"))
        .stdout(contains("multiple_declarations\terror"));
}

#[test]
fn vocab_lists_builtin_types() {
    cmd()
        .arg("vocab")
        .assert()
        .success()
        .stdout(contains("vocabulary 2025-01"))
        .stdout(contains("  range"))
        .stdout(contains("  @app"));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    cmd().arg("frobnicate").assert().code(2);
}

#[test]
fn bad_log_filter_is_reported_and_ignored() {
    cmd()
        .env_remove("RUST_LOG")
        .args(["rules", "--log-level", "schemalint=loud"])
        .assert()
        .success()
        .stdout(contains("invalid_step_count"))
        .stderr(contains("invalid log filter, falling back to warn"))
        .stderr(contains("schemalint=loud"));
}
