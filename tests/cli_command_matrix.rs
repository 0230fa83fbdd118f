use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

fn run_help(dir: &TempDir, args: &[&str]) {
    let mut cmd = cargo_bin_cmd!("schemalint");
    cmd.current_dir(dir.path())
        .args(args)
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn every_cli_command_has_help_path() {
    let dir = TempDir::new().expect("temp dir");

    run_help(&dir, &[]);
    run_help(&dir, &["check"]);
    run_help(&dir, &["range"]);
    run_help(&dir, &["vocab"]);
    run_help(&dir, &["rules"]);
}

#[test]
fn global_flags_are_accepted_after_subcommand() {
    let dir = TempDir::new().expect("temp dir");
    let mut cmd = cargo_bin_cmd!("schemalint");
    cmd.current_dir(dir.path())
        .args(["rules", "--json", "--log-level", "debug"])
        .assert()
        .success();
}
