use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "portal-maze"])
        .status()
        .expect("failed to invoke cargo check for portal-maze CLI binary");

    assert!(status.success(), "cargo check --bin portal-maze should succeed");
}

#[test]
fn cli_prints_the_first_level() {
    let output = Command::new(env!("CARGO_BIN_EXE_portal-maze"))
        .args(["--level", "1", "--seed", "11", "--attempts", "50"])
        .output()
        .expect("failed to run portal-maze");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("level 1\n"));
    assert!(stdout.contains('@'));
    assert_eq!(stdout.lines().filter(|line| line.starts_with('#')).count(), 20);
}

#[test]
fn cli_reports_undeclared_levels() {
    let output = Command::new(env!("CARGO_BIN_EXE_portal-maze"))
        .args(["--level", "7"])
        .output()
        .expect("failed to run portal-maze");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("level 7 is not declared"));
}
