//! CLI smoke tests: verify basic binary behavior.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Duration;

fn cli_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_critter"))
}

#[test]
fn test_help_flag() {
    let output = cli_bin().arg("--help").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "Expected usage info in --help output");
    assert!(stdout.contains("--sound-dir"));
}

#[test]
fn test_version_flag() {
    let output = cli_bin().arg("--version").output().expect("failed to run");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("critter"),
        "Expected binary name in --version output"
    );
}

#[test]
fn test_missing_explicit_config_fails() {
    let output = cli_bin()
        .arg("--config")
        .arg("/tmp/nonexistent_critter_config_12345.toml")
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
}

#[test]
fn test_exit_command_shuts_down() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = cli_bin()
        .arg("--sound-dir")
        .arg(dir.path())
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"feed\nbogus\nexit\n")
        .unwrap();
    let output = child.wait_with_output().expect("failed to wait");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Unknown command 'bogus'"));
}

#[test]
fn test_closed_stdin_keeps_running() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("critter.toml");
    std::fs::write(&config, "[timing]\nwakeup_lock_secs = 0.5\nnormal_lock_secs = 0.5\n").unwrap();

    let mut child = cli_bin()
        .arg("--config")
        .arg(&config)
        .arg("--sound-dir")
        .arg(dir.path())
        .env("RUST_LOG", "info")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn");

    std::thread::sleep(Duration::from_secs(3));
    let still_running = child.try_wait().expect("failed to poll").is_none();
    child.kill().expect("failed to kill");
    let output = child.wait_with_output().expect("failed to wait");

    assert!(still_running, "critter exited once stdin closed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("WAKEUP → IDLE"));
    assert!(!stdout.contains("Goodbye"));
}

#[test]
fn test_invalid_timing_config_fails_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("critter.toml");
    std::fs::write(&config, "[timing]\nidle_timeout_secs = inf\n").unwrap();

    let output = cli_bin()
        .arg("--config")
        .arg(&config)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("idle_timeout_secs"));
}
