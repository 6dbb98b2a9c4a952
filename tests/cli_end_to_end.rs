// tests/cli_end_to_end.rs
#![cfg(unix)]

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

fn stagger() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stagger"));
    cmd.env("STAGGER_LOG", "info");
    cmd
}

#[test]
fn runs_commands_from_stdin_in_order_and_exits_zero() {
    let mut child = stagger()
        .args(["--json", "-", "--delay", "0"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"["echo","a"] ["echo","b"]"#)
        .unwrap();

    let out = child.wait_with_output().unwrap();
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"a"));
    assert!(lines.contains(&"b"));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("executing").count(), 2);
}

#[test]
fn failing_commands_do_not_change_exit_status() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"["stagger-nonexistent-binary"] [] ["echo","ok"] ["false"]"#).unwrap();

    let out = stagger()
        .args(["--json"])
        .arg(file.path())
        .args(["--delay", "10ms"])
        .output()
        .unwrap();

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("ok"));

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert_eq!(stderr.matches("executing").count(), 3);
    assert!(stderr.contains("stagger-nonexistent-binary"));
}

#[test]
fn malformed_record_is_fatal_before_any_launch() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"["echo","first"] ["echo", 2]"#).unwrap();

    let out = stagger()
        .args(["--json"])
        .arg(file.path())
        .args(["--delay", "0"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    assert!(!String::from_utf8_lossy(&out.stdout).contains("first"));
    assert!(String::from_utf8_lossy(&out.stderr).contains("stagger error"));
}

#[test]
fn missing_command_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = stagger()
        .args(["--json"])
        .arg(dir.path().join("missing.json"))
        .output()
        .unwrap();

    assert!(!out.status.success());
}

#[test]
fn dry_run_prints_without_executing() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("ran");

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"["touch","{}"] [] ["echo","x"]"#,
        marker.display()
    )
    .unwrap();

    let out = stagger()
        .args(["--dry-run", "--json"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("commands (2):"));
    assert!(stdout.contains("[echo x]"));
    assert!(!marker.exists());
}

#[test]
fn sigterm_cancels_running_commands_and_exits_zero() {
    let mut child = stagger()
        .args(["--json", "-", "--delay", "0"])
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"["sleep","30"]"#)
        .unwrap();

    // Wait for the launch announcement so the signal handlers are installed.
    let stderr = child.stderr.take().unwrap();
    let mut reader = std::io::BufReader::new(stderr);
    let mut seen = String::new();
    loop {
        let mut line = String::new();
        let n = std::io::BufRead::read_line(&mut reader, &mut line).unwrap();
        assert!(n > 0, "stagger exited before launching: {seen}");
        seen.push_str(&line);
        if line.contains("executing") {
            break;
        }
    }

    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());

    let mut rest = String::new();
    std::io::Read::read_to_string(&mut reader, &mut rest).unwrap();
    let exit = child.wait().unwrap();

    assert!(exit.success());
    assert!(rest.contains("cancelling"));
}
