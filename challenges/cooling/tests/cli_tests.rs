use std::io::Write;
use std::process::{Command, Output, Stdio};

fn cooling(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_cooling"))
        .args(args)
        .env("RUST_LOG", "debug")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_count_stdout_is_only_the_count() {
    let output = cooling(&["count"], "3 1 2 0 3");
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "1\n");

    let logs = String::from_utf8(output.stderr).unwrap();
    assert!(logs.contains("3x1 floor, 3 usable rooms"), "{}", logs);
    assert!(logs.contains("found 1 layouts"), "{}", logs);
}

#[test]
fn test_count_logs_stay_off_stdout_by_default() {
    let output = Command::new(env!("CARGO_BIN_EXE_cooling"))
        .arg("count")
        .arg("data/cooling/1.in")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "2\n");
}

#[test]
fn test_count_with_stats() {
    let output = cooling(&["count", "--stats"], "4 3 2 0 0 0 0 0 0 0 0 0 3 1");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "2");
    assert!(lines[1].starts_with("nodes: "), "{}", lines[1]);
    assert!(lines[1].ends_with("paths: 2"), "{}", lines[1]);
}

#[test]
fn test_count_error_goes_to_stderr() {
    let output = cooling(&["count"], "2 2 2 0 0 9");
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cooling: "), "{}", stderr);
}
