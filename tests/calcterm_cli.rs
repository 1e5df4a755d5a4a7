use std::io::Write;
use std::process::{Command, Stdio};

fn calcterm_bin() -> &'static str {
    env!("CARGO_BIN_EXE_calcterm")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn help_mentions_name() {
    let output = Command::new(calcterm_bin())
        .arg("--help")
        .output()
        .expect("run calcterm --help");
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("calcterm"));
}

#[test]
fn eval_prints_result() {
    let output = Command::new(calcterm_bin())
        .args(["--eval", "2+2"])
        .output()
        .expect("run calcterm --eval");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "4");
}

#[test]
fn eval_handles_percent_and_precedence() {
    let output = Command::new(calcterm_bin())
        .args(["--eval", "200*10%+2*3"])
        .output()
        .expect("run calcterm --eval");
    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "26");
}

#[test]
fn eval_failure_prints_error_and_exits_nonzero() {
    let output = Command::new(calcterm_bin())
        .args(["--eval", "5/0"])
        .output()
        .expect("run calcterm --eval");
    assert!(!output.status.success());
    assert_eq!(stdout_of(&output).trim(), "Error");
}

#[test]
fn json_ipc_round_trip() {
    let mut child = Command::new(calcterm_bin())
        .arg("--json-ipc")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn calcterm --json-ipc");
    {
        let stdin = child.stdin.as_mut().expect("stdin");
        for line in [
            r#"{"cmd":"key","key":"4"}"#,
            r#"{"cmd":"press","value":"*"}"#,
            r#"{"cmd":"key","key":"3"}"#,
            r#"{"cmd":"key","key":"Enter"}"#,
        ] {
            writeln!(stdin, "{line}").expect("write command");
        }
    }
    drop(child.stdin.take());
    let output = child.wait_with_output().expect("wait for calcterm");
    assert!(output.status.success());
    let stdout = stdout_of(&output);
    let last = stdout.lines().last().expect("at least one event");
    assert!(last.contains(r#""event":"display""#), "last event {last}");
    assert!(last.contains(r#""buffer":"12""#), "last event {last}");
}
