use super::protocol::*;
use super::session::*;
use serde_json::Value;
use std::io::Cursor;

fn run_lines(lines: &[&str]) -> Vec<Value> {
    let input = lines.join("\n");
    let mut output = Vec::new();
    run_ipc_session(Cursor::new(input), &mut output).expect("ipc session");
    String::from_utf8(output)
        .expect("utf8 output")
        .lines()
        .map(|line| serde_json::from_str(line).expect("json event"))
        .collect()
}

fn last_buffer(events: &[Value]) -> String {
    events
        .iter()
        .rev()
        .find(|event| event["event"] == "display")
        .and_then(|event| event["buffer"].as_str())
        .expect("display event")
        .to_string()
}

#[test]
fn emits_ready_first() {
    let events = run_lines(&[]);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["event"], "ready");
    assert_eq!(events[0]["display"], "0");
    assert_eq!(events[0]["version"], env!("CARGO_PKG_VERSION"));
}

#[test]
fn keys_and_buttons_drive_the_controller() {
    let events = run_lines(&[
        r#"{"cmd":"key","key":"2"}"#,
        r#"{"cmd":"press","value":"+"}"#,
        r#"{"cmd":"key","key":"2"}"#,
        r#"{"cmd":"action","action":"calculate"}"#,
    ]);
    assert_eq!(events.len(), 5);
    assert_eq!(last_buffer(&events), "4");
    assert_eq!(events[4]["overwrite"], true);
    assert_eq!(events[2]["buffer"], "2+");
    assert_eq!(events[2]["overwrite"], false);
}

#[test]
fn named_keys_map_like_the_keyboard() {
    let events = run_lines(&[
        r#"{"cmd":"key","key":"9"}"#,
        r#"{"cmd":"key","key":"Backspace"}"#,
        r#"{"cmd":"key","key":"5"}"#,
        r#"{"cmd":"key","key":"%"}"#,
        r#"{"cmd":"key","key":"Enter"}"#,
    ]);
    assert_eq!(last_buffer(&events), "0.05");

    let events = run_lines(&[
        r#"{"cmd":"key","key":"7"}"#,
        r#"{"cmd":"key","key":"Escape"}"#,
    ]);
    assert_eq!(last_buffer(&events), "0");
}

#[test]
fn unmapped_keys_leave_display_unchanged() {
    let events = run_lines(&[
        r#"{"cmd":"key","key":"3"}"#,
        r#"{"cmd":"key","key":"Shift"}"#,
    ]);
    assert_eq!(events.len(), 3);
    assert_eq!(events[2]["event"], "display");
    assert_eq!(events[2]["buffer"], "3");
}

#[test]
fn division_by_zero_reports_error_text() {
    let events = run_lines(&[
        r#"{"cmd":"key","key":"5"}"#,
        r#"{"cmd":"key","key":"/"}"#,
        r#"{"cmd":"key","key":"0"}"#,
        r#"{"cmd":"key","key":"="}"#,
    ]);
    assert_eq!(last_buffer(&events), "Error");
}

#[test]
fn malformed_commands_emit_errors_and_continue() {
    let events = run_lines(&[
        "not json",
        r#"{"cmd":"dance"}"#,
        r#"{"cmd":"press","value":"%"}"#,
        r#"{"cmd":"action","action":"undo"}"#,
        r#"{"cmd":"get_display"}"#,
    ]);
    let kinds: Vec<&str> = events
        .iter()
        .map(|event| event["event"].as_str().expect("event tag"))
        .collect();
    assert_eq!(
        kinds,
        vec!["ready", "error", "error", "error", "error", "display"]
    );
    assert!(events[3]["message"]
        .as_str()
        .expect("message")
        .contains("unknown button value"));
}

#[test]
fn quit_stops_processing() {
    let events = run_lines(&[
        r#"{"cmd":"key","key":"1"}"#,
        r#"{"cmd":"quit"}"#,
        r#"{"cmd":"key","key":"2"}"#,
    ]);
    assert_eq!(events.len(), 2);
    assert_eq!(last_buffer(&events), "1");
}

#[test]
fn blank_lines_are_skipped() {
    let events = run_lines(&["", "   ", r#"{"cmd":"get_display"}"#]);
    assert_eq!(events.len(), 2);
}

#[test]
fn long_buffers_are_truncated_in_text_only() {
    let mut session = IpcSession::new(Vec::new());
    session.controller.load("1234567890123456789012");
    match session.display_event() {
        IpcEvent::Display { text, buffer, .. } => {
            assert_eq!(text, "12345678901234567890…");
            assert_eq!(buffer, "1234567890123456789012");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn commands_deserialize_from_tags() {
    let cmd: IpcCommand = serde_json::from_str(r#"{"cmd":"press","value":"7"}"#).expect("press");
    assert_eq!(
        cmd,
        IpcCommand::Press {
            value: "7".to_string()
        }
    );
    let cmd: IpcCommand = serde_json::from_str(r#"{"cmd":"get_display"}"#).expect("get");
    assert_eq!(cmd, IpcCommand::GetDisplay);
}
