//! End-to-end tests for the interactive process harness.
//!
//! Children are small `sh -c` scripts, so these run on unix only.

#![cfg(unix)]

use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use checker::io::reader::ReadState;
use checker::test_support::SharedBuffer;
use checker::{CheckError, ErrorCategory, ProcessBuilder};

fn shell(script: &str) -> ProcessBuilder {
    ProcessBuilder::new().args(["sh", "-c", script])
}

#[test]
fn echo_child_round_trips_an_integer() {
    let mut process = shell("read x; echo \"$x\"").spawn().expect("spawn");
    writeln!(process, "{}", 7).expect("write");
    process.flush().expect("flush");

    let echoed = process
        .read_int("echo")
        .and_then(|v| v.range(0, 10))
        .and_then(|v| v.newline())
        .expect("read");
    assert_eq!(echoed, 7);

    process.confirm_eof().expect("eof");
    process.terminate().expect("exit 0");
}

#[test]
fn close_write_side_lets_child_finish() {
    let mut process = ProcessBuilder::new().arg("cat").spawn().expect("spawn");
    process.write_line("-5 12").expect("write");
    process.close_write_side().expect("close");
    process.close_write_side().expect("close twice");

    assert_eq!(process.read_long("a").unwrap().space().unwrap(), -5);
    assert_eq!(process.read_long("b").unwrap().newline().unwrap(), 12);
    process.confirm_eof().expect("eof");
    process.terminate().expect("exit 0");
}

#[test]
fn nonzero_exit_is_a_process_error() {
    let mut process = shell("exit 3").spawn().expect("spawn");
    process.confirm_eof().expect("no output");
    let err = process.terminate().expect_err("exit 3");
    assert_eq!(err.category(), ErrorCategory::Process);
    assert!(matches!(err, CheckError::NonZeroExit { code: 3, .. }));
}

#[test]
fn killed_child_is_abnormal() {
    let mut process = shell("kill -9 $$").spawn().expect("spawn");
    process.confirm_eof().expect("no output");
    let err = process.terminate().expect_err("signal");
    assert!(err.is_process());
    match err {
        CheckError::AbnormalExit { detail, .. } => assert!(detail.contains("signal 9")),
        other => panic!("expected abnormal exit, got {other:?}"),
    }
}

#[test]
fn format_violation_from_child_aborts_reading() {
    let mut process = shell("echo 1,2").spawn().expect("spawn");
    let err = process
        .read_int("a")
        .and_then(|v| v.space())
        .expect_err("comma");
    assert!(err.is_format());
    assert!(err.to_string().starts_with("sh(1,2,a): "));
    assert_eq!(process.reading_state(), ReadState::Aborted);
    process.abort_reading();
    process.terminate().expect("exit 0");
}

#[test]
fn terminate_after_abort_does_not_wait_on_a_chatty_child() {
    let mut process = ProcessBuilder::new()
        .args(["yes", "abc"])
        .spawn()
        .expect("spawn");
    assert!(process.read_int("x").expect_err("letters").is_format());
    process.abort_reading();

    let (done, finished) = mpsc::channel();
    thread::spawn(move || {
        let _ = done.send(process.terminate());
    });
    let result = finished
        .recv_timeout(Duration::from_secs(30))
        .expect("terminate returned");
    assert!(result.expect_err("broken pipe").is_process());
}

#[test]
fn unsent_input_is_dropped_when_child_exits_cleanly() {
    let mut process = shell("exit 0").spawn().expect("spawn");
    process.write_str("1 2 3\n").expect("buffered");
    process.confirm_eof().expect("no output");
    process.terminate().expect("exit 0");
}

#[test]
fn mirror_records_both_directions() {
    let buffer = SharedBuffer::new();
    let mut process = shell("read a b; echo $((a + b))").spawn().expect("spawn");
    process.enable_mirror_to(buffer.sink());
    process.write_str("3 4\n").expect("write");
    process.flush().expect("flush");
    assert_eq!(process.read_int("sum").unwrap().newline().unwrap(), 7);
    process.confirm_eof().expect("eof");
    process.terminate().expect("exit 0");

    assert_eq!(buffer.contents(), "sh<out>: 1: 3 4\nsh<in>: 1: 7\n");
}

#[test]
fn raw_reader_aborts_strict_reading() {
    let mut process = shell("echo hello world").spawn().expect("spawn");
    let mut line = String::new();
    process.raw_reader().read_line(&mut line).expect("raw read");
    assert_eq!(line, "hello world\n");
    assert_eq!(process.reading_state(), ReadState::Aborted);
    process.terminate().expect("exit 0");
}

#[test]
fn program_override_keeps_argument_zero() {
    let mut process = ProcessBuilder::new()
        .program("sh")
        .args(["custom-name", "-c", "echo \"$0\""])
        .spawn()
        .expect("spawn");
    assert_eq!(process.name(), "sh");
    let mut line = String::new();
    process.raw_reader().read_line(&mut line).expect("raw read");
    assert_eq!(line, "custom-name\n");
    process.terminate().expect("exit 0");
}

#[test]
fn missing_executable_is_a_spawn_error() {
    let err = ProcessBuilder::new()
        .arg("/nonexistent/definitely-not-a-judge-child")
        .spawn()
        .expect_err("spawn");
    assert!(matches!(err, CheckError::Spawn { .. }));
    assert_eq!(err.category(), ErrorCategory::Environment);
}

#[test]
#[should_panic(expected = "logic violation: spawn() with an empty argument list")]
fn empty_argument_list_is_a_logic_violation() {
    let _ = ProcessBuilder::new().spawn();
}

#[test]
#[should_panic(expected = "call terminate() before dropping the process")]
fn dropping_unterminated_process_is_a_logic_violation() {
    let mut process = ProcessBuilder::new().arg("cat").spawn().expect("spawn");
    process.abort_reading();
    drop(process);
}

#[test]
#[should_panic(expected = "call confirm_eof() or abort_reading() before terminate()")]
fn terminate_with_open_reader_is_a_logic_violation() {
    let process = shell("exit 0").spawn().expect("spawn");
    let _ = process.terminate();
}

#[test]
#[should_panic(expected = "logic violation: write to cat after its write side was closed")]
fn writing_after_close_is_a_logic_violation() {
    let mut process = ProcessBuilder::new().arg("cat").spawn().expect("spawn");
    process.close_write_side().expect("close");
    let _ = process.write_str("1\n");
}
