// SPDX-License-Identifier: MIT

use super::*;
use nsgod_core::clock::FakeClock;

fn new_supervisor() -> (Supervisor<FakeClock>, mpsc::UnboundedReceiver<Notification>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Supervisor::with_clock(FakeClock::new(), tx), rx)
}

fn start_params(service: &str, cmdline: &[&str]) -> Value {
    serde_json::json!({
        "service": service,
        "options": {
            "cmdline": cmdline,
        }
    })
}

#[test]
fn ping_echoes_the_request_body_unchanged() {
    let (mut sup, _rx) = new_supervisor();
    let body = serde_json::json!({"a": 1, "b": "two"});
    let result = sup.dispatch("ping", body.clone()).unwrap();
    assert_eq!(result, body);
}

#[test]
fn version_returns_a_v_prefixed_string() {
    let (mut sup, _rx) = new_supervisor();
    let result = sup.dispatch("version", Value::Null).unwrap();
    assert!(result.as_str().unwrap().starts_with('v'));
}

#[test]
fn start_twice_without_exit_fails_with_exact_message() {
    let (mut sup, _rx) = new_supervisor();
    sup.dispatch("start", start_params("echo", &["/bin/echo", "hi"])).unwrap();
    let err = sup.dispatch("start", start_params("echo", &["/bin/echo", "hi"])).unwrap_err();
    assert_eq!(err, "target service exists and not exited.");
}

#[test]
fn send_to_unknown_service_fails_with_exact_message() {
    let (mut sup, _rx) = new_supervisor();
    let err = sup
        .dispatch("send", serde_json::json!({"service": "nope", "data": "x"}))
        .unwrap_err();
    assert_eq!(err, "target service not exists.");
}

#[test]
fn erase_of_a_running_service_fails_with_exact_message() {
    let (mut sup, _rx) = new_supervisor();
    sup.dispatch("start", start_params("sleeper", &["/bin/sleep", "5"])).unwrap();
    let err = sup.dispatch("erase", serde_json::json!({"service": "sleeper"})).unwrap_err();
    assert_eq!(err, "target service not exited.");
    // clean up the spawned child so the test process doesn't leak it.
    if let Some(state) = sup.table.get("sleeper") {
        let _ = kill(Pid::from_raw(state.pid), Signal::SIGKILL);
        let _ = waitpid(Pid::from_raw(state.pid), None);
    }
}

#[test]
fn resize_on_a_non_pty_service_is_rejected() {
    let (mut sup, _rx) = new_supervisor();
    sup.dispatch("start", start_params("echo", &["/bin/echo", "hi"])).unwrap();
    let err = sup
        .dispatch("resize", serde_json::json!({"service": "echo", "column": 80}))
        .unwrap_err();
    assert_eq!(err, "resize is only meaningful for pty-backed services.");
}

#[test]
fn status_with_no_service_returns_the_full_table() {
    let (mut sup, _rx) = new_supervisor();
    sup.dispatch("start", start_params("echo", &["/bin/echo", "hi"])).unwrap();
    let result = sup.dispatch("status", Value::Null).unwrap();
    assert!(result.get("echo").is_some());
}
