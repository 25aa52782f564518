// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn resize_params_allow_either_dimension_to_be_absent() {
    let params: ResizeParams =
        serde_json::from_str(r#"{"service": "tty", "column": 80}"#).unwrap();
    assert_eq!(params.column, Some(80));
    assert_eq!(params.row, None);
}

#[test]
fn status_params_default_to_no_service_filter() {
    let params: StatusParams = serde_json::from_str(r#"{}"#).unwrap();
    assert!(params.service.is_none());
}

#[test]
fn kill_params_restart_mode_defaults_to_absent() {
    let params: KillParams =
        serde_json::from_str(r#"{"service": "echo", "signal": 9}"#).unwrap();
    assert_eq!(params.signal, 9);
    assert!(params.restart.is_none());
}

#[test]
fn start_params_round_trip_embedded_launch_options() {
    let json = serde_json::json!({
        "service": "echo",
        "options": {
            "cmdline": ["/bin/echo", "hi"],
        }
    });
    let params: StartParams = serde_json::from_value(json).unwrap();
    assert_eq!(params.service, "echo");
    assert_eq!(params.options.cmdline, vec!["/bin/echo", "hi"]);
}
