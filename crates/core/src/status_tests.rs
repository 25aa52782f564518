// SPDX-License-Identifier: MIT

use super::*;

#[test]
fn stopped_serializes_with_the_preserved_typo() {
    let json = serde_json::to_string(&ServiceStatus::Stopped).unwrap();
    assert_eq!(json, "\"stoped\"");
}

#[test]
fn status_round_trips_through_json() {
    for status in [ServiceStatus::Waiting, ServiceStatus::Running, ServiceStatus::Stopped, ServiceStatus::Exited] {
        let json = serde_json::to_string(&status).unwrap();
        let back: ServiceStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, status);
    }
}

#[test]
fn unknown_status_string_is_rejected() {
    let err = serde_json::from_str::<ServiceStatus>("\"stopped\"");
    assert!(err.is_err(), "the correctly-spelled variant must not be accepted on the wire");
}

#[test]
fn restart_mode_round_trips() {
    for mode in [RestartMode::Normal, RestartMode::Force, RestartMode::Prevent] {
        let json = serde_json::to_string(&mode).unwrap();
        let back: RestartMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mode);
    }
}

#[test]
fn restart_mode_defaults_to_normal() {
    assert_eq!(RestartMode::default(), RestartMode::Normal);
}
