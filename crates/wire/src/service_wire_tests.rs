// SPDX-License-Identifier: MIT

use super::*;
use nsgod_core::clock::{Clock, FakeClock};
use nsgod_core::service::{LaunchedProcess, ServiceState};

fn opts() -> LaunchOptions {
    LaunchOptions {
        cmdline: vec!["/bin/true".to_string()],
        waitstop: false,
        pty: false,
        root: "/".to_string(),
        cwd: ".".to_string(),
        log: String::new(),
        env: vec![],
        mounts: Default::default(),
        restart: Default::default(),
    }
}

#[test]
fn wire_dto_excludes_restart_count_and_raw_fds() {
    let clock = FakeClock::new();
    let state = ServiceState::new(
        "echo",
        opts(),
        LaunchedProcess { pid: 7, io_fd: 3, status: ServiceStatus::Running },
        None,
        &clock,
    );

    let wire = ServiceStateWire::from(&state);
    let json = serde_json::to_value(&wire).unwrap();

    assert_eq!(json["pid"], 7);
    assert_eq!(json["status"], "running");
    assert_eq!(json["start_time"], clock.epoch_secs());
    assert!(json.get("restart_count").is_none());
    assert!(json.get("io_fd").is_none());
}
