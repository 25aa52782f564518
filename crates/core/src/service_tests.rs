// SPDX-License-Identifier: MIT

use super::*;
use crate::clock::FakeClock;
use crate::launch_options::LaunchOptions;

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
fn new_entry_takes_status_from_the_launched_process() {
    let clock = FakeClock::new();
    let launched = LaunchedProcess { pid: 42, io_fd: 7, status: ServiceStatus::Running };
    let state = ServiceState::new("web", opts(), launched, Some(9), &clock);

    assert_eq!(state.name, "web");
    assert_eq!(state.pid, 42);
    assert_eq!(state.io_fd, 7);
    assert_eq!(state.log_fd, Some(9));
    assert_eq!(state.status, ServiceStatus::Running);
    assert_eq!(state.restart_count, 0);
    assert_eq!(state.restart_mode, RestartMode::Normal);
    assert_eq!(state.start_time_epoch, clock.epoch_secs());
    assert_eq!(state.dead_time_epoch, None);
}

#[test]
fn splice_restarted_resets_restart_mode_and_clears_dead_time() {
    let clock = FakeClock::new();
    let launched = LaunchedProcess { pid: 1, io_fd: 3, status: ServiceStatus::Running };
    let mut state = ServiceState::new("web", opts(), launched, None, &clock);
    state.restart_mode = RestartMode::Force;
    state.mark_exited(&clock);
    assert_eq!(state.status, ServiceStatus::Exited);

    clock.advance(std::time::Duration::from_secs(1));
    let relaunched = LaunchedProcess { pid: 2, io_fd: 4, status: ServiceStatus::Running };
    state.splice_restarted(relaunched, None, 1, &clock);

    assert_eq!(state.pid, 2);
    assert_eq!(state.io_fd, 4);
    assert_eq!(state.restart_count, 1);
    assert_eq!(state.restart_mode, RestartMode::Normal);
    assert_eq!(state.dead_time_epoch, None);
    assert_eq!(state.start_time_epoch, clock.epoch_secs());
}

#[test]
fn mark_exited_records_dead_time_and_removes_pid_liveness() {
    let clock = FakeClock::new();
    let launched = LaunchedProcess { pid: 1, io_fd: 3, status: ServiceStatus::Waiting };
    let mut state = ServiceState::new("web", opts(), launched, None, &clock);

    state.mark_exited(&clock);

    assert_eq!(state.status, ServiceStatus::Exited);
    assert_eq!(state.dead_time_epoch, Some(clock.epoch_secs()));
    assert!(state.last_dead_instant.is_some());
}
