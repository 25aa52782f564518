// SPDX-License-Identifier: MIT

//! `ServiceState`: everything the supervisor tracks about one named service.

use std::os::fd::RawFd;
use std::time::Instant;

use crate::clock::Clock;
use crate::launch_options::LaunchOptions;
use crate::status::{RestartMode, ServiceStatus};

/// The handle a successful launch hands back to the supervisor: the bits that come from
/// actually forking a child, as opposed to the configuration that produced them.
#[derive(Debug, Clone, Copy)]
pub struct LaunchedProcess {
    pub pid: i32,
    pub io_fd: RawFd,
    pub status: ServiceStatus,
}

/// Live state of one supervised service.
///
/// Owned exclusively by the daemon's `ServiceTable` (no sharing, no locks — see
/// SPEC_FULL.md §5). `io_fd`/`log_fd` are raw descriptors; this crate does no I/O, so it never
/// closes them — closing on the `Exited` transition and on `erase` is the daemon's job
/// (`nsgod_daemon::supervisor`), this type only tracks which descriptors are currently live.
#[derive(Debug, Clone)]
pub struct ServiceState {
    pub name: String,
    pub pid: i32,
    pub status: ServiceStatus,
    pub restart_count: u32,
    pub restart_mode: RestartMode,
    pub start_time_epoch: u64,
    pub dead_time_epoch: Option<u64>,
    /// Monotonic death timestamp, used only for the `reset_timer` comparison; not on the wire.
    pub last_dead_instant: Option<Instant>,
    pub options: LaunchOptions,
    pub io_fd: RawFd,
    pub log_fd: Option<RawFd>,
}

impl ServiceState {
    /// Construct the initial entry for a freshly launched service.
    pub fn new(
        name: impl Into<String>,
        options: LaunchOptions,
        launched: LaunchedProcess,
        log_fd: Option<RawFd>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            name: name.into(),
            pid: launched.pid,
            status: launched.status,
            restart_count: 0,
            restart_mode: RestartMode::Normal,
            start_time_epoch: clock.epoch_secs(),
            dead_time_epoch: None,
            last_dead_instant: None,
            options,
            io_fd: launched.io_fd,
            log_fd,
        }
    }

    /// Splice a freshly-launched process into this (already-existing) entry, as done by the
    /// restart-policy relaunch path (SPEC_FULL.md §4.5 step 4). The `name` and `options` are
    /// unchanged; `restart_mode` resets to `Normal` per SPEC_FULL.md §9.
    pub fn splice_restarted(
        &mut self,
        launched: LaunchedProcess,
        log_fd: Option<RawFd>,
        restart_count: u32,
        clock: &impl Clock,
    ) {
        self.pid = launched.pid;
        self.status = launched.status;
        self.io_fd = launched.io_fd;
        self.log_fd = log_fd;
        self.restart_count = restart_count;
        self.restart_mode = RestartMode::Normal;
        self.start_time_epoch = clock.epoch_secs();
        self.dead_time_epoch = None;
        self.last_dead_instant = None;
    }

    /// Record this service as having just exited (`WIFEXITED`/`WIFSIGNALED`).
    pub fn mark_exited(&mut self, clock: &impl Clock) {
        self.status = ServiceStatus::Exited;
        self.dead_time_epoch = Some(clock.epoch_secs());
        self.last_dead_instant = Some(clock.now());
    }

    pub fn is_pty(&self) -> bool {
        self.options.pty
    }

    /// Mark the I/O descriptor as already closed (the child hung up) and hand back the log fd
    /// for the caller to close exactly once. After this, `io_fd` is a sentinel (`-1`) and
    /// `log_fd` is `None`, so a later cleanup pass (`erase`, or `start` over this now-`Exited`
    /// entry) won't re-close descriptors the kernel may already have reused.
    pub fn take_closed_fds(&mut self) -> Option<RawFd> {
        self.io_fd = -1;
        self.log_fd.take()
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
