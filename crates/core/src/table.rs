// SPDX-License-Identifier: MIT

//! `ServiceTable`: the `name -> ServiceState` map plus its two reverse indices, kept in
//! lockstep so invariants 1-2 in SPEC_FULL.md §8 can't be violated by a partial update.

use std::collections::BTreeMap;
use std::os::fd::RawFd;

use crate::service::ServiceState;
use crate::status::ServiceStatus;

/// Process-wide (single-instance) table of supervised services.
///
/// Every mutation goes through one of the methods below rather than touching the three maps
/// directly, so the reverse indices never drift from the primary map.
#[derive(Debug, Default)]
pub struct ServiceTable {
    by_name: BTreeMap<String, ServiceState>,
    by_pid: BTreeMap<i32, String>,
    by_fd: BTreeMap<RawFd, String>,
}

impl ServiceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ServiceState> {
        self.by_name.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ServiceState> {
        self.by_name.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ServiceState)> {
        self.by_name.iter()
    }

    pub fn name_for_pid(&self, pid: i32) -> Option<&str> {
        self.by_pid.get(&pid).map(String::as_str)
    }

    /// Look up the owning service name for an `io_fd`. Kept around (rather than removed
    /// immediately) until the fd observes EPOLLHUP/EPOLLERR or the entry is erased, per the
    /// `Exited` invariant in SPEC_FULL.md §3.
    pub fn name_for_fd(&self, fd: RawFd) -> Option<&str> {
        self.by_fd.get(&fd).map(String::as_str)
    }

    /// Insert a brand-new entry. Panics (debug-only, via `debug_assert`) if `name` already
    /// exists — callers must `remove` an `Exited` entry first, per the `start` RPC contract.
    pub fn insert(&mut self, state: ServiceState) {
        debug_assert!(!self.by_name.contains_key(&state.name), "duplicate service name inserted");
        let name = state.name.clone();
        if state.status != ServiceStatus::Exited {
            self.by_pid.insert(state.pid, name.clone());
        }
        self.by_fd.insert(state.io_fd, name.clone());
        self.by_name.insert(name, state);
    }

    /// Remove an entry entirely, dropping it from both reverse indices. Returns the removed
    /// state so the caller (the daemon) can close its FDs.
    pub fn remove(&mut self, name: &str) -> Option<ServiceState> {
        let state = self.by_name.remove(name)?;
        self.by_pid.remove(&state.pid);
        self.by_fd.remove(&state.io_fd);
        Some(state)
    }

    /// Apply the `WIFEXITED`/`WIFSIGNALED` transition: mark the entry `Exited` and drop it
    /// from the `pid -> name` index (invariant 2), but leave `fd -> name` alone — that index
    /// is only dropped by [`ServiceTable::drop_fd`] once the fd itself hangs up, or by
    /// [`ServiceTable::remove`].
    pub fn mark_exited(&mut self, name: &str, clock: &impl crate::clock::Clock) {
        if let Some(state) = self.by_name.get_mut(name) {
            self.by_pid.remove(&state.pid);
            state.mark_exited(clock);
        }
    }

    /// Splice a relaunched process into an existing entry (restart path): update both
    /// reverse indices to point at the new pid/fd, without touching `name`.
    pub fn splice_restarted(
        &mut self,
        name: &str,
        launched: crate::service::LaunchedProcess,
        log_fd: Option<RawFd>,
        restart_count: u32,
        clock: &impl crate::clock::Clock,
    ) {
        let Some(state) = self.by_name.get_mut(name) else { return };
        let old_fd = state.io_fd;
        self.by_fd.remove(&old_fd);
        state.splice_restarted(launched, log_fd, restart_count, clock);
        self.by_pid.insert(state.pid, name.to_string());
        self.by_fd.insert(state.io_fd, name.to_string());
    }

    /// Drop `fd` from the `fd -> name` index (the other half of the child-I/O hangup handler;
    /// the daemon reads [`ServiceTable::name_for_fd`] *before* calling this, resolving the
    /// ordering bug noted in SPEC_FULL.md §9).
    pub fn drop_fd(&mut self, fd: RawFd) {
        self.by_fd.remove(&fd);
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
