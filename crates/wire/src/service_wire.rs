// SPDX-License-Identifier: MIT

//! The `ServiceState` serialization named in SPEC_FULL.md §6: `pid, status, start_time,
//! dead_time, restart, options`. Deliberately excludes `restart_count` and the raw fds —
//! those are internal bookkeeping, not part of the wire contract.

use nsgod_core::{LaunchOptions, RestartMode, ServiceState, ServiceStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStateWire {
    pub pid: i32,
    pub status: ServiceStatus,
    pub start_time: u64,
    pub dead_time: Option<u64>,
    pub restart: RestartMode,
    pub options: LaunchOptions,
}

impl From<&ServiceState> for ServiceStateWire {
    fn from(state: &ServiceState) -> Self {
        Self {
            pid: state.pid,
            status: state.status,
            start_time: state.start_time_epoch,
            dead_time: state.dead_time_epoch,
            restart: state.restart_mode,
            options: state.options.clone(),
        }
    }
}

#[cfg(test)]
#[path = "service_wire_tests.rs"]
mod tests;
