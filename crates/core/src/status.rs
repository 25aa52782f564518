// SPDX-License-Identifier: MIT

//! Service status and restart-mode enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a supervised service.
///
/// `Waiting -> Running -> (Stopped <-> Running)* -> Exited`, driven entirely by `SIGCHLD`
/// (see `nsgod_daemon::supervisor`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    /// `waitstop = true` and the child hasn't raised its first `SIGSTOP` yet.
    Waiting,
    Running,
    Stopped,
    Exited,
}

impl ServiceStatus {
    // The wire contract documents a fifth string, "restarting", but the state machine
    // (SPEC_FULL.md §4.5) never assigns that status to a `ServiceState`: a restart splices a
    // fresh pid/fd into the existing entry and reports it through the `stopped` event's
    // `restart` field instead. No variant here produces "restarting".

    /// The wire string for this status.
    ///
    /// `Stopped` serializes as `"stoped"` (sic) — a typo in the original nsgod wire
    /// contract that existing clients depend on; see SPEC_FULL.md §9.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            ServiceStatus::Waiting => "waiting",
            ServiceStatus::Running => "running",
            ServiceStatus::Stopped => "stoped",
            ServiceStatus::Exited => "exited",
        }
    }
}

crate::simple_display! {
    ServiceStatus {
        Waiting => "waiting",
        Running => "running",
        Stopped => "stoped",
        Exited => "exited",
    }
}

impl Serialize for ServiceStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_wire_str())
    }
}

impl<'de> Deserialize<'de> for ServiceStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "waiting" => Ok(ServiceStatus::Waiting),
            "running" => Ok(ServiceStatus::Running),
            "stoped" => Ok(ServiceStatus::Stopped),
            "exited" => Ok(ServiceStatus::Exited),
            other => Err(serde::de::Error::custom(format!("unknown service status {other:?}"))),
        }
    }
}

/// Per-invocation override of the restart policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartMode {
    /// Follow `RestartPolicy` as configured.
    #[default]
    Normal,
    /// Restart once regardless of policy.
    Force,
    /// Never restart, regardless of policy.
    Prevent,
}

crate::simple_display! {
    RestartMode {
        Normal => "normal",
        Force => "force",
        Prevent => "prevent",
    }
}

impl Serialize for RestartMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RestartMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            "normal" => Ok(RestartMode::Normal),
            "force" => Ok(RestartMode::Force),
            "prevent" => Ok(RestartMode::Prevent),
            other => Err(serde::de::Error::custom(format!("unknown restart mode {other:?}"))),
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
