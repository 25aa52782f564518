// SPDX-License-Identifier: MIT

//! `LaunchOptions`: the immutable record a `start` request hands to the process launcher.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_root() -> String {
    "/".to_string()
}

fn default_cwd() -> String {
    ".".to_string()
}

/// Restart policy attached to a service's `LaunchOptions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestartPolicy {
    pub enabled: bool,
    pub max: u32,
    /// Milliseconds a process must run before a subsequent death resets `restart_count`.
    #[serde(rename = "reset_timer")]
    pub reset_timer_ms: u64,
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self { enabled: false, max: 0, reset_timer_ms: 0 }
    }
}

impl RestartPolicy {
    pub fn reset_timer(&self) -> Duration {
        Duration::from_millis(self.reset_timer_ms)
    }
}

/// Launch configuration for a service, as submitted in a `start` RPC request.
///
/// Stored verbatim inside the `ServiceState` so a restart can call the launcher again
/// with the exact same options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchOptions {
    /// Non-empty argv. `cmdline[0]` is resolved via `PATH` (`execvpe` semantics).
    pub cmdline: Vec<String>,

    #[serde(default)]
    pub waitstop: bool,

    #[serde(default)]
    pub pty: bool,

    /// Filesystem root the child is `chroot`ed into.
    #[serde(default = "default_root")]
    pub root: String,

    /// Working directory, relative to `root`.
    #[serde(default = "default_cwd")]
    pub cwd: String,

    /// Log file path (host side, opened before the fork). Empty means no logging.
    #[serde(default)]
    pub log: String,

    /// `KEY=VALUE` environment entries passed to `execvpe`.
    #[serde(default)]
    pub env: Vec<String>,

    /// In-root target path -> host source path, bind-mounted before `chroot`.
    #[serde(default)]
    pub mounts: BTreeMap<String, String>,

    #[serde(default)]
    pub restart: RestartPolicy,
}

impl LaunchOptions {
    /// Validate the parts of the contract serde defaults can't express:
    /// `cmdline` must be non-empty.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.cmdline.is_empty() {
            return Err("cmdline must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "launch_options_tests.rs"]
mod tests;
