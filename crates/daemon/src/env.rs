// SPDX-License-Identifier: MIT

//! Centralized environment variable access for the daemon crate (SPEC_FULL.md §6).
//!
//! Mirrors the teacher's `oj-daemon::env` centralization pattern: one module, one function
//! per variable, each documented with its default.

/// Control-socket address. `ws+unix://<path>` selects a UNIX domain socket; anything else is
/// parsed as a `host:port` TCP address.
pub fn api_addr() -> String {
    std::env::var("NSGOD_API").unwrap_or_else(|_| "ws+unix://nsgod.socket".to_string())
}

/// Advisory lock file path, held for the daemon's lifetime to prevent a second instance
/// binding the same control socket.
pub fn lock_path() -> String {
    std::env::var("NSGOD_LOCK").unwrap_or_else(|_| "nsgod.lock".to_string())
}

/// Non-empty ⇒ skip the PID-namespace re-fork in the sandbox bootstrap (SPEC_FULL.md §4.1).
pub fn debug() -> bool {
    std::env::var("NSGOD_DEBUG").map(|v| !v.is_empty()).unwrap_or(false)
}

/// `tracing_subscriber::EnvFilter` directive string. Falls back to `RUST_LOG`, default `info`.
pub fn log_filter() -> String {
    std::env::var("NSGOD_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
