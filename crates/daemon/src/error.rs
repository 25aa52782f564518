// SPDX-License-Identifier: MIT

//! Error kinds for the daemon's own I/O layer: sandbox bootstrap, process launch, lock
//! acquisition. `nsgod_core::SupervisorError` covers the pure state-machine errors; these
//! cover everything that touches the kernel.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to acquire lock file {path}: {source}")]
    LockFailed { path: String, #[source] source: std::io::Error },

    #[error("unshare({flags}) failed: {source}")]
    Unshare { flags: &'static str, #[source] source: nix::Error },

    #[error("failed to write {path}: {source}")]
    WriteProcSelf { path: &'static str, #[source] source: std::io::Error },

    #[error("mount {what} failed: {source}")]
    Mount { what: &'static str, #[source] source: nix::Error },

    #[error("fork failed: {0}")]
    Fork(nix::Error),

    #[error("setsid failed: {0}")]
    Setsid(nix::Error),

    #[error("eventfd creation failed: {0}")]
    EventFd(nix::Error),
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to open log file {path}: {source}")]
    LogOpen { path: String, #[source] source: std::io::Error },

    #[error("failed to allocate pty: {0}")]
    Pty(nix::Error),

    #[error("failed to create socketpair: {0}")]
    Socketpair(nix::Error),

    #[error("fork failed: {0}")]
    Fork(nix::Error),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid NSGOD_API address {addr:?}: {reason}")]
    InvalidAddr { addr: String, reason: &'static str },

    #[error("bind failed: {0}")]
    Bind(#[source] std::io::Error),
}
