// SPDX-License-Identifier: MIT

//! Error kinds raised by the `ServiceTable`/restart-policy layer.
//!
//! These map onto the "LookupError" and "StateError" kinds from SPEC_FULL.md §7. The RPC
//! dispatch layer (`nsgod_daemon::rpc`) flattens these to the wire `message: String` the
//! JSON-RPC error object carries; the exact strings below are part of the wire contract and
//! must not change.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SupervisorError {
    #[error("target service not exists.")]
    NotFound,

    #[error("target service exists and not exited.")]
    AlreadyExists,

    #[error("target service not exited.")]
    NotExited,

    #[error("target service exited.")]
    Exited,

    #[error("resize is only meaningful for pty-backed services.")]
    NotAPty,

    /// An OS call (`kill`, …) failed; carries `strerror(errno)` verbatim, per the upstream
    /// `nsgod.cpp`'s `throw std::runtime_error(strerror(errno))`.
    #[error("{0}")]
    Os(String),
}
