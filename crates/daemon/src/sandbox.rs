// SPDX-License-Identifier: MIT

//! Sandbox bootstrap (SPEC_FULL.md §4.1): unshares user/mount/PID/IPC namespaces, maps the
//! current UID/GID to root inside, daemonizes into the new PID namespace via a signalling
//! fork, remounts `/proc`, ignores `SIGPIPE`.
//!
//! Grounded on `examples/original_source/src/process.cpp`'s `init()`.

use nix::mount::{mount, MsFlags};
use nix::sched::{unshare, CloneFlags};
use nix::sys::eventfd::{EfdFlags, EventFd};
use nix::sys::signal::{signal, SigHandler, Signal};
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::{fork, setsid, ForkResult, Gid, Uid};
use tracing::{error, info};

use crate::error::SetupError;

fn write_proc_self(path: &'static str, content: String) -> Result<(), SetupError> {
    std::fs::write(path, content)
        .map_err(|source| SetupError::WriteProcSelf { path, source })
}

fn format_id_map(id: u32) -> String {
    format!("0 {id} 1")
}

fn map_to_root(path: &'static str, id: u32) -> Result<(), SetupError> {
    write_proc_self(path, format_id_map(id))
}

/// Establish the namespace sandbox. Returns the ready-notification fd the caller must write
/// to (and close) once the RPC transport is up; `None` in debug mode, where no PID-namespace
/// re-fork happens and the daemon runs directly as the caller's child.
pub fn init(debug: bool) -> Result<Option<EventFd>, SetupError> {
    let euid = Uid::current();
    let egid = Gid::current();

    let mut flags = CloneFlags::CLONE_NEWUSER | CloneFlags::CLONE_NEWNS | CloneFlags::CLONE_NEWIPC;
    if !debug {
        flags |= CloneFlags::CLONE_NEWPID;
    }
    unshare(flags).map_err(|source| SetupError::Unshare { flags: "user|mount|pid|ipc", source })?;

    write_proc_self("/proc/self/setgroups", "deny".to_string())?;
    map_to_root("/proc/self/uid_map", euid.as_raw())?;
    map_to_root("/proc/self/gid_map", egid.as_raw())?;

    if debug {
        remount_proc_and_ignore_sigpipe()?;
        return Ok(None);
    }

    let notify = EventFd::from_value_and_flags(0, EfdFlags::EFD_CLOEXEC)
        .map_err(SetupError::EventFd)?;

    // SAFETY: called before any threads are spawned; the child immediately calls setsid and
    // either execs or returns to the caller, never touching non-async-signal-safe state that
    // was shared with the parent beyond what's required here.
    match unsafe { fork() }.map_err(SetupError::Fork)? {
        ForkResult::Parent { child } => {
            // We are PID 1's parent in the new namespace. Wait for the real init (our child)
            // to either signal readiness via the eventfd or die trying.
            loop {
                match waitpid(child, None) {
                    Ok(WaitStatus::Exited(_, code)) => {
                        error!(code, "sandboxed init exited before signalling readiness");
                        std::process::exit(code);
                    }
                    Ok(WaitStatus::Signaled(_, sig, _)) => {
                        error!(?sig, "sandboxed init was killed before signalling readiness");
                        std::process::exit(1);
                    }
                    Ok(_) => continue,
                    Err(source) => return Err(SetupError::Fork(source)),
                }
            }
        }
        ForkResult::Child => {
            setsid().map_err(SetupError::Setsid)?;
            remount_proc_and_ignore_sigpipe()?;
            info!("sandbox bootstrap complete, running as pid 1 of new namespace");
            Ok(Some(notify))
        }
    }
}

fn remount_proc_and_ignore_sigpipe() -> Result<(), SetupError> {
    mount(
        Some("proc"),
        "/proc",
        Some("proc"),
        MsFlags::empty(),
        None::<&str>,
    )
    .map_err(|source| SetupError::Mount { what: "/proc", source })?;

    // SAFETY: installing a plain signal disposition, no signal-handler closures involved.
    unsafe { signal(Signal::SIGPIPE, SigHandler::SigIgn) }.map_err(SetupError::Setsid)?;
    Ok(())
}

/// Write the readiness notification, per SPEC_FULL.md §4.1 step 6. The fd is closed when
/// `notify` is dropped.
pub fn notify_ready(notify: EventFd) -> nix::Result<()> {
    notify.write(1)?;
    Ok(())
}

#[cfg(test)]
#[path = "sandbox_tests.rs"]
mod tests;
