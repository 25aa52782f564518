// SPDX-License-Identifier: MIT

//! Process launcher (SPEC_FULL.md §4.2): forks a child, applies bind mounts under a
//! `chroot` root, replaces the child's image, and hands the parent back an I/O fd (PTY
//! master or socketpair end) plus an optional log fd.
//!
//! Grounded on `examples/original_source/src/process.cpp`'s `createProcess`.

use std::ffi::CString;
use std::fs::OpenOptions;
use std::os::fd::{AsRawFd, IntoRawFd, OwnedFd, RawFd};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use nix::mount::{mount, MsFlags};
use nix::pty::openpty;
use nix::sys::socket::{socketpair, AddressFamily, SockFlag, SockType};
use nix::unistd::{chdir, chroot, close, dup2, execvpe, fork, ForkResult};

use nsgod_core::launch_options::LaunchOptions;
use nsgod_core::service::LaunchedProcess;
use nsgod_core::status::ServiceStatus;

use crate::error::LaunchError;

fn open_log(path: &str) -> Result<OwnedFd, LaunchError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .custom_flags(libc::O_CLOEXEC)
        .open(path)
        .map(|f| f.into())
        .map_err(|source| LaunchError::LogOpen { path: path.to_string(), source })
}

fn to_cstrings(items: &[String]) -> Vec<CString> {
    items.iter().map(|s| CString::new(s.as_str()).unwrap_or_default()).collect()
}

/// Launch a new process per `options`. Returns the parent-side handle; the child never
/// returns from this call (it execs or exits).
pub fn create_process(options: &LaunchOptions) -> Result<(LaunchedProcess, Option<RawFd>), LaunchError> {
    let log_fd = if options.log.is_empty() { None } else { Some(open_log(&options.log)?) };

    let (parent_fd, child_side): (OwnedFd, ChildSide) = if options.pty {
        let pty = openpty(None, None).map_err(LaunchError::Pty)?;
        (pty.master, ChildSide::Pty(pty.slave))
    } else {
        let (a, b) = socketpair(
            AddressFamily::Unix,
            SockType::Stream,
            None,
            SockFlag::empty(),
        )
        .map_err(LaunchError::Socketpair)?;
        (a, ChildSide::Socket(b))
    };

    // SAFETY: the child only calls async-signal-safe operations (dup2/close/chroot/chdir)
    // and execvpe before returning control to arbitrary Rust code; it never unwinds back
    // into the caller.
    match unsafe { fork() }.map_err(LaunchError::Fork)? {
        ForkResult::Parent { child } => {
            let status =
                if options.waitstop { ServiceStatus::Waiting } else { ServiceStatus::Running };
            Ok((
                LaunchedProcess { pid: child.as_raw(), io_fd: parent_fd.into_raw_fd(), status },
                log_fd.map(|f| f.into_raw_fd()),
            ))
        }
        ForkResult::Child => {
            drop(parent_fd);
            run_child(child_side, options);
        }
    }
}

enum ChildSide {
    Pty(OwnedFd),
    Socket(OwnedFd),
}

/// Never returns: execs the target program or `_exit`s on failure.
fn run_child(side: ChildSide, options: &LaunchOptions) -> ! {
    let owned = match side {
        ChildSide::Pty(slave) => slave,
        ChildSide::Socket(sock) => sock,
    };
    let fd = owned.as_raw_fd();
    let _ = dup2(fd, 0);
    let _ = dup2(fd, 1);
    let _ = dup2(fd, 2);
    // `into_raw_fd` releases ownership so the descriptor isn't closed out from under 0/1/2
    // by `owned`'s drop; the explicit close below only runs for the original fd if it sits
    // above the standard streams.
    let fd = owned.into_raw_fd();
    if fd > 2 {
        let _ = close(fd);
    }

    let root = Path::new(&options.root);
    for (target, source) in &options.mounts {
        let dest = root.join(target.trim_start_matches('/'));
        let _ = mount(Some(Path::new(source)), &dest, Some("tmpfs"), MsFlags::MS_BIND | MsFlags::MS_REC, None::<&str>);
    }

    if chroot(root).is_err() {
        unsafe { libc::_exit(127) };
    }
    if chdir(Path::new(&options.cwd)).is_err() {
        unsafe { libc::_exit(127) };
    }

    let argv = to_cstrings(&options.cmdline);
    let envp = to_cstrings(&options.env);
    let _ = execvpe(&argv[0], &argv, &envp);

    // execvpe only returns on failure.
    unsafe { libc::_exit(127) };
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
