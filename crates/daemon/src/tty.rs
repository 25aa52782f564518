// SPDX-License-Identifier: MIT

//! `TIOCGWINSZ`/`TIOCSWINSZ` wrappers for the `resize` RPC (SPEC_FULL.md §4.5), applied to a
//! PTY master fd. Not exposed by `nix::pty`, so defined directly via `nix::ioctl_*` macros,
//! the pattern the crate documents for ioctls it doesn't wrap itself.

use std::os::fd::RawFd;

use nix::ioctl_read_bad;
use nix::ioctl_write_ptr_bad;

ioctl_read_bad!(tiocgwinsz, libc::TIOCGWINSZ, libc::winsize);
ioctl_write_ptr_bad!(tiocswinsz, libc::TIOCSWINSZ, libc::winsize);

/// Read the current window size, overlay `column`/`row` where provided, and apply it back.
pub fn resize(fd: RawFd, column: Option<u16>, row: Option<u16>) -> nix::Result<()> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    unsafe { tiocgwinsz(fd, &mut ws) }?;
    if let Some(col) = column {
        ws.ws_col = col;
    }
    if let Some(row) = row {
        ws.ws_row = row;
    }
    unsafe { tiocswinsz(fd, &ws) }?;
    Ok(())
}

#[cfg(test)]
#[path = "tty_tests.rs"]
mod tests;
