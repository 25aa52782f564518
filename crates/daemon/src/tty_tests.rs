// SPDX-License-Identifier: MIT

use super::*;
use nix::pty::openpty;
use std::os::fd::AsRawFd;

#[test]
fn resize_overlays_only_the_provided_dimensions() {
    let pty = openpty(None, None).unwrap();
    let fd = pty.master.as_raw_fd();

    resize(fd, Some(120), Some(40)).unwrap();

    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    unsafe { tiocgwinsz(fd, &mut ws) }.unwrap();
    assert_eq!(ws.ws_col, 120);
    assert_eq!(ws.ws_row, 40);

    resize(fd, Some(100), None).unwrap();
    unsafe { tiocgwinsz(fd, &mut ws) }.unwrap();
    assert_eq!(ws.ws_col, 100);
    assert_eq!(ws.ws_row, 40);
}
