// SPDX-License-Identifier: MIT

use super::*;
use nix::sys::wait::{waitpid, WaitStatus};
use nix::unistd::Pid;
use std::io::Read;
use std::os::fd::FromRawFd;

fn opts(cmdline: Vec<&str>) -> LaunchOptions {
    LaunchOptions {
        cmdline: cmdline.into_iter().map(str::to_string).collect(),
        waitstop: false,
        pty: false,
        root: "/".to_string(),
        cwd: "/".to_string(),
        log: String::new(),
        env: vec![],
        mounts: Default::default(),
        restart: Default::default(),
    }
}

#[test]
fn to_cstrings_converts_plain_ascii_args() {
    let out = to_cstrings(&["/bin/echo".to_string(), "hi".to_string()]);
    assert_eq!(out[0].to_str().unwrap(), "/bin/echo");
    assert_eq!(out[1].to_str().unwrap(), "hi");
}

#[test]
fn create_process_execs_and_relays_output_over_socketpair() {
    let options = opts(vec!["/bin/echo", "hello-from-child"]);
    let (launched, log_fd) = create_process(&options).unwrap();
    assert!(log_fd.is_none());
    assert_eq!(launched.status, ServiceStatus::Running);

    let mut out = String::new();
    let mut file = unsafe { std::fs::File::from_raw_fd(launched.io_fd) };
    file.read_to_string(&mut out).ok();

    let status = waitpid(Pid::from_raw(launched.pid), None).unwrap();
    assert!(matches!(status, WaitStatus::Exited(_, 0)));
    assert!(out.contains("hello-from-child"));
}
