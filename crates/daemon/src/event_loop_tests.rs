// SPDX-License-Identifier: MIT

use super::*;
use nix::unistd::{pipe, write};
use std::os::fd::AsRawFd;

#[tokio::test]
async fn readiness_is_reported_with_the_registered_tag() {
    let (read_end, write_end) = pipe().unwrap();
    let mut event_loop = EventLoop::new();
    let token = event_loop.register(Source::ChildIo);
    event_loop.add(read_end.as_raw_fd(), token).unwrap();

    write(&write_end, b"x").unwrap();

    let ready = event_loop.wait().await.unwrap();
    assert_eq!(ready.token, token);
    assert_eq!(ready.source, Source::ChildIo);
    assert_eq!(ready.fd, read_end.as_raw_fd());
}

#[tokio::test]
async fn del_stops_further_notifications() {
    let (read_end, write_end) = pipe().unwrap();
    let mut event_loop = EventLoop::new();
    let token = event_loop.register(Source::ChildIo);
    event_loop.add(read_end.as_raw_fd(), token).unwrap();
    event_loop.del(read_end.as_raw_fd());

    write(&write_end, b"x").unwrap();

    let result = tokio::time::timeout(std::time::Duration::from_millis(50), event_loop.wait()).await;
    assert!(result.is_err(), "expected no notification after del()");
}

#[tokio::test]
async fn shutdown_drains_to_none() {
    let mut event_loop = EventLoop::new();
    event_loop.shutdown();
    assert!(event_loop.wait().await.is_none());
}
