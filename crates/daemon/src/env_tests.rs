// SPDX-License-Identifier: MIT

use super::*;
use serial_test::serial;

#[test]
#[serial]
fn api_addr_defaults_to_unix_socket() {
    std::env::remove_var("NSGOD_API");
    assert_eq!(api_addr(), "ws+unix://nsgod.socket");
}

#[test]
#[serial]
fn api_addr_honors_override() {
    std::env::set_var("NSGOD_API", "ws://127.0.0.1:9999");
    assert_eq!(api_addr(), "ws://127.0.0.1:9999");
    std::env::remove_var("NSGOD_API");
}

#[test]
#[serial]
fn debug_is_false_when_unset_or_empty() {
    std::env::remove_var("NSGOD_DEBUG");
    assert!(!debug());
    std::env::set_var("NSGOD_DEBUG", "");
    assert!(!debug());
    std::env::remove_var("NSGOD_DEBUG");
}

#[test]
#[serial]
fn log_filter_falls_back_to_rust_log_then_info() {
    std::env::remove_var("NSGOD_LOG");
    std::env::remove_var("RUST_LOG");
    assert_eq!(log_filter(), "info");
    std::env::set_var("RUST_LOG", "debug");
    assert_eq!(log_filter(), "debug");
    std::env::remove_var("RUST_LOG");
}
