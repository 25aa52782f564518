// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! nsgod: a namespaced process supervisor daemon. See `SPEC_FULL.md` for the full design;
//! in short, `sandbox` bootstraps the namespace and daemonizes, `launch` forks and execs
//! supervised children, `supervisor` owns the service table and RPC dispatch, and
//! `transport` carries JSON-RPC requests and notifications over a WebSocket control socket.

pub mod env;
pub mod error;
pub mod event_loop;
pub mod launch;
pub mod lockfile;
pub mod sandbox;
pub mod signals;
pub mod supervisor;
pub mod transport;
pub mod tty;
