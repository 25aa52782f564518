// SPDX-License-Identifier: MIT

//! Client-side error kinds. A [`ClientError::Remote`] carries the daemon's own error message
//! verbatim — per SPEC_FULL.md §6 it's written to stdout, not stderr, matching the upstream
//! `nsctl`'s `do_fail` handler.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to connect to control socket: {0}")]
    Connect(#[source] std::io::Error),

    #[error("websocket handshake failed: {0}")]
    Handshake(#[source] tokio_tungstenite::tungstenite::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("connection closed unexpectedly")]
    ConnectionClosed,

    #[error("terminal control failed: {0}")]
    Termios(#[source] rustix::io::Errno),

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("invalid JSON on stdin: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),

    #[error("{0}")]
    Remote(String),
}
