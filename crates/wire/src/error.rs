// SPDX-License-Identifier: MIT

//! Wire-level ("ProtocolError") failures: malformed RPC payloads.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("missing required field {0:?}")]
    MissingField(&'static str),

    #[error("invalid JSON-RPC method {0:?}")]
    UnknownMethod(String),

    #[error("malformed request body: {0}")]
    Malformed(String),
}
