// SPDX-License-Identifier: MIT

//! nsgod-wire: the JSON-RPC-over-WebSocket contract between `nsgod` and `nsctl`
//! (SPEC_FULL.md §6).
//!
//! This crate has no behavior of its own — it's the shared vocabulary both the daemon and the
//! CLI serialize/deserialize against, the same role `oj-wire` plays for the teacher's daemon
//! and CLI crates.

pub mod envelope;
pub mod events;
pub mod error;
pub mod methods;
pub mod service_wire;

pub use envelope::{ok_response, RpcErrorObject, RpcNotification, RpcRequest, RpcResponse};
pub use error::ProtocolError;
pub use events::{OutputEvent, RestartNotice, StartedEvent, StoppedEvent, UpdatedEvent};
pub use methods::{
    EraseParams, KillParams, ResizeParams, SendParams, StartParams, StatusParams,
};
pub use service_wire::ServiceStateWire;
