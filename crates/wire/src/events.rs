// SPDX-License-Identifier: MIT

//! Server-initiated notifications (SPEC_FULL.md §4.5, §6): `output`, `started`, `stopped`,
//! `updated`. These travel as `RpcNotification { event, data }` envelopes, never as
//! responses to a request.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::service_wire::ServiceStateWire;

/// A chunk of PTY/socketpair output relayed to subscribed clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputEvent {
    pub service: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartedEvent {
    pub service: String,
}

/// What happens to a service immediately after it dies, attached to the `stopped` event.
///
/// `Scheduled` and `Terminal` mirror the two outcomes `evaluate_restart` can produce;
/// `None` below (on `StoppedEvent::restart`) covers a plain one-shot exit with no restart
/// policy configured at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RestartNotice {
    Scheduled { max: u32, current: u32 },
    Terminal { error: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoppedEvent {
    pub service: String,
    #[serde(default)]
    pub restart: Option<RestartNotice>,
}

/// Full table snapshot, broadcast whenever the set of known services changes shape
/// (start/erase) rather than just a single service's fields.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdatedEvent {
    pub services: BTreeMap<String, ServiceStateWire>,
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
