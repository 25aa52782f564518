// SPDX-License-Identifier: MIT

//! Typed request parameters for the RPC methods in SPEC_FULL.md §4.5 that take more than a
//! bare `service` name.

use nsgod_core::{LaunchOptions, RestartMode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartParams {
    pub service: String,
    pub options: LaunchOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendParams {
    pub service: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResizeParams {
    pub service: String,
    #[serde(default)]
    pub column: Option<u16>,
    #[serde(default)]
    pub row: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EraseParams {
    pub service: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StatusParams {
    #[serde(default)]
    pub service: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KillParams {
    pub service: String,
    pub signal: i32,
    #[serde(default)]
    pub restart: Option<RestartMode>,
}

#[cfg(test)]
#[path = "methods_tests.rs"]
mod tests;
