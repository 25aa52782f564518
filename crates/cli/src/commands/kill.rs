// SPDX-License-Identifier: MIT

//! `kill <service> <signal>`: send an arbitrary numeric signal.

use serde_json::json;

use crate::client::RpcClient;
use crate::error::ClientError;

pub async fn run(client: &mut RpcClient, service: String, signal: i32) -> Result<(), ClientError> {
    client.call(1, "kill", json!({ "service": service, "signal": signal })).await?;
    Ok(())
}
