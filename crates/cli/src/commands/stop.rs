// SPDX-License-Identifier: MIT

//! `stop <service>`: `kill` with `SIGTERM`, per the upstream `nsctl.cpp`.

use serde_json::json;

use crate::client::RpcClient;
use crate::error::ClientError;

pub async fn run(client: &mut RpcClient, service: String) -> Result<(), ClientError> {
    client.call(1, "kill", json!({ "service": service, "signal": libc::SIGTERM })).await?;
    Ok(())
}
