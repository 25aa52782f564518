// SPDX-License-Identifier: MIT

//! `start <service>` (SPEC_FULL.md §6): the `LaunchOptions` body is read as JSON from stdin,
//! matching the upstream `nsctl.cpp`'s stdin-as-payload convention.

use std::io::Read;

use serde_json::{json, Value};

use crate::client::RpcClient;
use crate::error::ClientError;

pub async fn run(client: &mut RpcClient, service: String) -> Result<(), ClientError> {
    let mut body = String::new();
    std::io::stdin().read_to_string(&mut body).map_err(ClientError::Stdin)?;
    let options: Value = serde_json::from_str(&body).map_err(ClientError::InvalidJson)?;

    let result = client.call(1, "start", json!({ "service": service, "options": options })).await?;
    println!("{result}");
    Ok(())
}
