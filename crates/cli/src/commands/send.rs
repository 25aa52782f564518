// SPDX-License-Identifier: MIT

//! `send <service>`: the payload is read verbatim from stdin, per the upstream `nsctl.cpp`.

use std::io::Read;

use serde_json::json;

use crate::client::RpcClient;
use crate::error::ClientError;

pub async fn run(client: &mut RpcClient, service: String) -> Result<(), ClientError> {
    let mut data = String::new();
    std::io::stdin().read_to_string(&mut data).map_err(ClientError::Stdin)?;

    let result = client.call(1, "send", json!({ "service": service, "data": data })).await?;
    println!("{result}");
    Ok(())
}
