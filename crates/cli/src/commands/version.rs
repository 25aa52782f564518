// SPDX-License-Identifier: MIT

use serde_json::json;

use crate::client::RpcClient;
use crate::error::ClientError;

pub async fn run(client: &mut RpcClient) -> Result<(), ClientError> {
    let result = client.call(1, "version", json!({})).await?;
    println!("{result}");
    Ok(())
}
