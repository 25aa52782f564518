// SPDX-License-Identifier: MIT

use serde_json::json;

use crate::client::RpcClient;
use crate::error::ClientError;

pub async fn run(client: &mut RpcClient, service: Option<String>) -> Result<(), ClientError> {
    let params = match service {
        Some(service) => json!({ "service": service }),
        None => json!({}),
    };
    let result = client.call(1, "status", params).await?;
    println!("{result}");
    Ok(())
}
