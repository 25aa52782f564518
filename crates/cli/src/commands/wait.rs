// SPDX-License-Identifier: MIT

//! `wait <service>`: subscribes to `stopped`, and on a match for `service` erases it and
//! exits, matching the upstream `nsctl.cpp`'s one-shot wait-then-erase behavior.

use serde_json::json;

use nsgod_wire::events::StoppedEvent;

use crate::client::RpcClient;
use crate::error::ClientError;

pub async fn run(client: &mut RpcClient, service: String) -> Result<(), ClientError> {
    loop {
        let notification = client.next_notification().await?;
        if notification.event != "stopped" {
            continue;
        }
        let Ok(event) = serde_json::from_value::<StoppedEvent>(notification.data) else { continue };
        if event.service != service {
            continue;
        }

        let result = client.call(1, "erase", json!({ "service": event.service })).await?;
        println!("{result}");
        return Ok(());
    }
}
